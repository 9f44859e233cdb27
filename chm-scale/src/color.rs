//! Palette colors and the choropleth color lookup shared by map and chart.

use crate::quantile::QuantileScale;
use std::fmt;

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (case-insensitive, leading `#` optional).
    pub fn parse(hex: &str) -> anyhow::Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|e| anyhow::anyhow!("invalid color {:?}: {}", hex, e))
        };
        match digits.len() {
            3 => {
                let expand = |i: usize| channel(&digits[i..i + 1].repeat(2));
                Ok(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => anyhow::bail!("invalid color {:?}: expected #rgb or #rrggbb", hex),
        }
    }

    /// Channel-wise linear interpolation, `t` clamped to `[0, 1]`.
    pub fn interpolate(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Quantile color scale over the expressed attribute plus a fallback color
/// for missing values.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    quantiles: QuantileScale<String>,
    fallback: String,
}

impl ColorScale {
    /// Build from the expressed attribute's values (NaN entries are dropped
    /// from the domain) and a palette ordered light to dark.
    pub fn new(
        values: impl IntoIterator<Item = f64>,
        palette: &[String],
        fallback: impl Into<String>,
    ) -> Self {
        let quantiles = QuantileScale::new(values, palette.to_vec());
        log::debug!(
            "[CHM] color scale: {} samples, breaks {:?}",
            quantiles.domain().len(),
            quantiles.thresholds()
        );
        Self {
            quantiles,
            fallback: fallback.into(),
        }
    }

    /// Color for a value: the quantile color when it is a number, the
    /// fallback when it is missing or NaN.
    pub fn lookup(&self, value: Option<f64>) -> &str {
        match value {
            Some(v) if !v.is_nan() => self
                .quantiles
                .scale(v)
                .map(String::as_str)
                .unwrap_or(&self.fallback),
            _ => &self.fallback,
        }
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn quantiles(&self) -> &QuantileScale<String> {
        &self.quantiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn purples() -> Vec<String> {
        ["#f2f0f7", "#cbc9e2", "#9e9ac8", "#756bb1", "#54278f"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Rgb::parse("#54278f").unwrap(), Rgb::new(0x54, 0x27, 0x8f));
        assert_eq!(Rgb::parse("#CCC").unwrap(), Rgb::new(0xcc, 0xcc, 0xcc));
        assert!(Rgb::parse("none").is_err());
        assert!(Rgb::parse("#12345").is_err());
    }

    #[test]
    fn displays_as_lowercase_hex() {
        assert_eq!(Rgb::new(0xe2, 0xff, 0x07).to_string(), "#e2ff07");
    }

    #[test]
    fn interpolates_midpoint_and_clamps() {
        let black = Rgb::new(0, 0, 0);
        let white = Rgb::new(255, 255, 255);
        assert_eq!(black.interpolate(white, 0.5), Rgb::new(128, 128, 128));
        assert_eq!(black.interpolate(white, 2.0), white);
        assert_eq!(black.interpolate(white, -1.0), black);
    }

    #[test]
    fn missing_and_nan_values_get_fallback() {
        let scale = ColorScale::new([1.0, 2.0, 3.0, 4.0, 5.0], &purples(), "#CCC");
        assert_eq!(scale.lookup(None), "#CCC");
        assert_eq!(scale.lookup(Some(f64::NAN)), "#CCC");
    }

    #[test]
    fn valid_values_never_get_fallback() {
        let scale = ColorScale::new([10.0, 20.0, f64::NAN], &purples(), "#CCC");
        for v in [-1.0, 10.0, 15.0, 20.0, 1e9] {
            assert_ne!(scale.lookup(Some(v)), "#CCC");
        }
        assert_eq!(scale.lookup(Some(10.0)), "#f2f0f7");
        assert_eq!(scale.lookup(Some(20.0)), "#54278f");
    }

    #[test]
    fn empty_palette_falls_back() {
        let scale = ColorScale::new([1.0], &[], "#CCC");
        assert_eq!(scale.lookup(Some(1.0)), "#CCC");
    }
}
