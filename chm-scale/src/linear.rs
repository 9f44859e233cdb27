//! Linear scale with "nice" ticks.
//!
//! Tick generation follows the usual 1/2/5 × 10^k rule: the raw step
//! `span / count` is rounded down to a power of ten and then widened by 2, 5
//! or 10 depending on how far it undershoots the requested count.

/// A linear mapping from a two-point numeric domain to a two-point range.
///
/// Either interval may be inverted; the bar chart uses `[0, max] → [463, 0]`
/// so larger values produce smaller y coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Map a domain value into the range. A degenerate domain maps everything
    /// to the start of the range.
    pub fn scale(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Roughly `count` evenly spaced, human-friendly values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let Some((start, stop, step)) = tick_range(self.domain, count) else {
            return Vec::new();
        };
        let mut ticks = Vec::new();
        let mut i = 0usize;
        loop {
            let value = start + step * i as f64;
            if value >= stop {
                break;
            }
            ticks.push(value);
            i += 1;
        }
        ticks
    }

    /// Format a tick value with thousands separators and the number of
    /// decimals implied by the tick step for `count` ticks.
    pub fn tick_format(&self, count: usize, value: f64) -> String {
        let precision = tick_range(self.domain, count)
            .map(|(_, _, step)| (-(step.log10() + 0.01).floor()).max(0.0) as usize)
            .unwrap_or(0);
        format_grouped(value, precision)
    }
}

/// Compute `(start, stop_exclusive, step)` for `count` ticks over `domain`.
fn tick_range(domain: [f64; 2], count: usize) -> Option<(f64, f64, f64)> {
    let (lo, hi) = if domain[0] <= domain[1] {
        (domain[0], domain[1])
    } else {
        (domain[1], domain[0])
    };
    let span = hi - lo;
    if count == 0 || !span.is_finite() || span <= 0.0 {
        return None;
    }
    let m = count as f64;
    let mut step = 10f64.powf((span / m).log10().floor());
    let err = m / span * step;
    if err <= 0.15 {
        step *= 10.0;
    } else if err <= 0.35 {
        step *= 5.0;
    } else if err <= 0.75 {
        step *= 2.0;
    }
    let start = (lo / step).ceil() * step;
    let stop = (hi / step).floor() * step + step * 0.5;
    Some((start, stop, step))
}

/// Format `value` with `precision` decimals and comma thousands separators.
pub fn format_grouped(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (formatted.clone(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar_scale() -> LinearScale {
        LinearScale::new([0.0, 181_000.0], [463.0, 0.0])
    }

    #[test]
    fn maps_domain_endpoints_to_range_endpoints() {
        let s = bar_scale();
        assert_eq!(s.scale(0.0), 463.0);
        assert_eq!(s.scale(181_000.0), 0.0);
    }

    #[test]
    fn strictly_decreasing_in_pixel_y() {
        let s = bar_scale();
        let mut prev = s.scale(0.0);
        for v in (1..=181).map(|k| k as f64 * 1000.0) {
            let y = s.scale(v);
            assert!(y < prev, "y({v}) = {y} should be below {prev}");
            prev = y;
        }
    }

    #[test]
    fn degenerate_domain_maps_to_range_start() {
        let s = LinearScale::new([5.0, 5.0], [100.0, 0.0]);
        assert_eq!(s.scale(42.0), 100.0);
    }

    #[test]
    fn ticks_for_bar_domain_step_by_twenty_thousand() {
        let ticks = bar_scale().ticks(10);
        let expected: Vec<f64> = (0..10).map(|k| k as f64 * 20_000.0).collect();
        assert_eq!(ticks, expected);
    }

    #[test]
    fn ticks_for_unit_interval() {
        let s = LinearScale::new([0.0, 1.0], [0.0, 100.0]);
        let ticks = s.ticks(5);
        assert_eq!(ticks.len(), 6);
        assert!((ticks[1] - 0.2).abs() < 1e-12);
        assert_eq!(s.tick_format(5, 0.2), "0.2");
    }

    #[test]
    fn empty_domain_has_no_ticks() {
        assert!(LinearScale::new([3.0, 3.0], [0.0, 1.0]).ticks(10).is_empty());
    }

    #[test]
    fn tick_labels_use_thousands_separators() {
        let s = bar_scale();
        assert_eq!(s.tick_format(10, 0.0), "0");
        assert_eq!(s.tick_format(10, 20_000.0), "20,000");
        assert_eq!(s.tick_format(10, 180_000.0), "180,000");
    }

    #[test]
    fn format_grouped_handles_negatives_and_decimals() {
        assert_eq!(format_grouped(-1_234_567.891, 2), "-1,234,567.89");
        assert_eq!(format_grouped(999.0, 0), "999");
        assert_eq!(format_grouped(-0.0001, 0), "0");
    }
}
