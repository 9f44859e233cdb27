//! Visualization configuration.
//!
//! Defaults reproduce the GDP-per-capita dashboard: years 2010-2016, a
//! purple five-class palette, a bar value bound of 181,000 and a 55% / 40.8%
//! split of the viewport between map and chart. Every field can be
//! overridden from JSON; missing fields keep their defaults.

use chm_data::loader::DataSources;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    /// Selectable attributes, in selector order.
    pub attributes: Vec<String>,
    /// Attribute expressed before any user selection.
    pub initial_attribute: String,
    pub sources: DataSources,
    /// Assumed upper bound of every attribute value; maps to the top of a bar.
    pub value_max: f64,
    /// Pixel height a bar reaches at `value_max`.
    pub bar_range: f64,
    /// Quantile classes, light to dark.
    pub palette: Vec<String>,
    /// Fill for missing or non-numeric values.
    pub fallback_color: String,
    pub map: MapConfig,
    pub chart: ChartConfig,
    pub highlight: StrokeStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width_ratio: f64,
    pub height: f64,
    /// Minor graticule spacing in degrees (longitude, latitude).
    pub graticule_step: [f64; 2],
    pub projection_scale: f64,
    pub projection_translate: [f64; 2],
    pub region_stroke: StrokeStyle,
    pub recolor_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width_ratio: f64,
    pub height: f64,
    pub left_padding: f64,
    pub right_padding: f64,
    pub top_bottom_padding: f64,
    /// Horizontal gap between adjacent bars.
    pub bar_gap: f64,
    pub bar_stroke: StrokeStyle,
    pub title_prefix: String,
    pub title_position: [f64; 2],
    pub tick_count: usize,
    pub update_ms: f64,
    /// Extra delay per bar (by sorted position) when bars re-sort.
    pub stagger_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub stroke: String,
    pub stroke_width: String,
}

impl StrokeStyle {
    pub fn new(stroke: &str, stroke_width: &str) -> Self {
        Self {
            stroke: stroke.to_string(),
            stroke_width: stroke_width.to_string(),
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new("#e2ff07", "5")
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width_ratio: 0.55,
            height: 500.0,
            graticule_step: [5.0, 5.0],
            projection_scale: 1070.0,
            projection_translate: [480.0, 250.0],
            region_stroke: StrokeStyle::new("#000", "0.5px"),
            recolor_ms: 1000.0,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width_ratio: 0.408,
            height: 500.0,
            left_padding: 60.0,
            right_padding: 2.0,
            top_bottom_padding: 10.0,
            bar_gap: 1.0,
            bar_stroke: StrokeStyle::new("none", "0px"),
            title_prefix: "GDP in Thousands in ".to_string(),
            title_position: [275.0, 40.0],
            tick_count: 10,
            update_ms: 500.0,
            stagger_ms: 20.0,
        }
    }
}

impl Default for VizConfig {
    fn default() -> Self {
        let attributes: Vec<String> = (2010..=2016).map(|y| y.to_string()).collect();
        Self {
            initial_attribute: attributes[0].clone(),
            attributes,
            sources: DataSources::default(),
            value_max: 181_000.0,
            bar_range: 463.0,
            palette: ["#f2f0f7", "#cbc9e2", "#9e9ac8", "#756bb1", "#54278f"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            fallback_color: "#CCC".to_string(),
            map: MapConfig::default(),
            chart: ChartConfig::default(),
            highlight: StrokeStyle::default(),
        }
    }
}

impl VizConfig {
    /// Parse overrides from JSON and validate the result.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: VizConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.attributes.is_empty() {
            anyhow::bail!("config: attribute list is empty");
        }
        if !self.attributes.contains(&self.initial_attribute) {
            anyhow::bail!(
                "config: initial attribute {:?} is not one of {:?}",
                self.initial_attribute,
                self.attributes
            );
        }
        if self.palette.is_empty() {
            anyhow::bail!("config: palette is empty");
        }
        for color in self.palette.iter().chain(std::iter::once(&self.fallback_color)) {
            chm_scale::Rgb::parse(color)?;
        }
        if self.value_max.is_nan() || self.value_max <= 0.0 {
            anyhow::bail!("config: value_max must be positive, got {}", self.value_max);
        }
        Ok(())
    }

    pub fn is_attribute(&self, attribute: &str) -> bool {
        self.attributes.iter().any(|a| a == attribute)
    }
}
