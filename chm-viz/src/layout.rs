//! Panel geometry derived from the viewport.

use crate::config::VizConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapFrame {
    pub width: f64,
    pub height: f64,
}

impl MapFrame {
    pub fn new(viewport: Viewport, config: &VizConfig) -> Self {
        Self {
            width: viewport.width * config.map.width_ratio,
            height: config.map.height,
        }
    }
}

/// Chart dimensions. The plotting area is inset by the paddings and drawn
/// translated by `(left_padding, top_bottom_padding)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub inner_width: f64,
    pub inner_height: f64,
    pub left_padding: f64,
    pub top_padding: f64,
}

impl ChartFrame {
    pub fn new(viewport: Viewport, config: &VizConfig) -> Self {
        let c = &config.chart;
        let width = viewport.width * c.width_ratio;
        Self {
            width,
            height: c.height,
            inner_width: (width - c.left_padding - c.right_padding).max(0.0),
            inner_height: (c.height - c.top_bottom_padding * 2.0).max(0.0),
            left_padding: c.left_padding,
            top_padding: c.top_bottom_padding,
        }
    }

    /// SVG transform for the plotting area.
    pub fn translate(&self) -> String {
        format!("translate({},{})", self.left_padding, self.top_padding)
    }
}
