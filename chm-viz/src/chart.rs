//! Chart renderer: sorted bars, the value axis and the title.

use crate::config::{ChartConfig, VizConfig};
use crate::interaction::class_name;
use crate::layout::ChartFrame;
use crate::scales::Scales;
use chm_data::Dataset;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub name: String,
    pub class: String,
    /// Position in `Dataset::rows`.
    pub row: usize,
    pub value: Option<f64>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    /// Stagger before this bar starts moving on the last update.
    pub delay_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    /// Offset inside the translated plotting area.
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartScene {
    pub frame: ChartFrame,
    pub bars: Vec<Bar>,
    pub ticks: Vec<AxisTick>,
    pub title: String,
    pub title_position: [f64; 2],
}

pub fn chart_title(config: &ChartConfig, expressed: &str) -> String {
    format!("{}{}", config.title_prefix, expressed)
}

/// Descending by value, missing values last, ties in input order.
pub fn sort_bars(bars: &mut [Bar]) {
    bars.sort_by(|a, b| match (a.value, b.value) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Position, size and color `bars` in their current order.
pub fn update_chart(
    bars: &mut [Bar],
    n: usize,
    frame: &ChartFrame,
    scales: &Scales,
    config: &VizConfig,
) {
    let slot = if n == 0 {
        0.0
    } else {
        frame.inner_width / n as f64
    };
    let baseline = config.bar_range;
    for (i, bar) in bars.iter_mut().enumerate() {
        bar.x = i as f64 * slot + frame.left_padding;
        bar.width = (slot - config.chart.bar_gap).max(0.0);
        let top = bar
            .value
            .map(|v| scales.value.scale(v))
            .unwrap_or(baseline);
        bar.height = (baseline - top).max(0.0);
        bar.y = top.min(baseline) + frame.top_padding;
        bar.fill = scales.color.lookup(bar.value).to_string();
    }
}

fn axis_ticks(scales: &Scales, config: &ChartConfig) -> Vec<AxisTick> {
    scales
        .value
        .ticks(config.tick_count)
        .into_iter()
        .map(|value| AxisTick {
            value,
            y: scales.value.scale(value),
            label: scales.value.tick_format(config.tick_count, value),
        })
        .collect()
}

impl ChartScene {
    /// One bar per row that matched a region.
    pub fn build(
        dataset: &Dataset,
        frame: ChartFrame,
        scales: &Scales,
        expressed: &str,
        config: &VizConfig,
    ) -> Self {
        let mut bars: Vec<Bar> = dataset
            .anchored_rows()
            .into_iter()
            .map(|row| {
                let name = dataset.rows[row].name.clone();
                Bar {
                    class: class_name(&name),
                    name,
                    row,
                    value: dataset.rows[row].value(expressed),
                    x: 0.0,
                    y: 0.0,
                    width: 0.0,
                    height: 0.0,
                    fill: String::new(),
                    delay_ms: 0.0,
                }
            })
            .collect();
        sort_bars(&mut bars);
        let n = bars.len();
        update_chart(&mut bars, n, &frame, scales, config);
        log::info!("[CHM] chart: {} bars for {}", n, expressed);

        Self {
            frame,
            bars,
            ticks: axis_ticks(scales, &config.chart),
            title: chart_title(&config.chart, expressed),
            title_position: config.chart.title_position,
        }
    }

    /// Re-read values for `expressed`, re-sort, re-lay out and stagger.
    pub fn change(&mut self, dataset: &Dataset, scales: &Scales, expressed: &str, config: &VizConfig) {
        for bar in &mut self.bars {
            bar.value = dataset.rows.get(bar.row).and_then(|r| r.value(expressed));
        }
        sort_bars(&mut self.bars);
        let n = self.bars.len();
        update_chart(&mut self.bars, n, &self.frame, scales, config);
        for (i, bar) in self.bars.iter_mut().enumerate() {
            bar.delay_ms = i as f64 * config.chart.stagger_ms;
        }
        self.title = chart_title(&config.chart, expressed);
    }

    pub fn bar(&self, name: &str) -> Option<&Bar> {
        self.bars.iter().find(|b| b.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Viewport;
    use chm_data::parse::parse_attribute_table;

    fn bar(name: &str, value: Option<f64>) -> Bar {
        Bar {
            name: name.to_string(),
            class: class_name(name),
            row: 0,
            value,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            fill: String::new(),
            delay_ms: 0.0,
        }
    }

    fn names(bars: &[Bar]) -> Vec<&str> {
        bars.iter().map(|b| b.name.as_str()).collect()
    }

    #[test]
    fn sort_is_descending_stable_and_missing_last() {
        let mut bars = vec![
            bar("A", Some(10.0)),
            bar("B", None),
            bar("C", Some(30.0)),
            bar("D", Some(10.0)),
            bar("E", None),
        ];
        sort_bars(&mut bars);
        assert_eq!(names(&bars), vec!["C", "A", "D", "B", "E"]);
    }

    #[test]
    fn layout_follows_linear_scale() {
        let config = VizConfig::default();
        let attrs = vec!["2010".to_string()];
        let rows = parse_attribute_table("name,2010\nA,90500\nB,\n", &attrs).unwrap();
        let data = Dataset::new(attrs, rows, Vec::new(), Vec::new());
        let scales = Scales::new(&data, "2010", &config);
        let frame = ChartFrame::new(Viewport::new(1000.0, 800.0), &config);

        let mut bars = vec![bar("A", Some(90_500.0)), bar("B", None)];
        update_chart(&mut bars, 2, &frame, &scales, &config);

        assert_eq!(bars[0].x, 60.0);
        assert!((bars[1].x - (173.0 + 60.0)).abs() < 1e-9);
        assert!((bars[0].width - 172.0).abs() < 1e-9);
        assert!((bars[0].height - 231.5).abs() < 1e-9);
        assert!((bars[0].y - (231.5 + 10.0)).abs() < 1e-9);
        assert_eq!(bars[1].height, 0.0);
        assert_eq!(bars[1].y, 473.0);
        assert_eq!(bars[1].fill, scales.color.fallback());
    }

    #[test]
    fn heights_never_negative() {
        let config = VizConfig::default();
        let data = Dataset::new(vec!["x".into()], Vec::new(), Vec::new(), Vec::new());
        let scales = Scales::new(&data, "x", &config);
        let frame = ChartFrame::new(Viewport::new(1000.0, 800.0), &config);
        let mut bars = vec![bar("neg", Some(-500.0))];
        update_chart(&mut bars, 1, &frame, &scales, &config);
        assert_eq!(bars[0].height, 0.0);
        assert_eq!(bars[0].y, 473.0);
    }

    #[test]
    fn axis_ticks_are_formatted() {
        let config = VizConfig::default();
        let data = Dataset::new(vec!["x".into()], Vec::new(), Vec::new(), Vec::new());
        let scales = Scales::new(&data, "x", &config);
        let ticks = axis_ticks(&scales, &config.chart);
        assert_eq!(ticks.first().map(|t| t.label.as_str()), Some("0"));
        assert!(ticks.iter().any(|t| t.label == "100,000"));
        assert_eq!(ticks[0].y, 463.0);
        assert!(ticks.windows(2).all(|w| w[0].y > w[1].y));
    }

    #[test]
    fn title_uses_prefix() {
        assert_eq!(
            chart_title(&ChartConfig::default(), "2014"),
            "GDP in Thousands in 2014"
        );
    }
}
