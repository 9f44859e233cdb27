//! The coordinated view: one expressed attribute driving the map, the chart
//! and the hover label.

use crate::anim::{Channel, Timeline, TweenValue};
use crate::chart::{Bar, ChartScene};
use crate::config::{StrokeStyle, VizConfig};
use crate::interaction::{ElementId, Highlighter, InfoLabel};
use crate::layout::{ChartFrame, MapFrame, Viewport};
use crate::map::{MapScene, RegionShape};
use crate::scales::Scales;
use crate::selection::Selection;
use anyhow::Context;
use chm_data::Dataset;

/// Bar geometry and fill as displayed at some instant.
#[derive(Debug, Clone, PartialEq)]
pub struct BarFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
}

#[derive(Debug, Clone)]
pub struct Viz {
    config: VizConfig,
    dataset: Dataset,
    selection: Selection,
    scales: Scales,
    map: MapScene,
    chart: ChartScene,
    highlighter: Highlighter,
    timeline: Timeline,
}

impl Viz {
    pub fn new(config: VizConfig, dataset: Dataset, viewport: Viewport) -> anyhow::Result<Self> {
        config.validate().context("invalid visualization config")?;
        for attribute in &config.attributes {
            if !dataset.has_attribute(attribute) {
                anyhow::bail!("attribute {:?} is not loaded in the dataset", attribute);
            }
        }
        let selection = Selection::new(&config);
        let expressed = selection.expressed().to_string();
        let scales = Scales::new(&dataset, &expressed, &config);
        let map = MapScene::build(
            &dataset,
            MapFrame::new(viewport, &config),
            &scales,
            &expressed,
            &config,
        );
        let chart = ChartScene::build(
            &dataset,
            ChartFrame::new(viewport, &config),
            &scales,
            &expressed,
            &config,
        );

        let mut highlighter = Highlighter::new(config.highlight.clone());
        for shape in &map.regions {
            highlighter.register(
                ElementId::Region(shape.name.clone()),
                config.map.region_stroke.clone(),
            );
        }
        for bar in &chart.bars {
            highlighter.register(ElementId::Bar(bar.name.clone()), config.chart.bar_stroke.clone());
        }

        log::info!(
            "[CHM] viz ready: {} regions, {} bars, expressing {}",
            map.regions.len(),
            chart.bars.len(),
            expressed
        );
        Ok(Self {
            config,
            dataset,
            selection,
            scales,
            map,
            chart,
            highlighter,
            timeline: Timeline::new(),
        })
    }

    /// Express `attribute` and schedule the recolor and bar transitions at
    /// clock time `now`. Returns whether anything changed; an unknown
    /// attribute is an error and leaves the view untouched.
    pub fn change_attribute(&mut self, attribute: &str, now: f64) -> anyhow::Result<bool> {
        if !self.selection.express(attribute, &self.config)? {
            return Ok(false);
        }
        log::info!("[CHM] expressing {}", attribute);
        self.scales
            .rebuild_color(&self.dataset, attribute, &self.config);

        let old_fills: Vec<String> = self.map.regions.iter().map(|r| r.fill.clone()).collect();
        self.map.recolor(&self.dataset, &self.scales, attribute);
        for (shape, from) in self.map.regions.iter().zip(old_fills) {
            self.timeline.retarget(
                (ElementId::Region(shape.name.clone()), Channel::Fill),
                TweenValue::color(&from)?,
                TweenValue::color(&shape.fill)?,
                now,
                0.0,
                self.config.map.recolor_ms,
            );
        }

        let old_bars = self.chart.bars.clone();
        self.chart
            .change(&self.dataset, &self.scales, attribute, &self.config);
        for bar in &self.chart.bars {
            let Some(old) = old_bars.iter().find(|b| b.name == bar.name) else {
                continue;
            };
            let id = ElementId::Bar(bar.name.clone());
            let duration = self.config.chart.update_ms;
            for (channel, from, to) in [
                (Channel::X, old.x, bar.x),
                (Channel::Y, old.y, bar.y),
                (Channel::Height, old.height, bar.height),
            ] {
                self.timeline.retarget(
                    (id.clone(), channel),
                    TweenValue::Number(from),
                    TweenValue::Number(to),
                    now,
                    bar.delay_ms,
                    duration,
                );
            }
            self.timeline.retarget(
                (id, Channel::Fill),
                TweenValue::color(&old.fill)?,
                TweenValue::color(&bar.fill)?,
                now,
                bar.delay_ms,
                duration,
            );
        }

        if let Some(region) = self.highlighter.label().map(|l| l.region.clone()) {
            let label = self.make_label(&region);
            let position = self.highlighter.label().and_then(|l| l.position);
            self.highlighter.enter(InfoLabel { position, ..label });
        }
        Ok(true)
    }

    pub fn pointer_enter(&mut self, name: &str) {
        let label = self.make_label(name);
        self.highlighter.enter(label);
    }

    pub fn pointer_leave(&mut self, name: &str) {
        self.highlighter.leave(name);
    }

    pub fn pointer_move(&mut self, client: [f64; 2], label_width: f64, viewport_width: f64) {
        self.highlighter
            .move_label(client, label_width, viewport_width);
    }

    fn make_label(&self, name: &str) -> InfoLabel {
        let expressed = self.selection.expressed();
        let value = match self.dataset.row(name) {
            Some(row) => row.value(expressed),
            None => self
                .map
                .region(name)
                .and_then(|r| self.dataset.regions.get(r.index))
                .and_then(|r| r.value(expressed)),
        };
        InfoLabel::new(name, value, expressed)
    }

    pub fn config(&self) -> &VizConfig {
        &self.config
    }

    pub fn expressed(&self) -> &str {
        self.selection.expressed()
    }

    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    pub fn map(&self) -> &MapScene {
        &self.map
    }

    pub fn chart(&self) -> &ChartScene {
        &self.chart
    }

    pub fn label(&self) -> Option<&InfoLabel> {
        self.highlighter.label()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Current stroke for an element.
    pub fn stroke(&self, id: &ElementId) -> Option<&StrokeStyle> {
        self.highlighter.styles().current(id)
    }

    /// Region fill as displayed at `now`.
    pub fn region_fill(&self, shape: &RegionShape, now: f64) -> String {
        self.timeline
            .color(&(ElementId::Region(shape.name.clone()), Channel::Fill), now)
            .unwrap_or_else(|| shape.fill.clone())
    }

    /// Bar geometry as displayed at `now`.
    pub fn bar_frame(&self, bar: &Bar, now: f64) -> BarFrame {
        let id = ElementId::Bar(bar.name.clone());
        let number = |channel, target| {
            self.timeline
                .number(&(id.clone(), channel), now)
                .unwrap_or(target)
        };
        BarFrame {
            x: number(Channel::X, bar.x),
            y: number(Channel::Y, bar.y),
            width: bar.width,
            height: number(Channel::Height, bar.height),
            fill: self
                .timeline
                .color(&(id.clone(), Channel::Fill), now)
                .unwrap_or_else(|| bar.fill.clone()),
        }
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.timeline.is_running(now)
    }

    /// Forget finished tweens.
    pub fn settle(&mut self, now: f64) {
        self.timeline.prune(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chm_data::models::RegionFeature;
    use chm_data::parse::parse_attribute_table;
    use chm_scale::Rgb;
    use geojson::JsonObject;
    use std::collections::BTreeMap;

    fn region(name: &str) -> RegionFeature {
        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), name.into());
        RegionFeature {
            properties,
            geometry: None,
            attributes: BTreeMap::new(),
        }
    }

    fn config() -> VizConfig {
        VizConfig {
            attributes: vec!["v".to_string(), "w".to_string()],
            initial_attribute: "v".to_string(),
            ..VizConfig::default()
        }
    }

    fn viz() -> Viz {
        let attrs = vec!["v".to_string(), "w".to_string()];
        let rows = parse_attribute_table("name,v,w\nA,10,30\nB,20,5\nC,,15\n", &attrs).unwrap();
        let regions = vec![region("A"), region("B"), region("C")];
        let dataset = Dataset::new(attrs, rows, Vec::new(), regions);
        Viz::new(config(), dataset, Viewport::new(1000.0, 800.0)).unwrap()
    }

    #[test]
    fn three_region_scenario() {
        let viz = viz();
        let fallback = viz.scales().color.fallback().to_string();

        let names: Vec<&str> = viz.chart().bars.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        let colored = viz
            .chart()
            .bars
            .iter()
            .filter(|b| b.height > 0.0 && b.fill != fallback)
            .count();
        assert_eq!(colored, 2);

        assert_eq!(viz.map().region("C").unwrap().fill, fallback);
        assert_eq!(viz.chart().bar("C").unwrap().fill, fallback);
        assert_eq!(viz.chart().bar("C").unwrap().height, 0.0);
        assert_ne!(viz.map().region("A").unwrap().fill, fallback);
    }

    #[test]
    fn map_and_chart_share_color_lookup() {
        let viz = viz();
        for bar in &viz.chart().bars {
            assert_eq!(viz.map().region(&bar.name).unwrap().fill, bar.fill);
        }
    }

    #[test]
    fn highlight_and_restore_through_pointer_events() {
        let mut viz = viz();
        viz.pointer_enter("A");
        let region = ElementId::Region("A".into());
        let bar = ElementId::Bar("A".into());
        assert_eq!(viz.stroke(&region), Some(&StrokeStyle::new("#e2ff07", "5")));
        assert_eq!(viz.stroke(&bar), Some(&StrokeStyle::new("#e2ff07", "5")));
        let label = viz.label().unwrap();
        assert_eq!(label.value, "10");
        assert_eq!(label.attribute, "v");
        assert_eq!(label.region, "A");

        viz.pointer_move([995.0, 40.0], 100.0, 1000.0);
        let pos = viz.label().unwrap().position.unwrap();
        assert_eq!((pos.left, pos.top), (885.0, 65.0));

        viz.pointer_leave("A");
        assert_eq!(viz.stroke(&region), Some(&StrokeStyle::new("#000", "0.5px")));
        assert_eq!(viz.stroke(&bar), Some(&StrokeStyle::new("none", "0px")));
        assert!(viz.label().is_none());
    }

    #[test]
    fn change_attribute_resorts_and_tweens() {
        let mut viz = viz();
        let before = viz.chart().bar("A").unwrap().clone();
        assert!(viz.change_attribute("w", 1000.0).unwrap());
        assert_eq!(viz.expressed(), "w");
        assert_eq!(viz.chart().title, "GDP in Thousands in w");

        let names: Vec<&str> = viz.chart().bars.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "B"]);
        let delays: Vec<f64> = viz.chart().bars.iter().map(|b| b.delay_ms).collect();
        assert_eq!(delays, vec![0.0, 20.0, 40.0]);

        let a = viz.chart().bar("A").unwrap().clone();
        assert_eq!(viz.bar_frame(&a, 1000.0).x, before.x);
        assert_eq!(viz.bar_frame(&a, 1500.0).x, a.x);
        assert!(viz.is_animating(1200.0));

        let c = viz.map().region("C").unwrap().clone();
        assert_ne!(c.fill, viz.scales().color.fallback());
        let end = Rgb::parse(&c.fill).unwrap().to_string();
        assert_eq!(viz.region_fill(&c, 2000.0), end);
        assert!(!viz.is_animating(2000.0));
        viz.settle(2000.0);
        assert!(viz.timeline().is_empty());
    }

    #[test]
    fn second_change_mid_flight_restarts_from_displayed_frame() {
        let mut viz = viz();
        viz.change_attribute("w", 1000.0).unwrap();
        let frames = |viz: &Viz| -> Vec<(String, f64, f64, String)> {
            let mut frames: Vec<_> = viz
                .chart()
                .bars
                .iter()
                .map(|b| {
                    let f = viz.bar_frame(b, 1200.0);
                    (b.name.clone(), f.x, f.height, f.fill)
                })
                .collect();
            frames.sort_by(|a, b| a.0.cmp(&b.0));
            frames
        };
        let fills = |viz: &Viz| -> Vec<String> {
            ["A", "B", "C"]
                .iter()
                .map(|n| viz.region_fill(viz.map().region(n).unwrap(), 1200.0))
                .collect()
        };
        let bars_mid = frames(&viz);
        let fills_mid = fills(&viz);

        assert!(viz.change_attribute("v", 1200.0).unwrap());
        assert_eq!(frames(&viz), bars_mid);
        assert_eq!(fills(&viz), fills_mid);

        let names: Vec<&str> = viz.chart().bars.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert!(viz.is_animating(1500.0));
        let end = 1200.0 + 1000.0 + 1.0;
        assert!(!viz.is_animating(end));
        for bar in &viz.chart().bars {
            let frame = viz.bar_frame(bar, end);
            assert_eq!(frame.x, bar.x);
            assert_eq!(frame.height, bar.height);
            assert_eq!(frame.fill, Rgb::parse(&bar.fill).unwrap().to_string());
        }
    }

    #[test]
    fn unknown_attribute_leaves_view_unchanged() {
        let mut viz = viz();
        let chart = viz.chart().clone();
        assert!(viz.change_attribute("Select Attribute", 0.0).is_err());
        assert_eq!(viz.expressed(), "v");
        assert_eq!(viz.chart(), &chart);
        assert!(viz.timeline().is_empty());
        assert!(!viz.change_attribute("v", 0.0).unwrap());
    }

    #[test]
    fn label_refreshes_on_attribute_change() {
        let mut viz = viz();
        viz.pointer_enter("C");
        assert_eq!(viz.label().unwrap().value, "No data");
        viz.change_attribute("w", 0.0).unwrap();
        assert_eq!(viz.label().unwrap().value, "15");
        assert_eq!(viz.label().unwrap().attribute, "w");
    }

    #[test]
    fn rejects_config_attributes_missing_from_dataset() {
        let attrs = vec!["v".to_string()];
        let rows = parse_attribute_table("name,v\nA,1\n", &attrs).unwrap();
        let dataset = Dataset::new(attrs, rows, Vec::new(), vec![region("A")]);
        assert!(Viz::new(config(), dataset, Viewport::new(800.0, 600.0)).is_err());
    }
}
