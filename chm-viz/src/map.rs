//! Map renderer: projected paths for the graticule, countries and regions.

use crate::config::VizConfig;
use crate::interaction::class_name;
use crate::layout::MapFrame;
use crate::scales::Scales;
use chm_data::Dataset;
use chm_geo::graticule::Graticule;
use chm_geo::path::PathGenerator;
use chm_geo::projection::ConicEqualArea;

/// One region path with its current fill.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionShape {
    /// Position in `Dataset::regions`.
    pub index: usize,
    pub name: String,
    pub class: String,
    pub d: String,
    pub value: Option<f64>,
    pub fill: String,
}

/// Everything the map panel draws, in z-order.
#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    pub width: f64,
    pub height: f64,
    pub graticule_background: String,
    pub graticule_lines: String,
    pub countries: String,
    pub regions: Vec<RegionShape>,
}

pub fn projection(config: &VizConfig) -> ConicEqualArea {
    ConicEqualArea::albers()
        .scale(config.map.projection_scale)
        .translate(config.map.projection_translate)
}

impl MapScene {
    pub fn build(
        dataset: &Dataset,
        frame: MapFrame,
        scales: &Scales,
        expressed: &str,
        config: &VizConfig,
    ) -> Self {
        let projection = projection(config);
        let path = PathGenerator::new(&projection);
        let graticule = Graticule::new().step(config.map.graticule_step);

        let graticule_background =
            path.ring(&graticule.outline_centered(projection.central_meridian()));
        let graticule_lines: String = graticule
            .lines()
            .iter()
            .map(|line| path.line(line))
            .collect();

        let regions = dataset
            .regions
            .iter()
            .enumerate()
            .map(|(index, region)| {
                let name = region.name().unwrap_or_default().to_string();
                let value = region.value(expressed);
                RegionShape {
                    index,
                    class: class_name(&name),
                    name,
                    d: region
                        .geometry
                        .as_ref()
                        .map(|g| path.geometry(g))
                        .unwrap_or_default(),
                    value,
                    fill: scales.color.lookup(value).to_string(),
                }
            })
            .collect::<Vec<_>>();

        log::info!(
            "[CHM] map: {} regions, {} countries",
            regions.len(),
            dataset.countries.len()
        );

        Self {
            width: frame.width,
            height: frame.height,
            graticule_background,
            graticule_lines,
            countries: path.features(&dataset.countries),
            regions,
        }
    }

    /// Recompute every region's value and fill for `expressed`.
    pub fn recolor(&mut self, dataset: &Dataset, scales: &Scales, expressed: &str) {
        for shape in &mut self.regions {
            let value = dataset
                .regions
                .get(shape.index)
                .and_then(|r| r.value(expressed));
            shape.value = value;
            shape.fill = scales.color.lookup(value).to_string();
        }
    }

    pub fn region(&self, name: &str) -> Option<&RegionShape> {
        self.regions.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Viewport;
    use chm_data::models::RegionFeature;
    use chm_data::parse::parse_attribute_table;
    use chm_geo::topojson::Topology;

    fn dataset() -> Dataset {
        let attrs: Vec<String> = ["2010", "2011"].iter().map(|s| s.to_string()).collect();
        let csv = include_str!("../../fixtures/gdpPerCapReal.csv");
        let rows = parse_attribute_table(csv, &attrs).unwrap();
        let topo = include_str!("../../fixtures/states-sample.topojson");
        let regions = Topology::from_json(topo)
            .unwrap()
            .features("states")
            .unwrap()
            .into_iter()
            .map(RegionFeature::from)
            .collect();
        let world = include_str!("../../fixtures/world-sample.topojson");
        let countries = Topology::from_json(world)
            .unwrap()
            .features("AllCountries")
            .unwrap();
        Dataset::new(attrs, rows, countries, regions)
    }

    fn scene(expressed: &str) -> (Dataset, MapScene, Scales, VizConfig) {
        let config = VizConfig::default();
        let data = dataset();
        let scales = Scales::new(&data, expressed, &config);
        let frame = MapFrame::new(Viewport::new(1200.0, 800.0), &config);
        let scene = MapScene::build(&data, frame, &scales, expressed, &config);
        (data, scene, scales, config)
    }

    #[test]
    fn one_shape_per_region_with_paths() {
        let (data, scene, _, _) = scene("2010");
        assert_eq!(scene.regions.len(), data.regions.len());
        assert!(scene.regions.iter().all(|r| r.d.starts_with('M')));
        assert!(!scene.countries.is_empty());
        assert!(scene.graticule_background.ends_with('Z'));
        assert!(scene.graticule_lines.matches('M').count() >= 105);
        assert_eq!(scene.width, 660.0);
    }

    #[test]
    fn unjoined_region_gets_fallback() {
        let (_, scene, scales, _) = scene("2010");
        let sonora = scene.region("Sonora").unwrap();
        assert_eq!(sonora.value, None);
        assert_eq!(sonora.fill, scales.color.fallback());
        let colorado = scene.region("Colorado").unwrap();
        assert!(colorado.value.is_some());
        assert_ne!(colorado.fill, scales.color.fallback());
    }

    #[test]
    fn recolor_tracks_expressed_attribute() {
        let (data, mut scene, mut scales, config) = scene("2010");
        scales.rebuild_color(&data, "2011", &config);
        scene.recolor(&data, &scales, "2011");
        for shape in &scene.regions {
            let expected = data.regions[shape.index].value("2011");
            assert_eq!(shape.value, expected);
            assert_eq!(shape.fill, scales.color.lookup(expected));
        }
    }
}
