//! Scale builder: the fixed bar scale and the per-attribute color scale.

use crate::config::VizConfig;
use chm_data::Dataset;
use chm_scale::{ColorScale, LinearScale};

/// Bar height scale: `[0, value_max] → [bar_range, 0]`. Built once.
pub fn value_scale(config: &VizConfig) -> LinearScale {
    LinearScale::new([0.0, config.value_max], [config.bar_range, 0.0])
}

/// Quantile color scale over every row's value of `expressed`.
pub fn color_scale(dataset: &Dataset, expressed: &str, config: &VizConfig) -> ColorScale {
    ColorScale::new(
        dataset.attribute_values(expressed),
        &config.palette,
        config.fallback_color.clone(),
    )
}

/// Both scales as threaded through a render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Scales {
    pub value: LinearScale,
    pub color: ColorScale,
}

impl Scales {
    pub fn new(dataset: &Dataset, expressed: &str, config: &VizConfig) -> Self {
        Self {
            value: value_scale(config),
            color: color_scale(dataset, expressed, config),
        }
    }

    /// Rebuild the color scale for a new expressed attribute. The value
    /// scale is left untouched.
    pub fn rebuild_color(&mut self, dataset: &Dataset, expressed: &str, config: &VizConfig) {
        self.color = color_scale(dataset, expressed, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chm_data::parse::parse_attribute_table;

    fn dataset() -> Dataset {
        let attrs = vec!["2010".to_string(), "2011".to_string()];
        let rows =
            parse_attribute_table("name,2010,2011\nA,10,5\nB,20,\nC,,7\nD,40,1\n", &attrs).unwrap();
        Dataset::new(attrs, rows, Vec::new(), Vec::new())
    }

    fn sorted(mut v: Vec<f64>) -> Vec<f64> {
        v.sort_by(f64::total_cmp);
        v
    }

    #[test]
    fn color_domain_is_exactly_the_expressed_values() {
        let config = VizConfig::default();
        let data = dataset();
        let mut scales = Scales::new(&data, "2010", &config);
        assert_eq!(scales.color.quantiles().domain(), &[10.0, 20.0, 40.0]);

        scales.rebuild_color(&data, "2011", &config);
        let expected: Vec<f64> = data
            .attribute_values("2011")
            .into_iter()
            .filter(|v| !v.is_nan())
            .collect();
        assert_eq!(scales.color.quantiles().domain(), sorted(expected).as_slice());
        assert!(scales
            .color
            .quantiles()
            .thresholds()
            .windows(2)
            .all(|w| w[0] <= w[1]));
        assert_eq!(scales.color.quantiles().thresholds().len(), 4);
    }

    #[test]
    fn value_scale_ignores_attribute_changes() {
        let config = VizConfig::default();
        let data = dataset();
        let mut scales = Scales::new(&data, "2010", &config);
        let before = scales.value;
        scales.rebuild_color(&data, "2011", &config);
        assert_eq!(scales.value, before);
        assert_eq!(scales.value.domain(), [0.0, 181_000.0]);
        assert_eq!(scales.value.range(), [463.0, 0.0]);
    }
}
