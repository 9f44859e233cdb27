//! Data layer for the choropleth: attribute table, region features, joining
//! and loading.
//!
//! # Architecture
//!
//! - [`parse`] reads the CSV attribute table into [`models::AttributeRow`]s
//! - [`join`] copies row values onto [`models::RegionFeature`]s by name
//! - [`loader`] fetches all three sources concurrently through the
//!   [`loader::Fetch`] seam (browser fetch, local files, test doubles)
//!
//! # Usage
//!
//! ```rust
//! use chm_data::{parse::parse_attribute_table, Dataset};
//!
//! let attrs = vec!["2010".to_string()];
//! let rows = parse_attribute_table("name,2010\nOhio,50000\n", &attrs).unwrap();
//! let dataset = Dataset::new(attrs, rows, Vec::new(), Vec::new());
//! assert_eq!(dataset.attribute_values("2010"), vec![50000.0]);
//! ```

pub mod join;
pub mod loader;
pub mod models;
pub mod parse;

use geojson::Feature;
use join::JoinReport;
use models::{AttributeRow, RegionFeature};

/// Everything loaded for one session. Built once; only the views change
/// afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Fixed, ordered attribute names.
    pub attributes: Vec<String>,
    pub rows: Vec<AttributeRow>,
    /// World/country outlines, drawn as one path.
    pub countries: Vec<Feature>,
    /// Joined regions, in topology order.
    pub regions: Vec<RegionFeature>,
    pub join: JoinReport,
}

impl Dataset {
    /// Join `rows` onto `regions` and bundle the result.
    pub fn new(
        attributes: Vec<String>,
        rows: Vec<AttributeRow>,
        countries: Vec<Feature>,
        mut regions: Vec<RegionFeature>,
    ) -> Self {
        let join = join::join_attributes(&mut regions, &rows, &attributes);
        Self {
            attributes,
            rows,
            countries,
            regions,
            join,
        }
    }

    /// Raw values of `attribute` across all rows, NaN included, in row order.
    pub fn attribute_values(&self, attribute: &str) -> Vec<f64> {
        self.rows.iter().map(|r| r.raw(attribute)).collect()
    }

    /// Indices of rows that matched at least one region, in row order.
    pub fn anchored_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| !self.join.unmatched_rows.contains(&r.name))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn row(&self, name: &str) -> Option<&AttributeRow> {
        self.rows.iter().find(|r| r.name == name)
    }

    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes.iter().any(|a| a == attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[test]
    fn anchored_rows_skip_rows_without_regions() {
        let attrs = vec!["2010".to_string()];
        let rows =
            parse::parse_attribute_table("name,2010\nOhio,1\nAtlantis,2\nUtah,3\n", &attrs).unwrap();
        let dataset = Dataset::new(attrs, rows, Vec::new(), vec![region("Utah"), region("Ohio")]);
        assert_eq!(dataset.anchored_rows(), vec![0, 2]);
        assert_eq!(dataset.join.unmatched_rows, vec!["Atlantis".to_string()]);
    }

    #[test]
    fn attribute_values_keep_nan_in_row_order() {
        let attrs = vec!["2010".to_string()];
        let rows = parse::parse_attribute_table("name,2010\nA,10\nB,\nC,30\n", &attrs).unwrap();
        let dataset = Dataset::new(attrs, rows, Vec::new(), Vec::new());
        let values = dataset.attribute_values("2010");
        assert_eq!(values[0], 10.0);
        assert!(values[1].is_nan());
        assert_eq!(values[2], 30.0);
        assert!(dataset.has_attribute("2010"));
        assert!(!dataset.has_attribute("2099"));
    }
}
