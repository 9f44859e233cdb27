//! Attribute rows and region features.
//!
//! Both carry one `f64` per attribute name. NaN marks a value that was
//! present in the source but not numeric; an absent key marks a value that
//! was never joined. Accessors fold both cases into `None`.

use geojson::{Feature, Geometry, JsonObject};
use serde::Serialize;
use std::collections::BTreeMap;

/// One record of the tabular source, keyed by region name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeRow {
    pub name: String,
    /// Parsed value per attribute; NaN when the cell was missing or not numeric.
    pub values: BTreeMap<String, f64>,
}

impl AttributeRow {
    /// The parsed value, NaN included. NaN when the attribute is unknown.
    pub fn raw(&self, attribute: &str) -> f64 {
        self.values.get(attribute).copied().unwrap_or(f64::NAN)
    }

    /// The value when it is a number.
    pub fn value(&self, attribute: &str) -> Option<f64> {
        Some(self.raw(attribute)).filter(|v| !v.is_nan())
    }
}

/// A geographic boundary unit with its joined attribute values.
#[derive(Debug, Clone)]
pub struct RegionFeature {
    /// Source properties (geometry metadata plus `name`).
    pub properties: JsonObject,
    pub geometry: Option<Geometry>,
    /// Filled in by the joiner; empty for regions with no matching row.
    pub attributes: BTreeMap<String, f64>,
}

impl RegionFeature {
    /// The join key, from `properties.name`.
    pub fn name(&self) -> Option<&str> {
        self.properties.get("name").and_then(|v| v.as_str())
    }

    pub fn value(&self, attribute: &str) -> Option<f64> {
        self.attributes
            .get(attribute)
            .copied()
            .filter(|v| !v.is_nan())
    }

    pub fn is_joined(&self) -> bool {
        !self.attributes.is_empty()
    }
}

impl From<Feature> for RegionFeature {
    fn from(feature: Feature) -> Self {
        Self {
            properties: feature.properties.unwrap_or_default(),
            geometry: feature.geometry,
            attributes: BTreeMap::new(),
        }
    }
}
