//! TopoJSON topology decoding.
//!
//! A topology stores shared line work once in `arcs`; geometries refer to
//! arcs by index, with a negative index `!i` meaning arc `i` reversed. When a
//! `transform` is present the arcs are quantized and delta-encoded: each
//! position is an integer offset from the previous one, and absolute
//! coordinates are recovered as `q * scale + translate`.

use anyhow::{anyhow, Context};
use geojson::{feature::Id, Feature, Geometry, JsonObject, Position, Value};
use serde::Deserialize;
use std::collections::HashMap;

/// Quantization transform of a topology.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

impl Transform {
    fn apply(&self, x: f64, y: f64) -> Position {
        vec![
            x * self.scale[0] + self.translate[0],
            y * self.scale[1] + self.translate[1],
        ]
    }
}

/// One named object (or nested geometry) in a topology.
///
/// Shape-specific members (`arcs`, `coordinates`) are kept as raw JSON and
/// interpreted according to `kind` at conversion time.
#[derive(Debug, Clone, Deserialize)]
pub struct TopoObject {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub arcs: serde_json::Value,
    #[serde(default)]
    pub coordinates: serde_json::Value,
    #[serde(default)]
    pub geometries: Vec<TopoObject>,
    #[serde(default)]
    pub properties: Option<JsonObject>,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Topology {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub transform: Option<Transform>,
    #[serde(default)]
    pub arcs: Vec<Vec<Vec<f64>>>,
    #[serde(default)]
    pub objects: HashMap<String, TopoObject>,
}

impl Topology {
    /// Parse a TopoJSON document.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let topology: Topology =
            serde_json::from_str(text).context("failed to parse TopoJSON document")?;
        if topology.kind != "Topology" {
            anyhow::bail!("expected a Topology, found type {:?}", topology.kind);
        }
        log::debug!(
            "[CHM] topology: {} arcs, objects {:?}",
            topology.arcs.len(),
            topology.object_names()
        );
        Ok(topology)
    }

    pub fn object_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.objects.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Convert a named object into features: one per member of a
    /// `GeometryCollection`, otherwise a single feature.
    pub fn features(&self, object: &str) -> anyhow::Result<Vec<Feature>> {
        let obj = self.objects.get(object).ok_or_else(|| {
            anyhow!(
                "topology has no object {:?} (available: {:?})",
                object,
                self.object_names()
            )
        })?;
        let decoder = Decoder::new(self);
        if obj.kind.as_deref() == Some("GeometryCollection") {
            obj.geometries
                .iter()
                .map(|g| decoder.feature(g))
                .collect::<anyhow::Result<Vec<_>>>()
                .with_context(|| format!("failed to decode object {:?}", object))
        } else {
            Ok(vec![decoder
                .feature(obj)
                .with_context(|| format!("failed to decode object {:?}", object))?])
        }
    }
}

/// Absolute arc coordinates plus the transform for quantized points.
struct Decoder {
    arcs: Vec<Vec<Position>>,
    transform: Option<Transform>,
}

impl Decoder {
    fn new(topology: &Topology) -> Self {
        let transform = topology.transform;
        let arcs = topology
            .arcs
            .iter()
            .map(|arc| {
                let (mut x, mut y) = (0.0, 0.0);
                arc.iter()
                    .filter(|p| p.len() >= 2)
                    .map(|p| match transform {
                        Some(t) => {
                            x += p[0];
                            y += p[1];
                            t.apply(x, y)
                        }
                        None => vec![p[0], p[1]],
                    })
                    .collect()
            })
            .collect();
        Self { arcs, transform }
    }

    fn point(&self, coords: &[f64]) -> anyhow::Result<Position> {
        if coords.len() < 2 {
            anyhow::bail!("point needs two coordinates, got {:?}", coords);
        }
        Ok(match self.transform {
            Some(t) => t.apply(coords[0], coords[1]),
            None => vec![coords[0], coords[1]],
        })
    }

    /// Append arc `index` to `out`, dropping the shared joint.
    fn push_arc(&self, index: i64, out: &mut Vec<Position>) -> anyhow::Result<()> {
        let (i, reversed) = if index < 0 {
            ((!index) as usize, true)
        } else {
            (index as usize, false)
        };
        let arc = self
            .arcs
            .get(i)
            .ok_or_else(|| anyhow!("arc index {} out of bounds ({} arcs)", index, self.arcs.len()))?;
        out.pop();
        if reversed {
            out.extend(arc.iter().rev().cloned());
        } else {
            out.extend(arc.iter().cloned());
        }
        Ok(())
    }

    fn line(&self, arcs: &[i64]) -> anyhow::Result<Vec<Position>> {
        let mut points = Vec::new();
        for &index in arcs {
            self.push_arc(index, &mut points)?;
        }
        if points.len() == 1 {
            points.push(points[0].clone());
        }
        Ok(points)
    }

    fn ring(&self, arcs: &[i64]) -> anyhow::Result<Vec<Position>> {
        let mut points = self.line(arcs)?;
        while !points.is_empty() && points.len() < 4 {
            points.push(points[0].clone());
        }
        Ok(points)
    }

    fn geometry(&self, obj: &TopoObject) -> anyhow::Result<Option<Geometry>> {
        let Some(kind) = obj.kind.as_deref() else {
            return Ok(None);
        };
        let value = match kind {
            "Point" => Value::Point(self.point(&field::<Vec<f64>>(&obj.coordinates)?)?),
            "MultiPoint" => Value::MultiPoint(
                field::<Vec<Vec<f64>>>(&obj.coordinates)?
                    .iter()
                    .map(|p| self.point(p))
                    .collect::<anyhow::Result<_>>()?,
            ),
            "LineString" => Value::LineString(self.line(&field::<Vec<i64>>(&obj.arcs)?)?),
            "MultiLineString" => Value::MultiLineString(
                field::<Vec<Vec<i64>>>(&obj.arcs)?
                    .iter()
                    .map(|l| self.line(l))
                    .collect::<anyhow::Result<_>>()?,
            ),
            "Polygon" => Value::Polygon(
                field::<Vec<Vec<i64>>>(&obj.arcs)?
                    .iter()
                    .map(|r| self.ring(r))
                    .collect::<anyhow::Result<_>>()?,
            ),
            "MultiPolygon" => Value::MultiPolygon(
                field::<Vec<Vec<Vec<i64>>>>(&obj.arcs)?
                    .iter()
                    .map(|polygon| {
                        polygon
                            .iter()
                            .map(|r| self.ring(r))
                            .collect::<anyhow::Result<Vec<_>>>()
                    })
                    .collect::<anyhow::Result<_>>()?,
            ),
            "GeometryCollection" => {
                let mut members = Vec::with_capacity(obj.geometries.len());
                for g in &obj.geometries {
                    if let Some(geometry) = self.geometry(g)? {
                        members.push(geometry);
                    }
                }
                Value::GeometryCollection(members)
            }
            other => anyhow::bail!("unsupported TopoJSON geometry type {:?}", other),
        };
        Ok(Some(Geometry::new(value)))
    }

    fn feature(&self, obj: &TopoObject) -> anyhow::Result<Feature> {
        Ok(Feature {
            bbox: None,
            geometry: self.geometry(obj)?,
            id: obj.id.as_ref().and_then(feature_id),
            properties: Some(obj.properties.clone().unwrap_or_default()),
            foreign_members: None,
        })
    }
}

fn field<T: serde::de::DeserializeOwned>(raw: &serde_json::Value) -> anyhow::Result<T> {
    serde_json::from_value(raw.clone()).context("malformed TopoJSON geometry member")
}

fn feature_id(raw: &serde_json::Value) -> Option<Id> {
    match raw {
        serde_json::Value::String(s) => Some(Id::String(s.clone())),
        serde_json::Value::Number(n) => Some(Id::Number(n.clone())),
        _ => None,
    }
}
