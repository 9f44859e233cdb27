//! SVG path data for projected geometries.

use crate::projection::{ConicEqualArea, Piece};
use crate::LonLat;
use geojson::{Feature, Geometry, Position, Value};
use std::fmt::Write;

/// Radius of the circle drawn for point geometries.
const POINT_RADIUS: f64 = 4.5;

/// Generates SVG `d` attributes through a projection.
#[derive(Debug, Clone, Copy)]
pub struct PathGenerator<'a> {
    projection: &'a ConicEqualArea,
}

impl<'a> PathGenerator<'a> {
    pub fn new(projection: &'a ConicEqualArea) -> Self {
        Self { projection }
    }

    /// Path for an open polyline.
    pub fn line(&self, points: &[LonLat]) -> String {
        let mut d = String::new();
        self.write_pieces(&mut d, &self.projection.project_line(points, false));
        d
    }

    /// Path for a single ring (closed unless it crosses the cut meridian).
    pub fn ring(&self, points: &[LonLat]) -> String {
        let mut d = String::new();
        self.write_pieces(&mut d, &self.projection.project_line(points, true));
        d
    }

    pub fn geometry(&self, geometry: &Geometry) -> String {
        let mut d = String::new();
        self.write_value(&mut d, &geometry.value);
        d
    }

    /// Path for one feature; empty when it has no geometry.
    pub fn feature(&self, feature: &Feature) -> String {
        feature
            .geometry
            .as_ref()
            .map(|g| self.geometry(g))
            .unwrap_or_default()
    }

    /// One combined path for a whole collection.
    pub fn features(&self, features: &[Feature]) -> String {
        let mut d = String::new();
        for feature in features {
            if let Some(geometry) = &feature.geometry {
                self.write_value(&mut d, &geometry.value);
            }
        }
        d
    }

    fn write_value(&self, d: &mut String, value: &Value) {
        match value {
            Value::Point(p) => self.write_point(d, p),
            Value::MultiPoint(points) => points.iter().for_each(|p| self.write_point(d, p)),
            Value::LineString(line) => self.write_positions(d, line, false),
            Value::MultiLineString(lines) => {
                lines.iter().for_each(|l| self.write_positions(d, l, false))
            }
            Value::Polygon(rings) => rings.iter().for_each(|r| self.write_positions(d, r, true)),
            Value::MultiPolygon(polygons) => polygons
                .iter()
                .flatten()
                .for_each(|r| self.write_positions(d, r, true)),
            Value::GeometryCollection(members) => {
                members.iter().for_each(|g| self.write_value(d, &g.value))
            }
        }
    }

    fn write_positions(&self, d: &mut String, positions: &[Position], closed: bool) {
        let points: Vec<LonLat> = positions
            .iter()
            .filter(|p| p.len() >= 2)
            .map(|p| [p[0], p[1]])
            .collect();
        self.write_pieces(d, &self.projection.project_line(&points, closed));
    }

    fn write_pieces(&self, d: &mut String, pieces: &[Piece]) {
        for piece in pieces {
            for (i, [x, y]) in piece.points.iter().enumerate() {
                let cmd = if i == 0 { 'M' } else { 'L' };
                let _ = write!(d, "{}{},{}", cmd, coord(*x), coord(*y));
            }
            if piece.closed {
                d.push('Z');
            }
        }
    }

    fn write_point(&self, d: &mut String, position: &Position) {
        if position.len() < 2 {
            return;
        }
        let [x, y] = self.projection.project([position[0], position[1]]);
        let r = POINT_RADIUS;
        let _ = write!(
            d,
            "M{},{}m0,{}a{r},{r} 0 1,1 0,{}a{r},{r} 0 1,1 0,{}z",
            coord(x),
            coord(y),
            coord(r),
            coord(-2.0 * r),
            coord(2.0 * r),
            r = coord(r),
        );
    }
}

/// Round to hundredths and print without trailing zeros.
fn coord(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0 + 0.0;
    format!("{}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn albers() -> ConicEqualArea {
        ConicEqualArea::albers()
    }

    #[test]
    fn polygon_is_a_closed_subpath() {
        let projection = albers();
        let path = PathGenerator::new(&projection);
        let square = Geometry::new(Value::Polygon(vec![vec![
            vec![-100.0, 40.0],
            vec![-95.0, 40.0],
            vec![-95.0, 45.0],
            vec![-100.0, 45.0],
            vec![-100.0, 40.0],
        ]]));
        let d = path.geometry(&square);
        assert!(d.starts_with('M'));
        assert!(d.ends_with('Z'));
        assert_eq!(d.matches('L').count(), 4);
    }

    #[test]
    fn multipolygon_writes_one_subpath_per_ring() {
        let projection = albers();
        let path = PathGenerator::new(&projection);
        let ring = vec![
            vec![-100.0, 40.0],
            vec![-99.0, 40.0],
            vec![-99.0, 41.0],
            vec![-100.0, 40.0],
        ];
        let geometry = Geometry::new(Value::MultiPolygon(vec![vec![ring.clone()], vec![ring]]));
        assert_eq!(path.geometry(&geometry).matches('M').count(), 2);
    }

    #[test]
    fn feature_without_geometry_is_empty() {
        let projection = albers();
        let feature = Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: None,
            foreign_members: None,
        };
        assert_eq!(PathGenerator::new(&projection).feature(&feature), "");
    }

    #[test]
    fn point_draws_a_circle() {
        let projection = albers();
        let path = PathGenerator::new(&projection);
        let d = path.geometry(&Geometry::new(Value::Point(vec![-96.6, 38.7])));
        assert_eq!(d, "M480,250m0,4.5a4.5,4.5 0 1,1 0,-9a4.5,4.5 0 1,1 0,9z");
    }

    #[test]
    fn coordinates_are_rounded_to_hundredths() {
        assert_eq!(coord(12.3456), "12.35");
        assert_eq!(coord(-0.001), "0");
        assert_eq!(coord(480.0), "480");
    }
}
