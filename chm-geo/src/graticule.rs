//! Meridian/parallel reference grid.
//!
//! Major lines span the full globe (meridians every 90°, the equator); minor
//! lines are drawn every `step` degrees between ±80° latitude, skipping those
//! that coincide with a major line. Every line is densified every
//! `PRECISION` degrees so it curves correctly once projected.

use crate::LonLat;

const EPSILON: f64 = 1e-6;
const PRECISION: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Graticule {
    major_extent: [[f64; 2]; 2],
    minor_extent: [[f64; 2]; 2],
    major_step: [f64; 2],
    minor_step: [f64; 2],
}

impl Default for Graticule {
    fn default() -> Self {
        Self {
            major_extent: [[-180.0, -90.0 + EPSILON], [180.0, 90.0 - EPSILON]],
            minor_extent: [[-180.0, -80.0 - EPSILON], [180.0, 80.0 + EPSILON]],
            major_step: [90.0, 360.0],
            minor_step: [10.0, 10.0],
        }
    }
}

impl Graticule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spacing of the minor grid in degrees of longitude and latitude.
    pub fn step(mut self, step: [f64; 2]) -> Self {
        self.minor_step = step;
        self
    }

    /// All grid lines as densified longitude/latitude polylines.
    pub fn lines(&self) -> Vec<Vec<LonLat>> {
        let [[big_x0, big_y0], [big_x1, big_y1]] = self.major_extent;
        let [[x0, y0], [x1, y1]] = self.minor_extent;
        let [big_dx, big_dy] = self.major_step;
        let [dx, dy] = self.minor_step;

        let mut lines = Vec::new();
        for x in stepped((big_x0 / big_dx).ceil() * big_dx, big_x1, big_dx) {
            lines.push(self.meridian(x, big_y0, big_y1));
        }
        for y in stepped((big_y0 / big_dy).ceil() * big_dy, big_y1, big_dy) {
            lines.push(self.parallel(y, big_x0, big_x1));
        }
        for x in stepped((x0 / dx).ceil() * dx, x1, dx) {
            if (x % big_dx).abs() > EPSILON {
                lines.push(self.meridian(x, y0, y1));
            }
        }
        for y in stepped((y0 / dy).ceil() * dy, y1, dy) {
            if (y % big_dy).abs() > EPSILON {
                lines.push(self.parallel(y, x0, x1));
            }
        }
        lines
    }

    /// Closed ring around the whole globe, centered on `central_meridian`.
    ///
    /// Centering keeps the two bounding meridians just inside the projection's
    /// cut so the outline projects as a single filled shape.
    pub fn outline_centered(&self, central_meridian: f64) -> Vec<LonLat> {
        let [[_, y0], [_, y1]] = self.major_extent;
        let west = central_meridian - 180.0 + EPSILON;
        let east = central_meridian + 180.0 - EPSILON;

        let mut ring = self.meridian(west, y0, y1);
        ring.extend(self.parallel(y1, west, east).into_iter().skip(1));
        let mut down = self.meridian(east, y0, y1);
        down.reverse();
        ring.extend(down.into_iter().skip(1));
        let mut back = self.parallel(y0, west, east);
        back.reverse();
        ring.extend(back.into_iter().skip(1));
        ring
    }

    fn meridian(&self, x: f64, y0: f64, y1: f64) -> Vec<LonLat> {
        let mut line: Vec<LonLat> = stepped(y0, y1 - EPSILON, PRECISION)
            .map(|y| [x, y])
            .collect();
        line.push([x, y1]);
        line
    }

    fn parallel(&self, y: f64, x0: f64, x1: f64) -> Vec<LonLat> {
        let mut line: Vec<LonLat> = stepped(x0, x1 - EPSILON, PRECISION)
            .map(|x| [x, y])
            .collect();
        line.push([x1, y]);
        line
    }
}

/// `start, start + step, ...` strictly below `stop`.
fn stepped(start: f64, stop: f64, step: f64) -> impl Iterator<Item = f64> {
    let count = if step > 0.0 && stop > start {
        ((stop - start) / step).ceil() as usize
    } else {
        0
    };
    (0..count).map(move |i| start + step * i as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_degree_grid_line_count() {
        let lines = Graticule::new().step([5.0, 5.0]).lines();
        // 4 major meridians + equator + 68 minor meridians + 32 minor parallels
        assert_eq!(lines.len(), 4 + 1 + 68 + 32);
    }

    #[test]
    fn default_grid_line_count() {
        let lines = Graticule::new().lines();
        // 4 major meridians + equator + 32 minor meridians + 16 minor parallels
        assert_eq!(lines.len(), 4 + 1 + 32 + 16);
    }

    #[test]
    fn lines_are_densified_and_end_on_extent() {
        let lines = Graticule::new().step([5.0, 5.0]).lines();
        let meridian = &lines[0];
        assert_eq!(meridian[0][0], -180.0);
        assert!(meridian.len() > 60);
        assert!((meridian.last().unwrap()[1] - 90.0).abs() < 1e-3);
    }

    #[test]
    fn outline_is_closed_around_center() {
        let ring = Graticule::new().outline_centered(-96.0);
        let first = ring[0];
        let last = *ring.last().unwrap();
        assert!((first[0] - last[0]).abs() < 1e-9 && (first[1] - last[1]).abs() < 1e-9);
        assert!(ring.iter().all(|p| p[0] > -276.0 && p[0] < 84.0));
    }

    #[test]
    fn stepped_excludes_stop() {
        let v: Vec<f64> = stepped(0.0, 10.0, 5.0).collect();
        assert_eq!(v, vec![0.0, 5.0]);
        assert_eq!(stepped(0.0, 0.0, 1.0).count(), 0);
    }
}
