//! Conic equal-area (Albers) projection.
//!
//! Points are rotated about the polar axis, projected with the raw conic
//! formulas, then scaled and translated so the configured center lands on
//! the translate point. Screen y grows downward.

use crate::LonLat;
use std::f64::consts::PI;

const RADIANS: f64 = PI / 180.0;
/// Distance kept from the cut meridian when splitting crossings.
const EDGE_EPSILON: f64 = 1e-6;

/// A projected polyline piece. `closed` pieces are whole rings that never
/// touched the cut meridian.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub points: Vec<[f64; 2]>,
    pub closed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConicEqualArea {
    n: f64,
    c: f64,
    rho0: f64,
    rotate: f64,
    scale: f64,
    translate: [f64; 2],
    center: LonLat,
    dx: f64,
    dy: f64,
}

impl ConicEqualArea {
    /// Projection with standard parallels `parallels` (degrees), otherwise
    /// unrotated, scale 150, translate (480, 250).
    pub fn new(parallels: [f64; 2]) -> Self {
        let sin0 = (parallels[0] * RADIANS).sin();
        let n = (sin0 + (parallels[1] * RADIANS).sin()) / 2.0;
        let c = 1.0 + sin0 * (2.0 * n - sin0);
        let rho0 = c.sqrt() / n;
        let mut projection = Self {
            n,
            c,
            rho0,
            rotate: 0.0,
            scale: 150.0,
            translate: [480.0, 250.0],
            center: [0.0, 0.0],
            dx: 0.0,
            dy: 0.0,
        };
        projection.reset();
        projection
    }

    /// The US-centered Albers preset: parallels 29.5°/45.5°, rotated 96°,
    /// centered on (-0.6°, 38.7°), scale 1070.
    pub fn albers() -> Self {
        Self::new([29.5, 45.5])
            .rotate(96.0)
            .center([-0.6, 38.7])
            .scale(1070.0)
    }

    /// Longitude rotation in degrees (added to every longitude).
    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = degrees;
        self.reset();
        self
    }

    /// Center in degrees, expressed in the rotated frame.
    pub fn center(mut self, center: LonLat) -> Self {
        self.center = center;
        self.reset();
        self
    }

    pub fn scale(mut self, k: f64) -> Self {
        self.scale = k;
        self.reset();
        self
    }

    pub fn translate(mut self, t: [f64; 2]) -> Self {
        self.translate = t;
        self.reset();
        self
    }

    /// Longitude (degrees, unrotated) that projects onto the vertical axis.
    pub fn central_meridian(&self) -> f64 {
        -self.rotate
    }

    fn reset(&mut self) {
        let [cx, cy] = self.raw(self.center[0] * RADIANS, self.center[1] * RADIANS);
        self.dx = self.translate[0] - cx * self.scale;
        self.dy = self.translate[1] + cy * self.scale;
    }

    fn raw(&self, lambda: f64, phi: f64) -> [f64; 2] {
        let rho = (self.c - 2.0 * self.n * phi.sin()).max(0.0).sqrt() / self.n;
        let a = lambda * self.n;
        [rho * a.sin(), self.rho0 - rho * a.cos()]
    }

    /// Rotated longitude in radians, wrapped to `[-π, π]`.
    fn rotated_lambda(&self, lon: f64) -> f64 {
        let mut lambda = (lon + self.rotate) * RADIANS;
        if lambda > PI {
            lambda -= 2.0 * PI;
        } else if lambda < -PI {
            lambda += 2.0 * PI;
        }
        lambda
    }

    fn project_rotated(&self, lambda: f64, phi: f64) -> [f64; 2] {
        let [x, y] = self.raw(lambda, phi);
        [x * self.scale + self.dx, self.dy - y * self.scale]
    }

    /// Project a single longitude/latitude (degrees) to screen coordinates.
    pub fn project(&self, point: LonLat) -> [f64; 2] {
        self.project_rotated(self.rotated_lambda(point[0]), point[1] * RADIANS)
    }

    /// Project a polyline (or a ring when `closed`), cutting it wherever it
    /// crosses the rotated antimeridian. A ring that crosses is returned as
    /// open pieces whose endpoints lie on the cut.
    pub fn project_line(&self, points: &[LonLat], closed: bool) -> Vec<Piece> {
        if points.is_empty() {
            return Vec::new();
        }
        let rotated: Vec<(f64, f64)> = points
            .iter()
            .map(|p| (self.rotated_lambda(p[0]), p[1] * RADIANS))
            .collect();

        let mut pieces: Vec<Vec<[f64; 2]>> = Vec::new();
        let mut current = vec![self.project_rotated(rotated[0].0, rotated[0].1)];
        let mut crossed = false;

        for pair in rotated.windows(2) {
            let (l0, p0) = pair[0];
            let (l1, p1) = pair[1];
            if (l1 - l0).abs() > PI {
                crossed = true;
                let side = if l0 > 0.0 { 1.0 } else { -1.0 };
                // Unwrap the far point onto the near side to interpolate.
                let l1_unwrapped = l1 + side * 2.0 * PI;
                let edge = side * PI;
                let t = (edge - l0) / (l1_unwrapped - l0);
                let phi_cut = p0 + (p1 - p0) * t;
                current.push(self.project_rotated(side * (PI - EDGE_EPSILON), phi_cut));
                pieces.push(std::mem::take(&mut current));
                current.push(self.project_rotated(-side * (PI - EDGE_EPSILON), phi_cut));
            }
            current.push(self.project_rotated(l1, p1));
        }
        pieces.push(current);

        if closed && !crossed {
            return pieces
                .into_iter()
                .map(|points| Piece { points, closed: true })
                .collect();
        }
        if closed && pieces.len() > 1 {
            // The ring's first and last pieces are one run across its start.
            let mut tail = pieces.pop().unwrap_or_default();
            let head = pieces.remove(0);
            tail.extend(head.into_iter().skip(1));
            pieces.push(tail);
        }
        pieces
            .into_iter()
            .filter(|p| p.len() >= 2)
            .map(|points| Piece {
                points,
                closed: false,
            })
            .collect()
    }
}
