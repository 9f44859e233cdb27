//! Geographic plumbing for the choropleth map.
//!
//! # Pipeline
//!
//! 1. [`topojson::Topology`] decodes a (optionally quantized) TopoJSON
//!    document and converts named objects into `geojson::Feature`s.
//! 2. [`projection::ConicEqualArea`] projects longitude/latitude onto the
//!    screen, cutting lines and rings at the rotated antimeridian.
//! 3. [`path::PathGenerator`] turns projected geometries into SVG path data.
//! 4. [`graticule::Graticule`] generates the reference grid drawn underneath.
//!
//! # Example
//!
//! ```rust
//! use chm_geo::{projection::ConicEqualArea, path::PathGenerator};
//!
//! let albers = ConicEqualArea::albers();
//! let path = PathGenerator::new(&albers);
//! let d = path.line(&[[-100.0, 40.0], [-90.0, 40.0]]);
//! assert!(d.starts_with('M'));
//! ```

pub mod graticule;
pub mod path;
pub mod projection;
pub mod topojson;

/// A longitude/latitude pair in degrees.
pub type LonLat = [f64; 2];
