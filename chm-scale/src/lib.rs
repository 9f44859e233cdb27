//! Scales for mapping attribute values onto pixels and colors.
//!
//! This crate provides:
//! - `linear`: continuous value → pixel mapping, tick generation and tick labels
//! - `quantile`: equal-count bucketing of a value distribution onto a discrete range
//! - `color`: RGB parsing/interpolation and the palette-backed `ColorScale`

pub mod color;
pub mod linear;
pub mod quantile;

pub use color::{ColorScale, Rgb};
pub use linear::LinearScale;
pub use quantile::QuantileScale;
