//! View model for the coordinated choropleth map and bar chart.
//!
//! Everything here is plain data so it runs natively as well as in the
//! browser. The UI crate only turns [`controller::Viz`] into elements and
//! forwards pointer and selector events back into it.
//!
//! # Architecture
//!
//! - [`config`] holds every tunable constant
//! - [`selection`] tracks the expressed attribute
//! - [`scales`] builds the fixed bar scale and the per-attribute color scale
//! - [`map`] and [`chart`] lay out the two panels
//! - [`interaction`] owns hover highlighting and the info label
//! - [`anim`] interpolates transitions between layouts
//! - [`controller`] wires the pieces together
//! - [`svg`] writes a static snapshot

pub mod anim;
pub mod chart;
pub mod config;
pub mod controller;
pub mod interaction;
pub mod layout;
pub mod map;
pub mod scales;
pub mod selection;
pub mod svg;

pub use config::VizConfig;
pub use controller::Viz;
pub use layout::Viewport;
