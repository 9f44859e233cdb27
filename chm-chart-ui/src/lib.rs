//! Dioxus components and browser bridge for the choropleth map and bar chart.
//!
//! This crate provides:
//! - `js_bridge`: `fetch`, animation frames, the wall clock and element sizes
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: RSX for the selector, both SVG panels and the info label

pub mod components;
pub mod js_bridge;
pub mod state;
