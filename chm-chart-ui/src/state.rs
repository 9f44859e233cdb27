//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use chm_viz::Viz;
use dioxus::prelude::*;

/// Shared application state for the choropleth app.
#[derive(Clone, Copy)]
pub struct AppState {
    /// The coordinated view (None until the data is loaded)
    pub viz: Signal<Option<Viz>>,
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Clock time of the last animation frame, in ms
    pub clock: Signal<f64>,
    /// Whether a frame loop is currently driving `clock`
    pub animating: Signal<bool>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            viz: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            clock: Signal::new(0.0),
            animating: Signal::new(false),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
