//! Pointer handlers shared by region paths and bars.

use crate::js_bridge;
use crate::state::AppState;
use dioxus::prelude::*;

/// Width assumed for a label that has not been laid out yet.
const DEFAULT_LABEL_WIDTH: f64 = 160.0;

pub(crate) fn enter(mut state: AppState, name: &str) {
    if let Some(viz) = state.viz.write().as_mut() {
        viz.pointer_enter(name);
    }
}

pub(crate) fn leave(mut state: AppState, name: &str) {
    if let Some(viz) = state.viz.write().as_mut() {
        viz.pointer_leave(name);
    }
}

pub(crate) fn moved(mut state: AppState, evt: Event<MouseData>) {
    let point = evt.client_coordinates();
    let label_id = state
        .viz
        .peek()
        .as_ref()
        .and_then(|viz| viz.label().map(|l| l.id.clone()));
    let Some(label_id) = label_id else {
        return;
    };
    let label_width = js_bridge::element_width(&label_id).unwrap_or(DEFAULT_LABEL_WIDTH);
    let viewport_width = js_bridge::viewport().width;
    if let Some(viz) = state.viz.write().as_mut() {
        viz.pointer_move([point.x, point.y], label_width, viewport_width);
    }
}
