//! Frame loop that advances the clock while tweens are in flight.

use crate::js_bridge;
use crate::state::AppState;
use dioxus::prelude::*;

/// Drive `state.clock` on every animation frame until the timeline settles.
/// A loop that is already running picks up newly scheduled tweens itself.
pub fn start_transitions(mut state: AppState) {
    if *state.animating.peek() {
        return;
    }
    state.animating.set(true);
    spawn(async move {
        let now = loop {
            let now = js_bridge::next_frame().await;
            state.clock.set(now);
            let running = state
                .viz
                .peek()
                .as_ref()
                .is_some_and(|viz| viz.is_animating(now));
            if !running {
                break now;
            }
        };
        if let Some(viz) = state.viz.write().as_mut() {
            viz.settle(now);
        }
        log::info!("[CHM] transitions settled");
        state.animating.set(false);
    });
}
