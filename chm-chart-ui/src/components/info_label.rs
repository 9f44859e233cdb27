//! Floating label for the hovered region.

use crate::state::AppState;
use dioxus::prelude::*;

/// Shows the expressed value, the attribute and the region name next to
/// the pointer. Renders nothing while no region is highlighted.
#[component]
pub fn InfoLabel() -> Element {
    let state = use_context::<AppState>();
    let viz = state.viz.read();
    let Some(label) = viz.as_ref().and_then(|v| v.label()) else {
        return rsx! {};
    };
    let position = match label.position {
        Some(p) => format!("left: {}px; top: {}px;", p.left, p.top),
        None => "visibility: hidden;".to_string(),
    };

    rsx! {
        div {
            class: "infolabel",
            id: "{label.id}",
            style: "position: fixed; pointer-events: none; {position}",
            h1 { "{label.value}" }
            b { "{label.attribute}" }
            div { class: "labelname", "{label.region}" }
        }
    }
}
