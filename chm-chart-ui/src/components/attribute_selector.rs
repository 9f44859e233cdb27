//! Dropdown for choosing the expressed attribute.

use super::start_transitions;
use crate::js_bridge;
use crate::state::AppState;
use dioxus::prelude::*;

/// Attribute dropdown. Lists a disabled placeholder followed by every
/// configured attribute; a change re-expresses the whole view.
#[component]
pub fn AttributeSelector() -> Element {
    let mut state = use_context::<AppState>();
    let (attributes, expressed) = match state.viz.read().as_ref() {
        Some(viz) => (viz.config().attributes.clone(), viz.expressed().to_string()),
        None => (Vec::new(), String::new()),
    };

    let on_change = move |evt: Event<FormData>| {
        let value = evt.value();
        let now = js_bridge::now_ms();
        let result = state
            .viz
            .write()
            .as_mut()
            .map(|viz| viz.change_attribute(&value, now));
        match result {
            Some(Ok(true)) => start_transitions(state),
            Some(Ok(false)) | None => {}
            Some(Err(e)) => log::warn!("[CHM] ignoring selection: {:#}", e),
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            select {
                class: "dropdown",
                id: "attribute-select",
                onchange: on_change,
                option {
                    class: "titleOption",
                    disabled: true,
                    "Select Attribute"
                }
                for attribute in attributes.iter() {
                    option {
                        value: "{attribute}",
                        selected: *attribute == expressed,
                        "{attribute}"
                    }
                }
            }
        }
    }
}
