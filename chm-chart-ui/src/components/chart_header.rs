//! Page header with title and source note.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    pub title: String,
    /// Where the numbers come from; hidden when empty.
    #[props(default = String::new())]
    pub source_note: String,
}

#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    rsx! {
        div {
            class: "header",
            style: "margin-bottom: 8px;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "{props.title}"
            }
            if !props.source_note.is_empty() {
                p {
                    style: "margin: 0; font-size: 12px; color: #999;",
                    "{props.source_note}"
                }
            }
        }
    }
}
