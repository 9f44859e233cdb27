//! The chart panel: sorted bars, the value axis, title and frame.

use super::hover;
use crate::state::AppState;
use chm_viz::interaction::ElementId;
use dioxus::prelude::*;

#[derive(Clone, PartialEq)]
struct BarView {
    name: String,
    class: String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    style: String,
}

#[component]
pub fn BarChart() -> Element {
    let state = use_context::<AppState>();
    let now = (state.clock)();
    let viz = state.viz.read();
    let Some(viz) = viz.as_ref() else {
        return rsx! {};
    };
    let chart = viz.chart();
    let frame = chart.frame;
    let translate = frame.translate();
    let [title_x, title_y] = chart.title_position;
    let bars: Vec<BarView> = chart
        .bars
        .iter()
        .map(|bar| {
            let shown = viz.bar_frame(bar, now);
            let stroke = viz
                .stroke(&ElementId::Bar(bar.name.clone()))
                .cloned()
                .unwrap_or_else(|| viz.config().chart.bar_stroke.clone());
            BarView {
                name: bar.name.clone(),
                class: format!("bar {}", bar.class),
                x: shown.x,
                y: shown.y,
                width: shown.width,
                height: shown.height,
                style: format!(
                    "fill: {}; stroke: {}; stroke-width: {};",
                    shown.fill, stroke.stroke, stroke.stroke_width
                ),
            }
        })
        .collect();

    rsx! {
        svg {
            class: "chart",
            width: "{frame.width}",
            height: "{frame.height}",
            rect {
                class: "chartBackground",
                width: "{frame.inner_width}",
                height: "{frame.inner_height}",
                transform: "{translate}",
            }
            for bar in bars {
                rect {
                    key: "{bar.name}",
                    class: "{bar.class}",
                    x: "{bar.x}",
                    y: "{bar.y}",
                    width: "{bar.width}",
                    height: "{bar.height}",
                    style: "{bar.style}",
                    onmouseenter: {
                        let name = bar.name.clone();
                        move |_| hover::enter(state, &name)
                    },
                    onmouseleave: {
                        let name = bar.name.clone();
                        move |_| hover::leave(state, &name)
                    },
                    onmousemove: move |evt| hover::moved(state, evt),
                }
            }
            text {
                class: "chartTitle",
                x: "{title_x}",
                y: "{title_y}",
                "{chart.title}"
            }
            g {
                class: "axis",
                transform: "{translate}",
                for tick in chart.ticks.iter() {
                    g {
                        key: "{tick.value}",
                        class: "tick",
                        transform: "translate(0,{tick.y})",
                        line { x2: "-6" }
                        text {
                            x: "-9",
                            dy: ".32em",
                            text_anchor: "end",
                            "{tick.label}"
                        }
                    }
                }
            }
            rect {
                class: "chartFrame",
                width: "{frame.inner_width}",
                height: "{frame.inner_height}",
                transform: "{translate}",
            }
        }
    }
}
