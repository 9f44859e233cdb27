//! The map panel: graticule, country outlines and one path per region.

use super::hover;
use crate::state::AppState;
use chm_viz::interaction::ElementId;
use dioxus::prelude::*;

#[derive(Clone, PartialEq)]
struct RegionView {
    name: String,
    class: String,
    d: String,
    style: String,
}

#[component]
pub fn ChoroplethMap() -> Element {
    let state = use_context::<AppState>();
    let now = (state.clock)();
    let viz = state.viz.read();
    let Some(viz) = viz.as_ref() else {
        return rsx! {};
    };
    let map = viz.map();
    let regions: Vec<RegionView> = map
        .regions
        .iter()
        .map(|shape| {
            let stroke = viz
                .stroke(&ElementId::Region(shape.name.clone()))
                .cloned()
                .unwrap_or_else(|| viz.config().map.region_stroke.clone());
            RegionView {
                name: shape.name.clone(),
                class: format!("states {}", shape.class),
                d: shape.d.clone(),
                style: format!(
                    "fill: {}; stroke: {}; stroke-width: {};",
                    viz.region_fill(shape, now),
                    stroke.stroke,
                    stroke.stroke_width
                ),
            }
        })
        .collect();

    rsx! {
        svg {
            class: "map",
            width: "{map.width}",
            height: "{map.height}",
            path { class: "gratBackground", d: "{map.graticule_background}" }
            path { class: "gratLines", d: "{map.graticule_lines}" }
            path { class: "countries", d: "{map.countries}" }
            for region in regions {
                path {
                    key: "{region.name}",
                    class: "{region.class}",
                    d: "{region.d}",
                    style: "{region.style}",
                    onmouseenter: {
                        let name = region.name.clone();
                        move |_| hover::enter(state, &name)
                    },
                    onmouseleave: {
                        let name = region.name.clone();
                        move |_| hover::leave(state, &name)
                    },
                    onmousemove: move |evt| hover::moved(state, evt),
                }
            }
        }
    }
}
