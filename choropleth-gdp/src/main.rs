//! Real GDP per Capita by State
//!
//! A choropleth map of US states beside a sorted bar chart, both driven by
//! one expressed year. Hovering a state or its bar highlights both and shows
//! a floating label; picking another year recolors the map and re-sorts the
//! bars with animated transitions.
//!
//! Data flow:
//! 1. On mount, the attribute table and both topologies are fetched
//!    concurrently from `data/` next to the page.
//! 2. The rows are joined onto the state features and a `Viz` is built for
//!    the current window size.
//! 3. Components render straight from the `Viz`; the selector and pointer
//!    handlers mutate it through `AppState`.

use chm_chart_ui::components::{
    AttributeSelector, BarChart, ChartHeader, ChoroplethMap, ErrorDisplay, InfoLabel,
    LoadingSpinner,
};
use chm_chart_ui::js_bridge::{self, HttpFetch};
use chm_chart_ui::state::AppState;
use chm_data::loader::load_dataset;
use chm_viz::{Viz, VizConfig};
use dioxus::prelude::*;

const STYLE: &str = r#"
body { background: #222; color: #eee; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; }
.panels { display: flex; align-items: flex-start; }
.gratBackground { fill: #3a4a5a; }
.gratLines { fill: none; stroke: #999; stroke-width: 1px; stroke-opacity: 0.4; }
.countries { fill: #555; stroke: #222; stroke-width: 0.5px; }
.chartBackground { fill: #333; }
.chartFrame { fill: none; stroke: #ccc; stroke-width: 2px; }
.chartTitle { fill: white; font-size: 1.4em; font-weight: bold; }
.axis line { stroke: #ccc; }
.axis text { fill: #ccc; font-size: 0.8em; }
.infolabel { background: rgba(255, 255, 255, 0.85); color: #222; padding: 4px 8px; border-radius: 4px; box-shadow: 2px 2px 4px #000; }
.infolabel h1 { margin: 0; font-size: 1.2em; }
.labelname { font-style: italic; }
"#;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("choropleth-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // Load all three sources once on mount
    use_effect(move || {
        spawn(async move {
            let config = VizConfig::default();
            let dataset =
                match load_dataset(&HttpFetch, &config.sources, &config.attributes).await {
                    Ok(dataset) => dataset,
                    Err(e) => {
                        log::error!("[CHM] load failed: {:#}", e);
                        state.error_msg.set(Some(format!("{:#}", e)));
                        state.loading.set(false);
                        return;
                    }
                };
            match Viz::new(config, dataset, js_bridge::viewport()) {
                Ok(viz) => {
                    state.clock.set(js_bridge::now_ms());
                    state.viz.set(Some(viz));
                }
                Err(e) => {
                    log::error!("[CHM] view setup failed: {:#}", e);
                    state.error_msg.set(Some(format!("{:#}", e)));
                }
            }
            state.loading.set(false);
        });
    });

    rsx! {
        style { "{STYLE}" }
        div {
            style: "padding: 16px;",

            ChartHeader {
                title: "Real GDP per Capita by State".to_string(),
                source_note: "Chained 2009 dollars. Source: U.S. Bureau of Economic Analysis".to_string(),
            }

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay { message: err }
            } else if (state.loading)() {
                LoadingSpinner {}
            } else {
                AttributeSelector {}
                div {
                    class: "panels",
                    ChoroplethMap {}
                    BarChart {}
                }
                InfoLabel {}
            }
        }
    }
}
