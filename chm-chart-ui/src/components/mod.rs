//! Dioxus RSX components for the coordinated map and chart.

mod attribute_selector;
mod bar_chart;
mod chart_header;
mod choropleth_map;
mod error_display;
mod hover;
mod info_label;
mod loading_spinner;
mod transitions;

pub use attribute_selector::AttributeSelector;
pub use bar_chart::BarChart;
pub use chart_header::ChartHeader;
pub use choropleth_map::ChoroplethMap;
pub use error_display::ErrorDisplay;
pub use info_label::InfoLabel;
pub use loading_spinner::LoadingSpinner;
pub use transitions::start_transitions;
