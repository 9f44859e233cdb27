//! Static SVG rendering of the map and chart.

use crate::source::SourceFetch;
use anyhow::Context;
use chm_data::loader::{load_dataset, DataSources};
use chm_viz::svg::render_document;
use chm_viz::{Viewport, Viz, VizConfig};
use log::info;

/// Height handed to the layout; both panels use fixed heights from config.
const VIEWPORT_HEIGHT: f64 = 800.0;

/// Load `sources`, express `attribute` and build the view.
pub async fn build_viz(
    mut config: VizConfig,
    sources: DataSources,
    attribute: Option<&str>,
    viewport_width: f64,
) -> anyhow::Result<Viz> {
    if let Some(attribute) = attribute {
        if !config.is_attribute(attribute) {
            anyhow::bail!(
                "unknown attribute {:?}; expected one of {:?}",
                attribute,
                config.attributes
            );
        }
        config.initial_attribute = attribute.to_string();
    }
    config.sources = sources;
    let dataset = load_dataset(&SourceFetch::new(), &config.sources, &config.attributes).await?;
    info!(
        "Joined {} rows onto {} regions ({} rows unmatched)",
        dataset.join.matched_rows,
        dataset.regions.len(),
        dataset.join.unmatched_rows.len()
    );
    Viz::new(config, dataset, Viewport::new(viewport_width, VIEWPORT_HEIGHT))
}

pub async fn run_render(
    config: VizConfig,
    sources: DataSources,
    attribute: Option<&str>,
    viewport_width: f64,
    out: &str,
) -> anyhow::Result<()> {
    let viz = build_viz(config, sources, attribute, viewport_width).await?;
    let svg = render_document(&viz).context("failed to format SVG")?;
    tokio::fs::write(out, svg)
        .await
        .with_context(|| format!("failed to write {}", out))?;
    info!("Rendered {} to {}", viz.expressed(), out);
    Ok(())
}
