//! Command implementations for the choropleth CLI.
//!
//! Provides subcommands for rendering a static SVG snapshot of the map and
//! chart, and for summarizing the attribute table.

use anyhow::Context;
use chm_viz::VizConfig;
use clap::Subcommand;

pub mod render;
pub mod source;
pub mod summary;

#[derive(Subcommand)]
pub enum Command {
    /// Render the map beside the bar chart for one attribute as SVG
    Render {
        /// Attribute table (CSV with a `name` column); path or http(s) URL
        #[arg(short = 't', long)]
        table: Option<String>,

        /// World/country TopoJSON; path or http(s) URL
        #[arg(short = 'w', long)]
        world: Option<String>,

        /// Region TopoJSON; path or http(s) URL
        #[arg(short = 'r', long)]
        regions: Option<String>,

        /// Object to read from the world topology
        #[arg(long)]
        world_object: Option<String>,

        /// Object to read from the region topology
        #[arg(long)]
        region_object: Option<String>,

        /// Attribute to express (defaults to the configured initial one)
        #[arg(short = 'a', long)]
        attribute: Option<String>,

        /// Viewport width the panel sizes are derived from
        #[arg(long, default_value_t = 1280.0)]
        viewport_width: f64,

        /// Output SVG path
        #[arg(short = 'o', long)]
        out: String,
    },

    /// Print per-attribute counts, quantile breaks and top regions as CSV
    Summary {
        /// Attribute table (CSV with a `name` column); path or http(s) URL
        #[arg(short = 't', long)]
        table: Option<String>,

        /// Only summarize this attribute
        #[arg(short = 'a', long)]
        attribute: Option<String>,

        /// How many top regions to list per attribute
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
}

/// Defaults, overridden by the JSON file at `path` when given.
pub async fn load_config(path: Option<&str>) -> anyhow::Result<VizConfig> {
    let Some(path) = path else {
        return Ok(VizConfig::default());
    };
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read config {}", path))?;
    VizConfig::from_json(&text).with_context(|| format!("invalid config {}", path))
}

pub async fn run(command: Command, config: Option<String>) -> anyhow::Result<()> {
    let config = load_config(config.as_deref()).await?;
    match command {
        Command::Render {
            table,
            world,
            regions,
            world_object,
            region_object,
            attribute,
            viewport_width,
            out,
        } => {
            let mut sources = config.sources.clone();
            sources.table = table.unwrap_or(sources.table);
            sources.world = world.unwrap_or(sources.world);
            sources.regions = regions.unwrap_or(sources.regions);
            sources.world_object = world_object.unwrap_or(sources.world_object);
            sources.region_object = region_object.unwrap_or(sources.region_object);
            render::run_render(
                config,
                sources,
                attribute.as_deref(),
                viewport_width,
                &out,
            )
            .await
        }
        Command::Summary {
            table,
            attribute,
            top,
        } => {
            let table = table.unwrap_or_else(|| config.sources.table.clone());
            summary::run_summary(&config, &table, attribute.as_deref(), top).await
        }
    }
}
