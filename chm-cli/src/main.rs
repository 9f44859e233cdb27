//! CHM CLI - Command line tool for the choropleth map and bar chart.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "chm-cli",
    version,
    about = "Choropleth map and bar chart toolkit"
)]
struct Cli {
    /// JSON file overriding visualization settings
    #[arg(short = 'c', long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: chm_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    chm_cmd::run(cli.command, cli.config).await
}
