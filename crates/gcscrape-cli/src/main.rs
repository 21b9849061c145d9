mod export;
mod pipeline;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use gcscrape_core::AppConfig;
use gcscrape_scraper::{GeocachingClient, RegionSet};
use tracing_subscriber::EnvFilter;

use crate::export::ExportFormat;

#[derive(Debug, Parser)]
#[command(name = "gcscrape-cli")]
#[command(about = "Scrape Singapore geocache listings into CSV and JSON")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch listings, resolve regions, scrape detail pages and export
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Request profile YAML [default: GCSCRAPE_SCRAPE_CONFIG_PATH]
    #[arg(long)]
    scrape_config: Option<PathBuf>,
    /// Planning-area GeoJSON [default: GCSCRAPE_REGIONS_PATH]
    #[arg(long)]
    regions: Option<PathBuf>,
    /// Output path without extension [default: GCSCRAPE_OUTPUT_STEM]
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = ExportFormat::Both)]
    format: ExportFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `--help` must not depend on GCSCRAPE_* values.
    let cli = Cli::parse();

    let config = gcscrape_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Run(args) => run(&config, args).await,
    }
}

async fn run(config: &AppConfig, args: RunArgs) -> anyhow::Result<()> {
    let scrape_path = args
        .scrape_config
        .unwrap_or_else(|| config.scrape_config_path.clone());
    let regions_path = args.regions.unwrap_or_else(|| config.regions_path.clone());
    let output_stem = args.output.unwrap_or_else(|| config.output_stem.clone());

    tracing::info!(env = %config.env, scrape_config = %scrape_path.display(), "starting scrape run");

    let scrape = gcscrape_core::load_scrape_config(&scrape_path)
        .with_context(|| format!("failed to load {}", scrape_path.display()))?;
    let regions = RegionSet::load(&regions_path, &scrape.regions.name_property)
        .with_context(|| format!("failed to load regions from {}", regions_path.display()))?;
    tracing::info!(polygons = regions.len(), "regions loaded");

    let client = GeocachingClient::new(config.request_timeout_secs, &config.user_agent)
        .context("failed to build HTTP client")?;

    let summary =
        pipeline::run_pipeline(&client, &scrape, &regions, &output_stem, args.format).await?;
    for path in &summary.files {
        println!("wrote {}", path.display());
    }
    Ok(())
}
