//! Forecast cone plotter.
//!
//! One run:
//! - scrape the NHC GIS page for active cone archives
//! - download each region's base map and the cones it shows
//! - plot, annotate and save one PNG per region
//! - remove the downloads unless `--keep-files` is set

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use cone_plotter::{Args, Fetcher, Pipeline};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let builder = FmtSubscriber::builder()
        .with_max_level(args.level())
        .with_target(true);
    if args.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    info!("Starting cone plotter");

    let catalog = args.load_catalog().context("Failed to load region profiles")?;
    let settings = args.settings(Utc::now());
    let fetcher = Fetcher::new(args.fetch_config())?;

    let font = args.load_font()?;

    let pipeline = Pipeline::new(&fetcher, &catalog, &settings, &font);

    let summary = pipeline.run().await?;
    if summary.regions_rendered() == 0 && !summary.outcomes.is_empty() {
        anyhow::bail!("No region could be rendered");
    }

    Ok(())
}
