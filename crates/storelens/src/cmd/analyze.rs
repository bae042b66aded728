//! Analyze command - full extraction and analysis run
//!
//! Extracts the catalog and recent orders, runs the analysis pipeline,
//! and writes the JSON, CSV, and Markdown artifacts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use tracing::{info, warn};

use storelens_analytics::analyze;
use storelens_connector::{Extractor, StoreClient};

use crate::export;

/// Analyze command arguments
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Override the lookback window in days
    #[arg(short, long)]
    days: Option<u32>,

    /// Output directory for report files (default: current directory)
    #[arg(short, long, default_value = ".")]
    out: PathBuf,
}

/// Run the analyze command
pub async fn run(args: AnalyzeArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    if let Some(days) = args.days {
        config.extract.lookback_days = days;
    }
    config.validate().context("invalid configuration")?;

    let client = StoreClient::new(&config.store).context("failed to create store client")?;
    let extractor = Extractor::new(client, config.extract.clone());

    info!("extracting product catalog");
    let products = extractor.fetch_products().await;
    if products.is_empty() {
        warn!("no products extracted - nothing to analyze");
        return Ok(());
    }

    info!(
        days = config.extract.lookback_days,
        "extracting sales"
    );
    let sales = extractor.fetch_sales().await;
    if sales.is_empty() {
        warn!("no sales in the period - reporting with an all-zero baseline");
    }

    let report = analyze(
        products,
        &sales,
        &config.analysis,
        config.extract.lookback_days,
        Utc::now(),
    );

    let written = export::write_all(&report, &args.out).context("failed to write reports")?;
    for path in &written {
        info!(path = %path.display(), "report written");
    }

    Ok(())
}
