//! Storelens - Store catalog and sales analysis
//!
//! # Usage
//!
//! ```bash
//! # Full analysis: extract, classify, export JSON/CSV/Markdown
//! storelens analyze --config storelens.toml
//! storelens analyze --days 30 --out reports/
//!
//! # Order listing with per-product totals
//! storelens orders --config storelens.toml
//! ```

mod cmd;
mod export;

use anyhow::Result;
use clap::{Parser, Subcommand};
use storelens_config::Config;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Storelens - Store catalog and sales analysis
#[derive(Parser, Debug)]
#[command(name = "storelens")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full analysis and export reports
    Analyze(cmd::analyze::AnalyzeArgs),

    /// Export an order listing with per-product totals
    Orders(cmd::orders::OrdersArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = resolve_log_level(cli.log_level.as_deref(), cli.config.as_deref());
    init_logging(&log_level)?;

    match cli.command {
        Command::Analyze(args) => cmd::analyze::run(args, cli.config).await,
        Command::Orders(args) => cmd::orders::run(args, cli.config).await,
    }
}

/// Resolve log level: CLI flag > config file > default "info"
fn resolve_log_level(cli_level: Option<&str>, config_path: Option<&std::path::Path>) -> String {
    if let Some(level) = cli_level {
        return level.to_string();
    }

    if let Some(path) = config_path
        && path.exists()
        && let Ok(config) = Config::from_file(path)
    {
        return config.log.level.as_str().to_string();
    }

    "info".to_string()
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}
