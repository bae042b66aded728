//! CLI subcommands

pub mod analyze;
pub mod orders;

use std::path::PathBuf;

use anyhow::{Context, Result};
use storelens_config::Config;

/// Load config from the given path, or from `storelens.toml` in the
/// working directory when present, or defaults plus env credentials.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(&path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => {
            let default_path = PathBuf::from("storelens.toml");
            if default_path.exists() {
                Config::from_file(&default_path).context("failed to load storelens.toml")
            } else {
                let mut config = Config::default();
                config.store.apply_env();
                config.validate().context(
                    "no config file found and store credentials are not in the environment",
                )?;
                Ok(config)
            }
        }
    }
}
