//! Storelens Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! Minimal config should just work - only specify what you need to change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use storelens_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[store]\napi_url = \"https://shop.example\"").unwrap();
//! ```
//!
//! # Example Minimal Config
//!
//! ```toml
//! [store]
//! api_url = "https://shop.example"
//! consumer_key = "ck_xxx"
//! consumer_secret = "cs_xxx"
//! ```
//!
//! Credentials can also come from the environment (`STORELENS_API_URL`,
//! `STORELENS_CONSUMER_KEY`, `STORELENS_CONSUMER_SECRET`), which override
//! the file values when set.

mod analysis;
mod error;
mod extract;
mod logging;
mod store;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use analysis::AnalysisConfig;
pub use error::{ConfigError, Result};
pub use extract::ExtractConfig;
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use store::StoreConfig;

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults; only the store
/// credentials have no usable default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store API endpoint and credentials
    pub store: StoreConfig,

    /// Extraction tunables (paging, retries, sleeps, lookback)
    pub extract: ExtractConfig,

    /// Classification thresholds
    pub analysis: AnalysisConfig,

    /// Logging configuration
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file, then apply environment
    /// overrides for the store credentials.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, contains invalid TOML,
    /// or fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut config = Self::from_str(&contents)?;
        config.store.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns error when required store fields are empty or extraction
    /// bounds are zero (which would make loops unbounded or empty).
    pub fn validate(&self) -> Result<()> {
        self.store.validate()?;
        self.extract.validate()?;
        Ok(())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
