//! Store API configuration
//!
//! Endpoint and credentials for the WooCommerce-style REST API.
//!
//! # Example
//!
//! ```toml
//! [store]
//! api_url = "https://shop.example"
//! consumer_key = "ck_xxx"
//! consumer_secret = "cs_xxx"
//! api_version = "wc/v3"   # optional
//! timeout_secs = 30       # optional
//! ```

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Environment variable overriding `api_url`
pub const ENV_API_URL: &str = "STORELENS_API_URL";
/// Environment variable overriding `consumer_key`
pub const ENV_CONSUMER_KEY: &str = "STORELENS_CONSUMER_KEY";
/// Environment variable overriding `consumer_secret`
pub const ENV_CONSUMER_SECRET: &str = "STORELENS_CONSUMER_SECRET";

/// Store endpoint and credentials
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store base URL (e.g., https://shop.example)
    pub api_url: String,

    /// REST API consumer key
    pub consumer_key: String,

    /// REST API consumer secret
    pub consumer_secret: String,

    /// API version path segment (default: wc/v3)
    pub api_version: String,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            consumer_key: String::new(),
            consumer_secret: String::new(),
            api_version: "wc/v3".to_string(),
            timeout_secs: 30,
        }
    }
}

impl StoreConfig {
    /// Override credentials from the environment when the variables are set
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            self.api_url = url;
        }
        if let Ok(key) = std::env::var(ENV_CONSUMER_KEY) {
            self.consumer_key = key;
        }
        if let Ok(secret) = std::env::var(ENV_CONSUMER_SECRET) {
            self.consumer_secret = secret;
        }
    }

    /// Check that endpoint and credentials are present
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            return Err(ConfigError::missing_field("store", "api_url"));
        }
        if self.consumer_key.is_empty() {
            return Err(ConfigError::missing_field("store", "consumer_key"));
        }
        if self.consumer_secret.is_empty() {
            return Err(ConfigError::missing_field("store", "consumer_secret"));
        }
        Ok(())
    }
}
