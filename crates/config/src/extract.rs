//! Extraction configuration
//!
//! Paging, retry, throttle, and lookback tunables for the extractor.
//! Defaults match a cautious shared-hosting store: small page sleeps,
//! few retries, 90-day lookback.
//!
//! # Example
//!
//! ```toml
//! [extract]
//! per_page = 100
//! max_retries = 3
//! retry_sleep_secs = 5
//! page_sleep_secs = 1
//! lookback_days = 90
//! sale_statuses = ["completed", "processing", "on-hold"]
//! ```

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Extraction tunables
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Records requested per page (default: 100)
    pub per_page: u32,

    /// Attempts per page before the collection loop is abandoned
    /// with partial results (default: 3)
    pub max_retries: u32,

    /// Fixed sleep between attempts on a failing page, in seconds
    /// (default: 5)
    pub retry_sleep_secs: u64,

    /// Throttle sleep between successfully fetched pages, in seconds
    /// (default: 1)
    pub page_sleep_secs: u64,

    /// Order lookback window in days (default: 90)
    pub lookback_days: u32,

    /// Order statuses that count as a sale. Orders are fetched once per
    /// status; an order has exactly one status at fetch time, so no
    /// cross-status dedup is needed.
    pub sale_statuses: Vec<String>,

    /// Meta keys checked for a page-visit count, in scan order.
    /// Covers the common visit-tracking plugins.
    pub visit_meta_keys: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            per_page: 100,
            max_retries: 3,
            retry_sleep_secs: 5,
            page_sleep_secs: 1,
            lookback_days: 90,
            sale_statuses: vec![
                "completed".to_string(),
                "processing".to_string(),
                "on-hold".to_string(),
                "listo-despacho".to_string(),
                "listo-retiro".to_string(),
            ],
            visit_meta_keys: vec![
                "_post_views_count".to_string(),
                "post_views_count".to_string(),
                "_eael_post_view_count".to_string(),
            ],
        }
    }
}

impl ExtractConfig {
    /// Check that loop bounds are usable
    pub fn validate(&self) -> Result<()> {
        if self.per_page == 0 {
            return Err(ConfigError::invalid_value(
                "extract",
                "per_page",
                "must be at least 1",
            ));
        }
        if self.max_retries == 0 {
            return Err(ConfigError::invalid_value(
                "extract",
                "max_retries",
                "must be at least 1",
            ));
        }
        if self.lookback_days == 0 {
            return Err(ConfigError::invalid_value(
                "extract",
                "lookback_days",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_store() {
        let config = ExtractConfig::default();
        assert_eq!(config.per_page, 100);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_sleep_secs, 5);
        assert_eq!(config.page_sleep_secs, 1);
        assert_eq!(config.lookback_days, 90);
        assert_eq!(config.sale_statuses.len(), 5);
        assert_eq!(config.visit_meta_keys.len(), 3);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ExtractConfig = toml::from_str("lookback_days = 30").unwrap();
        assert_eq!(config.lookback_days, 30);
        assert_eq!(config.per_page, 100);
    }

    #[test]
    fn test_validate_rejects_zero_bounds() {
        let config: ExtractConfig = toml::from_str("per_page = 0").unwrap();
        assert!(config.validate().is_err());

        let config: ExtractConfig = toml::from_str("max_retries = 0").unwrap();
        assert!(config.validate().is_err());

        let config: ExtractConfig = toml::from_str("lookback_days = 0").unwrap();
        assert!(config.validate().is_err());
    }
}
