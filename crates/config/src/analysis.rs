//! Classification thresholds
//!
//! Tunables for the anomaly flags and the price-opportunity section.
//! Quantile boundaries for the revenue/traffic tiers are data-dependent
//! and not configured here.
//!
//! # Example
//!
//! ```toml
//! [analysis]
//! high_visit_threshold = 50
//! low_conversion_visit_floor = 20
//! low_conversion_pct = 2.0
//! ```

use serde::Deserialize;

/// Thresholds for anomaly flags and report sections
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Visits above which a product with zero sales is flagged
    /// `high_visits_no_sales` (default: 50)
    pub high_visit_threshold: u64,

    /// Minimum visits before a low conversion rate is meaningful
    /// (default: 20)
    pub low_conversion_visit_floor: u64,

    /// Minimum visits before a high conversion rate is meaningful
    /// (default: 10)
    pub high_conversion_visit_floor: u64,

    /// Conversion percentage below which `low_conversion` is flagged
    /// (default: 2.0)
    pub low_conversion_pct: f64,

    /// Conversion percentage above which `high_conversion` is flagged
    /// (default: 5.0)
    pub high_conversion_pct: f64,

    /// Stock above which a never-visited product is flagged
    /// `no_visits_high_stock` (default: 5)
    pub min_stock_no_visits: i64,

    /// Units sold required before a price opportunity is reported
    /// (default: 10)
    pub min_sales_price_opportunity: u64,

    /// Fraction of the regular price the realized price must diverge by
    /// to count as a price opportunity (default: 0.1)
    pub price_diff_fraction: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            high_visit_threshold: 50,
            low_conversion_visit_floor: 20,
            high_conversion_visit_floor: 10,
            low_conversion_pct: 2.0,
            high_conversion_pct: 5.0,
            min_stock_no_visits: 5,
            min_sales_price_opportunity: 10,
            price_diff_fraction: 0.1,
        }
    }
}
