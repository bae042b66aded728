//! Report output types
//!
//! The report is assembled once per run and handed to exporters read-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AnalysisRow;

/// Sort key for a report section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    StockValue,
    Visits,
    ConversionRate,
    QuantitySold,
    TotalRevenue,
}

impl SortKey {
    /// Extract the sortable value from a row.
    ///
    /// Undefined conversion rates sort below every defined rate.
    pub fn value(&self, row: &AnalysisRow) -> f64 {
        match self {
            Self::StockValue => row.stock_value,
            Self::Visits => row.visits as f64,
            Self::ConversionRate => row.conversion_rate_pct.unwrap_or(-1.0),
            Self::QuantitySold => row.quantity_sold as f64,
            Self::TotalRevenue => row.total_revenue,
        }
    }
}

/// A named, ordered, size-capped selection of analysis rows
///
/// Sections are always sorted descending by their key before capping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    /// Section name (stable key, used in exports)
    pub name: String,
    /// Key the rows are sorted by
    pub sort_key: SortKey,
    /// Selected rows, sorted descending, at most the section cap
    pub rows: Vec<AnalysisRow>,
}

/// Scalar aggregates over the full analysis set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_products: usize,
    pub products_no_sales: usize,
    pub products_no_visits: usize,
    pub products_no_visits_high_stock: usize,
    pub bestsellers_by_volume: usize,
    pub top_earners: usize,
    pub total_revenue: f64,
    pub total_units_sold: u64,
    pub total_visits: u64,
    /// Mean conversion rate over rows with a defined rate (0 when none)
    pub mean_conversion_rate_pct: f64,
    /// Total revenue over the number of rows with sales (0 when none)
    pub average_ticket: f64,
}

/// The complete analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// When the analysis ran
    pub analysis_timestamp: DateTime<Utc>,
    /// Human description of the lookback window, e.g. "last 90 days"
    pub period_description: String,
    /// Number of days in the lookback window
    pub period_days: u32,
    /// Scalar aggregates
    pub summary: Summary,
    /// Named sections, in build order
    pub sections: Vec<ReportSection>,
    /// The full analysis set, for full-detail export
    pub products: Vec<AnalysisRow>,
}

impl Report {
    /// Look up a section by name
    pub fn section(&self, name: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.name == name)
    }
}
