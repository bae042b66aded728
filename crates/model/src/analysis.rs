//! Per-product analysis rows
//!
//! One [`AnalysisRow`] per catalog product: native product fields plus
//! aggregated sales, derived metrics, tier labels, and anomaly flags.
//! Rows are built in passes (aggregate, derive, classify) and are never
//! mutated after classification finishes.

use serde::{Deserialize, Serialize};

use crate::Product;

/// Fixed-threshold sales-volume tier
///
/// Bucket boundaries are constants, not data-dependent: 0 units is its own
/// bucket, then (0,1], (1,10], (10,50], (50,inf).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeTier {
    /// No units sold in the period
    NoSales,
    /// Exactly one unit
    VeryLow,
    /// 2-10 units
    Low,
    /// 11-50 units
    Medium,
    /// More than 50 units
    Bestseller,
}

impl VolumeTier {
    /// Classify a quantity into its volume tier
    pub fn from_quantity(quantity: u64) -> Self {
        match quantity {
            0 => Self::NoSales,
            1 => Self::VeryLow,
            2..=10 => Self::Low,
            11..=50 => Self::Medium,
            _ => Self::Bestseller,
        }
    }

    /// Human-readable label for report output
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoSales => "no sales",
            Self::VeryLow => "very low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::Bestseller => "bestseller by volume",
        }
    }
}

/// One product with its aggregated sales, derived metrics, and labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRow {
    // Product fields
    pub id: u64,
    pub name: String,
    pub sku: String,
    pub regular_price: f64,
    pub sale_price: f64,
    pub stock_quantity: i64,
    pub categories: Vec<String>,
    pub date_created: String,
    pub visits: u64,

    // Aggregates (0 when no matching sale exists)
    /// Units sold across all matching line items
    pub quantity_sold: u64,
    /// Revenue summed across all matching line items
    pub total_revenue: f64,
    /// Number of distinct orders containing this product
    pub order_count: u64,

    // Derived metrics
    /// Realized average unit price (0 when nothing sold)
    pub avg_sale_price: f64,
    /// Units sold per day over the analysis period
    pub sold_per_day: f64,
    /// Revenue per day over the analysis period
    pub revenue_per_day: f64,
    /// Visits per day over the analysis period
    pub visits_per_day: f64,
    /// Percentage of visits that converted into a sold unit.
    /// `None` when the product was never visited - "never viewed" is
    /// distinct from "viewed but never bought".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_rate_pct: Option<f64>,
    /// Realized average price minus listed regular price
    pub price_diff: f64,
    /// Price diff as a percentage of the regular price (0 when unpriced)
    pub margin_pct: f64,
    /// Regular price times stock on hand
    pub stock_value: f64,

    // Classification
    pub volume_tier: VolumeTier,
    /// Quantile-based revenue tier; `None` for zero-revenue rows when the
    /// store has any revenue at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_tier: Option<String>,
    /// Quantile-based traffic tier; `None` for zero-visit rows when the
    /// store has any visits at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traffic_tier: Option<String>,

    // Anomaly flags (independent, non-exclusive)
    pub no_visits: bool,
    pub no_visits_high_stock: bool,
    pub high_visits_no_sales: bool,
    pub low_conversion: bool,
    pub high_conversion: bool,
}

impl AnalysisRow {
    /// Build a base row from a product and its sales aggregates.
    ///
    /// Metrics, tiers, and flags start zeroed/unset; the derive and
    /// classify passes fill them in.
    pub fn new(product: Product, quantity_sold: u64, total_revenue: f64, order_count: u64) -> Self {
        Self {
            id: product.id,
            name: product.name,
            sku: product.sku,
            regular_price: product.regular_price,
            sale_price: product.sale_price,
            stock_quantity: product.stock_quantity,
            categories: product.categories,
            date_created: product.date_created,
            visits: product.visits,
            quantity_sold,
            total_revenue,
            order_count,
            avg_sale_price: 0.0,
            sold_per_day: 0.0,
            revenue_per_day: 0.0,
            visits_per_day: 0.0,
            conversion_rate_pct: None,
            price_diff: 0.0,
            margin_pct: 0.0,
            stock_value: 0.0,
            volume_tier: VolumeTier::NoSales,
            revenue_tier: None,
            traffic_tier: None,
            no_visits: false,
            no_visits_high_stock: false,
            high_visits_no_sales: false,
            low_conversion: false,
            high_conversion: false,
        }
    }
}
