//! End-to-end analysis pipeline
//!
//! Chains the four passes over one immutable input set. Rows are never
//! touched again after classification; the report is assembled once and
//! handed off read-only.

use chrono::{DateTime, Utc};
use tracing::info;

use storelens_config::AnalysisConfig;
use storelens_model::{Product, Report, SaleLineItem};

use crate::aggregate::aggregate;
use crate::classify::classify;
use crate::metrics::derive_metrics;
use crate::report::build_report;

/// Run the full analysis: aggregate, derive, classify, build.
///
/// An empty `items` slice is a valid input and produces an all-zero
/// sales baseline - the caller decides whether that is worth reporting.
pub fn analyze(
    products: Vec<Product>,
    items: &[SaleLineItem],
    config: &AnalysisConfig,
    period_days: u32,
    analysis_at: DateTime<Utc>,
) -> Report {
    let outcome = aggregate(products, items);
    info!(
        products = outcome.rows.len(),
        items_ingested = outcome.items_ingested,
        orphan_items = outcome.orphan_items,
        "sales aggregated"
    );

    let mut rows = outcome.rows;
    derive_metrics(&mut rows, period_days);
    classify(&mut rows, config);

    build_report(rows, config, period_days, analysis_at)
}
