//! Derived per-product metrics
//!
//! Fills in the metric fields of each analysis row from its aggregates
//! and the lookback window. All inputs were coerced at extraction, so
//! this pass cannot fail; division guards keep every result finite.

use storelens_model::AnalysisRow;

/// Compute derived metrics for every row.
///
/// `period_days` is the extraction lookback window; per-day rates divide
/// by it. The conversion rate stays `None` for never-visited products -
/// that is a different fact than a 0% rate.
pub fn derive_metrics(rows: &mut [AnalysisRow], period_days: u32) {
    let days = f64::from(period_days.max(1));

    for row in rows.iter_mut() {
        row.avg_sale_price = if row.quantity_sold > 0 {
            row.total_revenue / row.quantity_sold as f64
        } else {
            0.0
        };

        row.sold_per_day = row.quantity_sold as f64 / days;
        row.revenue_per_day = row.total_revenue / days;
        row.visits_per_day = row.visits as f64 / days;

        row.conversion_rate_pct = if row.visits > 0 {
            Some(row.quantity_sold as f64 / row.visits as f64 * 100.0)
        } else {
            None
        };

        row.price_diff = row.avg_sale_price - row.regular_price;
        row.margin_pct = if row.regular_price > 0.0 {
            row.price_diff / row.regular_price * 100.0
        } else {
            0.0
        };

        row.stock_value = row.regular_price * row.stock_quantity as f64;
    }
}
