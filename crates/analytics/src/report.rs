//! Report assembly
//!
//! Selects, sorts, and caps rows into the named report sections and
//! computes the summary statistics over the full analysis set. Sections
//! are always sorted descending by their key; caps match the reference
//! report sizes.

use chrono::{DateTime, Utc};

use storelens_config::AnalysisConfig;
use storelens_model::{AnalysisRow, Report, ReportSection, SortKey, Summary, VolumeTier};

use crate::classify::REVENUE_LABELS;

/// Assemble the final report from classified rows.
///
/// The row vector is moved in and carried whole in the report for
/// full-detail export; sections hold sorted copies of their selections.
pub fn build_report(
    rows: Vec<AnalysisRow>,
    config: &AnalysisConfig,
    period_days: u32,
    analysis_at: DateTime<Utc>,
) -> Report {
    let summary = summarize(&rows);

    let sections = vec![
        section(&rows, "problem_products", SortKey::StockValue, 30, |r| {
            r.quantity_sold == 0 && r.stock_quantity > config.min_stock_no_visits
        }),
        section(
            &rows,
            "no_visits_high_stock",
            SortKey::StockValue,
            30,
            |r| r.no_visits_high_stock,
        ),
        section(&rows, "high_visits_no_sales", SortKey::Visits, 20, |r| {
            r.high_visits_no_sales
        }),
        section(&rows, "low_conversion", SortKey::Visits, 20, |r| {
            r.low_conversion
        }),
        section(
            &rows,
            "high_conversion",
            SortKey::ConversionRate,
            20,
            |r| r.high_conversion,
        ),
        section(
            &rows,
            "bestsellers_by_volume",
            SortKey::QuantitySold,
            30,
            |r| r.volume_tier == VolumeTier::Bestseller,
        ),
        section(&rows, "top_earners", SortKey::TotalRevenue, 30, |r| {
            r.total_revenue > 0.0
        }),
        section(
            &rows,
            "price_opportunities",
            SortKey::QuantitySold,
            20,
            |r| is_price_opportunity(r, config),
        ),
    ];

    Report {
        analysis_timestamp: analysis_at,
        period_description: format!("last {} days", period_days),
        period_days,
        summary,
        sections,
        products: rows,
    }
}

/// A sold product whose realized price diverges materially from the
/// listed price
fn is_price_opportunity(row: &AnalysisRow, config: &AnalysisConfig) -> bool {
    row.quantity_sold > config.min_sales_price_opportunity
        && row.avg_sale_price > 0.0
        && row.price_diff.abs() > row.regular_price * config.price_diff_fraction
}

fn section(
    rows: &[AnalysisRow],
    name: &str,
    sort_key: SortKey,
    cap: usize,
    predicate: impl Fn(&AnalysisRow) -> bool,
) -> ReportSection {
    let mut selected: Vec<AnalysisRow> = rows.iter().filter(|r| predicate(r)).cloned().collect();
    selected.sort_by(|a, b| sort_key.value(b).total_cmp(&sort_key.value(a)));
    selected.truncate(cap);
    ReportSection {
        name: name.to_string(),
        sort_key,
        rows: selected,
    }
}

fn summarize(rows: &[AnalysisRow]) -> Summary {
    let total_revenue: f64 = rows.iter().map(|r| r.total_revenue).sum();
    let rows_with_sales = rows.iter().filter(|r| r.quantity_sold > 0).count();

    let defined_conversions: Vec<f64> =
        rows.iter().filter_map(|r| r.conversion_rate_pct).collect();
    let mean_conversion_rate_pct = if defined_conversions.is_empty() {
        0.0
    } else {
        defined_conversions.iter().sum::<f64>() / defined_conversions.len() as f64
    };

    let top_label = REVENUE_LABELS[REVENUE_LABELS.len() - 1];

    Summary {
        total_products: rows.len(),
        products_no_sales: rows.iter().filter(|r| r.quantity_sold == 0).count(),
        products_no_visits: rows.iter().filter(|r| r.visits == 0).count(),
        products_no_visits_high_stock: rows.iter().filter(|r| r.no_visits_high_stock).count(),
        bestsellers_by_volume: rows
            .iter()
            .filter(|r| r.volume_tier == VolumeTier::Bestseller)
            .count(),
        top_earners: rows
            .iter()
            .filter(|r| r.revenue_tier.as_deref() == Some(top_label))
            .count(),
        total_revenue,
        total_units_sold: rows.iter().map(|r| r.quantity_sold).sum(),
        total_visits: rows.iter().map(|r| r.visits).sum(),
        mean_conversion_rate_pct,
        average_ticket: if rows_with_sales > 0 {
            total_revenue / rows_with_sales as f64
        } else {
            0.0
        },
    }
}
