//! Tier labels and anomaly flags
//!
//! Sales volume uses fixed thresholds; revenue and traffic tiers are
//! quantile-based and therefore data-dependent. Flags are independent
//! booleans driven by the configured thresholds.

use storelens_config::AnalysisConfig;
use storelens_model::{AnalysisRow, VolumeTier};

use crate::quantile::QuantileBucketer;

/// Revenue tier percentiles (quartiles over positive revenue)
pub const REVENUE_QUANTILES: [f64; 3] = [0.25, 0.5, 0.75];

/// Revenue tier labels, lowest bin first.
///
/// The list is one longer than the maximum bin count; the tail label
/// only survives when a store is configured with fewer quantiles.
pub const REVENUE_LABELS: [&str; 5] = [
    "no revenue",
    "low revenue",
    "mid revenue",
    "high revenue",
    "top earner",
];

/// Traffic tier percentiles (terciles over positive visit counts)
pub const TRAFFIC_QUANTILES: [f64; 2] = [0.33, 0.66];

/// Traffic tier labels, lowest bin first
pub const TRAFFIC_LABELS: [&str; 4] = ["no visits", "low traffic", "mid traffic", "high traffic"];

/// Assign tiers and anomaly flags to every row.
///
/// When a whole column is zero (no revenue anywhere, or no visit
/// tracking installed), binning is skipped and every row gets that
/// column's constant first label.
pub fn classify(rows: &mut [AnalysisRow], config: &AnalysisConfig) {
    for row in rows.iter_mut() {
        row.volume_tier = VolumeTier::from_quantity(row.quantity_sold);
    }

    let revenues: Vec<f64> = rows.iter().map(|r| r.total_revenue).collect();
    match QuantileBucketer::new(&revenues, &REVENUE_QUANTILES, &REVENUE_LABELS) {
        Some(bucketer) => {
            for row in rows.iter_mut() {
                row.revenue_tier = bucketer.bucket(row.total_revenue).map(String::from);
            }
        }
        None => {
            for row in rows.iter_mut() {
                row.revenue_tier = Some(REVENUE_LABELS[0].to_string());
            }
        }
    }

    let visits: Vec<f64> = rows.iter().map(|r| r.visits as f64).collect();
    match QuantileBucketer::new(&visits, &TRAFFIC_QUANTILES, &TRAFFIC_LABELS) {
        Some(bucketer) => {
            for row in rows.iter_mut() {
                row.traffic_tier = bucketer.bucket(row.visits as f64).map(String::from);
            }
        }
        None => {
            for row in rows.iter_mut() {
                row.traffic_tier = Some(TRAFFIC_LABELS[0].to_string());
            }
        }
    }

    for row in rows.iter_mut() {
        row.no_visits = row.visits == 0;
        row.no_visits_high_stock =
            row.visits == 0 && row.stock_quantity > config.min_stock_no_visits;
        row.high_visits_no_sales =
            row.visits > config.high_visit_threshold && row.quantity_sold == 0;
        row.low_conversion = row.visits > config.low_conversion_visit_floor
            && row
                .conversion_rate_pct
                .is_some_and(|c| c < config.low_conversion_pct);
        row.high_conversion = row.visits > config.high_conversion_visit_floor
            && row
                .conversion_rate_pct
                .is_some_and(|c| c > config.high_conversion_pct);
    }
}
