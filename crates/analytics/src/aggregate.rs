//! Sales aggregation
//!
//! Groups sale line items by product identifier and left-joins the totals
//! onto the catalog: every product yields exactly one row, zero-filled
//! when nothing matched. Line items referencing unknown products cannot
//! be attributed to a row; they are excluded and surfaced as a
//! diagnostic count.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use storelens_model::{AnalysisRow, Product, SaleLineItem};

/// Result of the aggregation pass
#[derive(Debug)]
pub struct AggregateOutcome {
    /// One base row per catalog product, in catalog order
    pub rows: Vec<AnalysisRow>,
    /// Line items seen, including orphans
    pub items_ingested: usize,
    /// Line items whose product id matched no catalog product
    pub orphan_items: usize,
}

#[derive(Default)]
struct SalesTotals {
    quantity: u64,
    revenue: f64,
    orders: HashSet<u64>,
}

/// Group line items by product and left-join onto the catalog.
///
/// Deterministic: row order follows the catalog, and every total is a
/// keyed sum, so re-running over the same inputs is bit-identical.
pub fn aggregate(products: Vec<Product>, items: &[SaleLineItem]) -> AggregateOutcome {
    let known: HashSet<u64> = products.iter().map(|p| p.id).collect();

    let mut totals: HashMap<u64, SalesTotals> = HashMap::new();
    let mut orphan_items = 0usize;
    for item in items {
        if !known.contains(&item.product_id) {
            orphan_items += 1;
            continue;
        }
        let entry = totals.entry(item.product_id).or_default();
        entry.quantity += item.quantity;
        entry.revenue += item.total;
        entry.orders.insert(item.order_id);
    }

    if orphan_items > 0 {
        debug!(
            orphan_items,
            "line items referencing unknown products excluded from aggregation"
        );
    }

    let rows = products
        .into_iter()
        .map(|product| match totals.get(&product.id) {
            Some(t) => AnalysisRow::new(product, t.quantity, t.revenue, t.orders.len() as u64),
            None => AnalysisRow::new(product, 0, 0.0, 0),
        })
        .collect();

    AggregateOutcome {
        rows,
        items_ingested: items.len(),
        orphan_items,
    }
}
