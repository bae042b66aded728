//! Raw extraction records
//!
//! Products and sale line items as they come out of the store API, after
//! numeric coercion. Both are immutable once extracted: a run performs a
//! single extraction pass and never updates them.

use serde::{Deserialize, Serialize};

/// One product from the store catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique, stable product identifier
    pub id: u64,
    /// Display name
    pub name: String,
    /// Stock keeping unit (may be empty)
    pub sku: String,
    /// Listed regular price; non-numeric or absent source values become 0
    pub regular_price: f64,
    /// Listed sale price; non-numeric or absent source values become 0
    pub sale_price: f64,
    /// Units in stock; absent or unmanaged stock becomes 0
    pub stock_quantity: i64,
    /// Category names, in store order
    pub categories: Vec<String>,
    /// Creation timestamp as provided by the store (ISO 8601)
    pub date_created: String,
    /// Page-visit count from the first parseable visit-tracking meta field;
    /// 0 when no tracking plugin data is present
    pub visits: u64,
}

/// One line item from an order that counts as a sale
///
/// `product_id` is a foreign key into the catalog but may reference a
/// product that has since been deleted; such orphans are excluded from
/// per-product aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLineItem {
    /// Product the line refers to (0 for custom/deleted lines)
    pub product_id: u64,
    /// Item name snapshot at order time
    pub name: String,
    /// Units sold on this line (at least 1 on real orders)
    pub quantity: u64,
    /// Unit price at sale time
    pub price: f64,
    /// Line total
    pub total: f64,
    /// Parent order identifier
    pub order_id: u64,
    /// Order creation timestamp (ISO 8601)
    pub date_created: String,
    /// Order status at fetch time (one of the configured sale statuses)
    pub status: String,
}
