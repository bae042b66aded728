//! Response payload handling
//!
//! The store's REST API sits behind a PHP stack that sometimes prefixes
//! the JSON body with warnings or notices. [`split_json_payload`] locates
//! the first JSON delimiter so parsing can start there.
//!
//! Raw record types mirror the API's field names. Numeric fields arrive
//! as strings, numbers, or null depending on store configuration, so
//! prices and stock are carried as [`serde_json::Value`] and coerced
//! leniently - a non-numeric or absent value becomes 0, never an error.

use serde::Deserialize;
use serde_json::Value;

use storelens_model::{Product, SaleLineItem};

/// Strip any leading non-JSON banner from a response body.
///
/// Returns the body starting at the first `[` or `{`, or `None` when the
/// body contains neither.
pub fn split_json_payload(body: &str) -> Option<&str> {
    body.find(['[', '{']).map(|start| &body[start..])
}

/// Coerce a JSON value to f64; strings are parsed, anything else is 0
fn coerce_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Coerce a JSON value to i64, clamping negatives to 0
fn coerce_quantity_i64(value: &Value) -> i64 {
    let n = match value {
        Value::Number(n) => n.as_i64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    };
    n.max(0)
}

/// Coerce a JSON value to u64; negatives and non-numerics become 0
fn coerce_u64(value: &Value) -> u64 {
    coerce_quantity_i64(value) as u64
}

/// One `meta_data` entry on a product
#[derive(Debug, Deserialize)]
pub struct RawMeta {
    pub key: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub name: String,
}

/// A product as returned by the `products` resource
#[derive(Debug, Deserialize)]
pub struct RawProduct {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub regular_price: Value,
    #[serde(default)]
    pub sale_price: Value,
    #[serde(default)]
    pub stock_quantity: Value,
    #[serde(default)]
    pub categories: Vec<RawCategory>,
    #[serde(default)]
    pub date_created: String,
    #[serde(default)]
    pub meta_data: Vec<RawMeta>,
}

impl RawProduct {
    /// Convert to the model type, resolving the visit count.
    ///
    /// The visit count comes from the first `meta_data` entry (in store
    /// order) whose key is in `visit_meta_keys` and whose value parses as
    /// a number; entries with unparsable values are skipped, and a product
    /// with no usable entry gets 0.
    pub fn into_product(self, visit_meta_keys: &[String]) -> Product {
        let visits = self
            .meta_data
            .iter()
            .filter(|meta| visit_meta_keys.iter().any(|k| *k == meta.key))
            .find_map(|meta| match &meta.value {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
            .unwrap_or(0);

        Product {
            id: self.id,
            name: self.name,
            sku: self.sku,
            regular_price: coerce_f64(&self.regular_price),
            sale_price: coerce_f64(&self.sale_price),
            stock_quantity: coerce_quantity_i64(&self.stock_quantity),
            categories: self.categories.into_iter().map(|c| c.name).collect(),
            date_created: self.date_created,
            visits,
        }
    }
}

/// A line item inside an order
#[derive(Debug, Deserialize)]
pub struct RawLineItem {
    #[serde(default)]
    pub product_id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: Value,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub total: Value,
}

/// An order as returned by the `orders` resource
#[derive(Debug, Deserialize)]
pub struct RawOrder {
    pub id: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub date_created: String,
    #[serde(default)]
    pub line_items: Vec<RawLineItem>,
}

impl RawOrder {
    /// Flatten this order into one [`SaleLineItem`] per line item
    pub fn into_line_items(self) -> Vec<SaleLineItem> {
        let RawOrder {
            id,
            status,
            date_created,
            line_items,
        } = self;
        line_items
            .into_iter()
            .map(|item| SaleLineItem {
                product_id: item.product_id,
                name: item.name,
                quantity: coerce_u64(&item.quantity),
                price: coerce_f64(&item.price),
                total: coerce_f64(&item.total),
                order_id: id,
                date_created: date_created.clone(),
                status: status.clone(),
            })
            .collect()
    }
}
