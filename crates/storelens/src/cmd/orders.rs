//! Orders command - order listing with per-product totals
//!
//! Fetches the orders for the lookback window and writes a Markdown
//! report: every order with its line items, then total units per
//! product summed across all orders.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use tracing::{info, warn};

use storelens_connector::{Extractor, StoreClient};
use storelens_model::SaleLineItem;

use crate::export;

/// Orders command arguments
#[derive(Args, Debug)]
pub struct OrdersArgs {
    /// Override the lookback window in days
    #[arg(short, long)]
    days: Option<u32>,

    /// Output directory for the report file (default: current directory)
    #[arg(short, long, default_value = ".")]
    out: PathBuf,
}

/// Run the orders command
pub async fn run(args: OrdersArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    if let Some(days) = args.days {
        config.extract.lookback_days = days;
    }
    config.validate().context("invalid configuration")?;

    let client = StoreClient::new(&config.store).context("failed to create store client")?;
    let extractor = Extractor::new(client, config.extract.clone());

    info!(days = config.extract.lookback_days, "extracting orders");
    let items = extractor.fetch_sales().await;
    if items.is_empty() {
        warn!("no orders found in the period");
        return Ok(());
    }

    let markdown = render_orders_markdown(&items, config.extract.lookback_days, Utc::now());
    let path = export::write_orders_markdown(&markdown, &args.out)?;
    info!(path = %path.display(), "order report written");

    Ok(())
}

/// Per-product quantity totals across all orders, sorted by units
/// descending (ties by product id for stable output)
fn totalize(items: &[SaleLineItem]) -> Vec<(u64, String, u64)> {
    let mut totals: HashMap<u64, (String, u64)> = HashMap::new();
    for item in items {
        let entry = totals.entry(item.product_id).or_default();
        entry.0 = item.name.clone();
        entry.1 += item.quantity;
    }
    let mut rows: Vec<(u64, String, u64)> = totals
        .into_iter()
        .map(|(id, (name, qty))| (id, name, qty))
        .collect();
    rows.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    rows
}

/// Group line items by parent order, preserving fetch order
fn group_by_order(items: &[SaleLineItem]) -> Vec<(u64, Vec<&SaleLineItem>)> {
    let mut index: HashMap<u64, usize> = HashMap::new();
    let mut orders: Vec<(u64, Vec<&SaleLineItem>)> = Vec::new();
    for item in items {
        match index.get(&item.order_id) {
            Some(&i) => orders[i].1.push(item),
            None => {
                index.insert(item.order_id, orders.len());
                orders.push((item.order_id, vec![item]));
            }
        }
    }
    orders
}

fn render_orders_markdown(
    items: &[SaleLineItem],
    period_days: u32,
    now: chrono::DateTime<Utc>,
) -> String {
    let mut md = String::new();
    md.push_str("# Order Report\n\n");
    md.push_str(&format!("**Date:** {}\n", now.to_rfc3339()));
    md.push_str(&format!("**Period:** last {} days\n\n", period_days));
    md.push_str("## Orders\n\n");

    for (order_id, lines) in group_by_order(items) {
        let first = lines[0];
        md.push_str(&format!(
            "### Order #{} - {} ({})\n\n",
            order_id, first.date_created, first.status
        ));
        for line in lines {
            md.push_str(&format!(
                "- {} (ID: {}) - Quantity: {}\n",
                line.name, line.product_id, line.quantity
            ));
        }
        md.push('\n');
    }

    md.push_str("## Product totals (all orders summed)\n\n");
    for (product_id, name, quantity) in totalize(items) {
        md.push_str(&format!(
            "- {} (ID: {}) - Total: {}\n",
            name, product_id, quantity
        ));
    }

    md
}
