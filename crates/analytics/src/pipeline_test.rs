//! End-to-end pipeline scenarios

use chrono::{TimeZone, Utc};

use storelens_config::AnalysisConfig;
use storelens_model::{Product, SaleLineItem};

use crate::pipeline::analyze;

fn product(id: u64, visits: u64, stock: i64) -> Product {
    Product {
        id,
        name: format!("Product {}", id),
        sku: format!("SKU-{}", id),
        regular_price: 10.0,
        sale_price: 0.0,
        stock_quantity: stock,
        categories: vec!["Tools".into()],
        date_created: "2026-01-01T00:00:00".into(),
        visits,
    }
}

fn item(product_id: u64, order_id: u64, quantity: u64, total: f64) -> SaleLineItem {
    SaleLineItem {
        product_id,
        name: format!("Item {}", product_id),
        quantity,
        price: total / quantity.max(1) as f64,
        total,
        order_id,
        date_created: "2026-05-01T10:00:00".into(),
        status: "completed".into(),
    }
}

fn run(products: Vec<Product>, items: &[SaleLineItem]) -> storelens_model::Report {
    let at = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
    analyze(products, items, &AnalysisConfig::default(), 90, at)
}

#[test]
fn test_three_product_scenario() {
    // Catalog with visits [0, 100, 5]; sales quantities [0, 0, 2] over
    // 90 days with default thresholds.
    let products = vec![product(1, 0, 8), product(2, 100, 3), product(3, 5, 3)];
    let items = vec![item(3, 500, 2, 24.0)];

    let report = run(products, &items);
    let rows = &report.products;

    // Product 1: never visited.
    assert!(rows[0].no_visits);
    assert!(rows[0].no_visits_high_stock); // stock 8 > 5
    assert!(rows[0].conversion_rate_pct.is_none());
    assert!(!rows[0].high_visits_no_sales);

    // Product 2: heavily visited, never sold.
    assert!(rows[1].high_visits_no_sales); // 100 > 50, qty 0
    assert!(!rows[1].no_visits);
    assert_eq!(rows[1].conversion_rate_pct, Some(0.0));
    assert!(rows[1].low_conversion); // 100 > 20 visits, 0% < 2%

    // Product 3: 2 sold on 5 visits - a defined 40% conversion.
    assert_eq!(rows[2].conversion_rate_pct, Some(40.0));
    assert!(!rows[2].low_conversion);
    // Below the 10-visit floor, so not flagged high either.
    assert!(!rows[2].high_conversion);
}

#[test]
fn test_orphan_line_items_contribute_nothing() {
    let products = vec![product(1, 10, 3)];
    let items = vec![item(1, 500, 1, 10.0), item(999, 501, 7, 70.0)];

    let report = run(products, &items);

    assert_eq!(report.summary.total_revenue, 10.0);
    assert_eq!(report.summary.total_units_sold, 1);
}

#[test]
fn test_empty_sales_is_all_zero_baseline() {
    let products = vec![product(1, 10, 3), product(2, 0, 0)];
    let report = run(products, &[]);

    assert_eq!(report.summary.total_products, 2);
    assert_eq!(report.summary.products_no_sales, 2);
    assert_eq!(report.summary.total_revenue, 0.0);
    assert_eq!(report.summary.average_ticket, 0.0);
    for row in &report.products {
        assert_eq!(row.quantity_sold, 0);
        assert_eq!(row.order_count, 0);
    }
}

#[test]
fn test_revenue_conservation_end_to_end() {
    let products: Vec<Product> = (1..=5).map(|id| product(id, id * 10, 5)).collect();
    let items: Vec<SaleLineItem> = (0..20)
        .map(|n| item(1 + n % 5, 1000 + n, 1, 9.9))
        .collect();

    let report = run(products, &items);

    let expected: f64 = items.iter().map(|i| i.total).sum();
    let total: f64 = report.products.iter().map(|r| r.total_revenue).sum();
    assert!((total - expected).abs() < 1e-9);
    assert_eq!(report.summary.total_revenue, total);
}
