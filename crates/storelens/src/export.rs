//! Report exporters
//!
//! Writes the in-memory report to timestamped files: JSON for machine
//! consumption, CSV for spreadsheets, Markdown for reading. The report
//! itself is read-only by the time it gets here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use storelens_model::{AnalysisRow, Report};

/// Write all three report artifacts into `out_dir`.
///
/// Returns the written paths in json/csv/markdown order.
pub fn write_all(report: &Report, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let stamp = report.analysis_timestamp.format("%Y%m%d_%H%M%S");

    let json_path = out_dir.join(format!("report_{}.json", stamp));
    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    fs::write(&json_path, json)
        .with_context(|| format!("failed to write {}", json_path.display()))?;

    let csv_path = out_dir.join(format!("analysis_{}.csv", stamp));
    fs::write(&csv_path, render_csv(&report.products))
        .with_context(|| format!("failed to write {}", csv_path.display()))?;

    let md_path = out_dir.join(format!("report_{}.md", stamp));
    fs::write(&md_path, render_markdown(report))
        .with_context(|| format!("failed to write {}", md_path.display()))?;

    Ok(vec![json_path, csv_path, md_path])
}

/// Write the orders Markdown report into `out_dir`
pub fn write_orders_markdown(markdown: &str, out_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let path = out_dir.join(format!("orders_{}.md", stamp));
    fs::write(&path, markdown).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

const CSV_HEADER: &str = "id,name,sku,regular_price,sale_price,stock_quantity,categories,\
date_created,visits,quantity_sold,total_revenue,order_count,avg_sale_price,sold_per_day,\
revenue_per_day,visits_per_day,conversion_rate_pct,price_diff,margin_pct,stock_value,\
volume_tier,revenue_tier,traffic_tier,no_visits,no_visits_high_stock,high_visits_no_sales,\
low_conversion,high_conversion";

/// Render the full analysis set as CSV, one row per product
fn render_csv(rows: &[AnalysisRow]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for row in rows {
        let fields = [
            row.id.to_string(),
            csv_escape(&row.name),
            csv_escape(&row.sku),
            row.regular_price.to_string(),
            row.sale_price.to_string(),
            row.stock_quantity.to_string(),
            csv_escape(&row.categories.join("; ")),
            csv_escape(&row.date_created),
            row.visits.to_string(),
            row.quantity_sold.to_string(),
            row.total_revenue.to_string(),
            row.order_count.to_string(),
            row.avg_sale_price.to_string(),
            row.sold_per_day.to_string(),
            row.revenue_per_day.to_string(),
            row.visits_per_day.to_string(),
            row.conversion_rate_pct
                .map(|c| c.to_string())
                .unwrap_or_default(),
            row.price_diff.to_string(),
            row.margin_pct.to_string(),
            row.stock_value.to_string(),
            row.volume_tier.label().to_string(),
            row.revenue_tier.clone().unwrap_or_default(),
            row.traffic_tier.clone().unwrap_or_default(),
            row.no_visits.to_string(),
            row.no_visits_high_stock.to_string(),
            row.high_visits_no_sales.to_string(),
            row.low_conversion.to_string(),
            row.high_conversion.to_string(),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Quote a CSV field when it contains a delimiter, quote, or newline
fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn conversion_label(row: &AnalysisRow) -> String {
    match row.conversion_rate_pct {
        Some(c) => format!("{:.2}%", c),
        None => "n/a".to_string(),
    }
}

/// Render the human-readable Markdown report
fn render_markdown(report: &Report) -> String {
    let s = &report.summary;
    let mut md = String::new();

    md.push_str("# Store Analysis Report\n\n");
    md.push_str(&format!("**Date:** {}\n", report.analysis_timestamp.to_rfc3339()));
    md.push_str(&format!("**Period:** {}\n\n", report.period_description));

    md.push_str("## Executive Summary\n\n");
    md.push_str(&format!("- Total products: {}\n", s.total_products));
    md.push_str(&format!("- Without sales: {}\n", s.products_no_sales));
    md.push_str(&format!("- Without visits: {}\n", s.products_no_visits));
    md.push_str(&format!(
        "- Without visits, high stock: {}\n",
        s.products_no_visits_high_stock
    ));
    md.push_str(&format!("- Bestsellers by volume: {}\n", s.bestsellers_by_volume));
    md.push_str(&format!("- Top earners: {}\n", s.top_earners));
    md.push_str(&format!("- Total revenue: ${:.2}\n", s.total_revenue));
    md.push_str(&format!("- Units sold: {}\n", s.total_units_sold));
    md.push_str(&format!("- Total visits: {}\n", s.total_visits));
    md.push_str(&format!(
        "- Mean conversion rate: {:.2}%\n",
        s.mean_conversion_rate_pct
    ));
    md.push_str(&format!("- Average ticket: ${:.2}\n", s.average_ticket));

    md.push_str("\n## Products with NO VISITS and high stock\n\n");
    if let Some(section) = report.section("no_visits_high_stock") {
        for p in section.rows.iter().take(10) {
            md.push_str(&format!("- **{}** (SKU: {})\n", p.name, p.sku));
            md.push_str(&format!(
                "  - Price: ${:.2} | Stock: {} | Stock value: ${:.2}\n",
                p.regular_price, p.stock_quantity, p.stock_value
            ));
            md.push_str(&format!(
                "  - Visits: {} | Units sold: {}\n",
                p.visits, p.quantity_sold
            ));
        }
    }

    md.push_str("\n## Products with HIGH TRAFFIC but NO SALES\n\n");
    if let Some(section) = report.section("high_visits_no_sales") {
        for p in section.rows.iter().take(10) {
            md.push_str(&format!("- **{}** - {} visits, 0 sales\n", p.name, p.visits));
            md.push_str(&format!(
                "  - Price: ${:.2} | Stock: {}\n",
                p.regular_price, p.stock_quantity
            ));
        }
    }

    md.push_str("\n## Products with LOW CONVERSION\n\n");
    if let Some(section) = report.section("low_conversion") {
        for p in section.rows.iter().take(10) {
            md.push_str(&format!(
                "- **{}** - Conversion: {}\n",
                p.name,
                conversion_label(p)
            ));
            md.push_str(&format!(
                "  - Visits: {} | Units sold: {} | Price: ${:.2}\n",
                p.visits, p.quantity_sold, p.regular_price
            ));
        }
    }

    md.push_str("\n## Products with HIGH CONVERSION\n\n");
    if let Some(section) = report.section("high_conversion") {
        for p in section.rows.iter().take(10) {
            md.push_str(&format!(
                "- **{}** - Conversion: {}\n",
                p.name,
                conversion_label(p)
            ));
            md.push_str(&format!(
                "  - Visits: {} | Units sold: {} | Revenue: ${:.2}\n",
                p.visits, p.quantity_sold, p.total_revenue
            ));
        }
    }

    md.push_str("\n## Top 10 earners\n\n");
    if let Some(section) = report.section("top_earners") {
        for (i, p) in section.rows.iter().take(10).enumerate() {
            md.push_str(&format!("{}. **{}** - ${:.2}\n", i + 1, p.name, p.total_revenue));
            md.push_str(&format!(
                "   - {} units | {} visits | Conversion: {}\n",
                p.quantity_sold,
                p.visits,
                conversion_label(p)
            ));
        }
    }

    md.push_str("\n## Top 10 by volume\n\n");
    if let Some(section) = report.section("bestsellers_by_volume") {
        for (i, p) in section.rows.iter().take(10).enumerate() {
            md.push_str(&format!("{}. **{}** - {} units\n", i + 1, p.name, p.quantity_sold));
            md.push_str(&format!(
                "   - ${:.2} | {} visits | Conversion: {}\n",
                p.total_revenue,
                p.visits,
                conversion_label(p)
            ));
        }
    }

    md
}
