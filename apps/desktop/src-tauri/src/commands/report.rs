//! # Report and Export Commands
//!
//! Date-ranged sales summaries, the stock report, and CSV export. The
//! report structs from `ferro-db` are reshaped into camelCase DTOs; the
//! export commands write to a path chosen by the user in a save dialog.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;
use tauri::State;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::DbState;
use ferro_db::report::{SalesSummary, StockReport, TopProduct};

use super::product::ProductDto;

/// Sales summary DTO for the frontend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummaryDto {
    pub sale_count: i64,
    pub revenue_cents: i64,
    pub average_cents: i64,
    pub min_cents: i64,
    pub max_cents: i64,
    pub top_products: Vec<TopProductDto>,
}

/// One best-seller row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProductDto {
    pub product_id: i64,
    pub name: String,
    pub quantity_sold: i64,
    pub revenue_cents: i64,
    pub avg_unit_price_cents: i64,
}

impl From<TopProduct> for TopProductDto {
    fn from(t: TopProduct) -> Self {
        TopProductDto {
            product_id: t.product_id,
            name: t.name,
            quantity_sold: t.quantity_sold,
            revenue_cents: t.revenue_cents,
            avg_unit_price_cents: t.avg_unit_price_cents,
        }
    }
}

impl From<SalesSummary> for SalesSummaryDto {
    fn from(s: SalesSummary) -> Self {
        SalesSummaryDto {
            sale_count: s.sale_count,
            revenue_cents: s.revenue_cents,
            average_cents: s.average_cents,
            min_cents: s.min_cents,
            max_cents: s.max_cents,
            top_products: s.top_products.into_iter().map(TopProductDto::from).collect(),
        }
    }
}

/// Stock report DTO for the frontend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockReportDto {
    pub low_stock: Vec<LowStockDto>,
    pub inventory_value_cents: i64,
}

/// One low-stock row, product plus its alert tier.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockDto {
    pub product: ProductDto,
    /// "out" or "low".
    pub severity: String,
}

impl From<StockReport> for StockReportDto {
    fn from(r: StockReport) -> Self {
        StockReportDto {
            low_stock: r
                .low_stock
                .into_iter()
                .map(|entry| LowStockDto {
                    severity: match entry.severity {
                        ferro_core::StockSeverity::Out => "out".to_string(),
                        ferro_core::StockSeverity::Low => "low".to_string(),
                    },
                    product: ProductDto::from(entry.product),
                })
                .collect(),
            inventory_value_cents: r.inventory_value_cents,
        }
    }
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::validation(format!("{} must be a YYYY-MM-DD date", field)))
}

/// Sales figures for the inclusive date range `[start, end]`.
#[tauri::command]
pub async fn sales_summary(
    db: State<'_, DbState>,
    start: String,
    end: String,
) -> Result<SalesSummaryDto, ApiError> {
    debug!(start = %start, end = %end, "sales_summary command");

    let start = parse_date(&start, "start")?;
    let end = parse_date(&end, "end")?;

    let summary = db.inner_db().reports().sales_summary(start, end).await?;
    Ok(SalesSummaryDto::from(summary))
}

/// Low-stock alerts plus inventory valuation at cost.
#[tauri::command]
pub async fn stock_report(db: State<'_, DbState>) -> Result<StockReportDto, ApiError> {
    debug!("stock_report command");
    let report = db.inner_db().reports().stock_report().await?;
    Ok(StockReportDto::from(report))
}

/// Exports the product catalog to a CSV file. Returns the row count.
#[tauri::command]
pub async fn export_products_csv(db: State<'_, DbState>, path: String) -> Result<usize, ApiError> {
    let path = PathBuf::from(path);
    let rows = db.inner_db().exporter().products_csv(&path).await?;
    info!(path = %path.display(), rows = rows, "export_products_csv complete");
    Ok(rows)
}

/// Exports sales within `[start, end]` to a CSV file. Returns the row
/// count.
#[tauri::command]
pub async fn export_sales_csv(
    db: State<'_, DbState>,
    path: String,
    start: String,
    end: String,
) -> Result<usize, ApiError> {
    let start = parse_date(&start, "start")?;
    let end = parse_date(&end, "end")?;

    let path = PathBuf::from(path);
    let rows = db.inner_db().exporter().sales_csv(&path, start, end).await?;
    info!(path = %path.display(), rows = rows, "export_sales_csv complete");
    Ok(rows)
}

/// Exports all customers to a CSV file. Returns the row count.
#[tauri::command]
pub async fn export_customers_csv(db: State<'_, DbState>, path: String) -> Result<usize, ApiError> {
    let path = PathBuf::from(path);
    let rows = db.inner_db().exporter().customers_csv(&path).await?;
    info!(path = %path.display(), rows = rows, "export_customers_csv complete");
    Ok(rows)
}
