//! # Sale Commands
//!
//! Recording and listing sales. A sale request is validated first (at
//! least one line, positive quantities), then handed to the repository,
//! which checks stock and writes atomically. The returned DTO carries
//! the total frozen at sale time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tauri::State;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::DbState;
use ferro_core::validation::validate_new_sale;
use ferro_core::{NewSale, NewSaleItem, Sale, SaleItem};

/// Sale DTO for the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDto {
    pub id: i64,
    pub customer_id: Option<i64>,
    pub total_cents: i64,
    /// RFC 3339 timestamp.
    pub created_at: String,
}

impl From<Sale> for SaleDto {
    fn from(s: Sale) -> Self {
        SaleDto {
            id: s.id,
            customer_id: s.customer_id,
            total_cents: s.total_cents,
            created_at: s.created_at.to_rfc3339(),
        }
    }
}

/// Sale line DTO for the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemDto {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

impl From<SaleItem> for SaleItemDto {
    fn from(i: SaleItem) -> Self {
        SaleItemDto {
            id: i.id,
            product_id: i.product_id,
            quantity: i.quantity,
            unit_price_cents: i.unit_price_cents,
            line_total_cents: i.line_total_cents,
        }
    }
}

/// Sale form input from the frontend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleInput {
    pub customer_id: Option<i64>,
    pub items: Vec<SaleItemInput>,
}

/// One line of a sale being entered.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemInput {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl From<SaleInput> for NewSale {
    fn from(input: SaleInput) -> Self {
        NewSale {
            customer_id: input.customer_id,
            items: input
                .items
                .into_iter()
                .map(|i| NewSaleItem {
                    product_id: i.product_id,
                    quantity: i.quantity,
                    unit_price_cents: i.unit_price_cents,
                })
                .collect(),
        }
    }
}

/// Parses a `YYYY-MM-DD` date from the frontend.
fn parse_date(value: &str, field: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::validation(format!("{} must be a YYYY-MM-DD date", field)))
}

/// Records a sale: validates, checks stock, writes sale + items and
/// decrements inventory in one transaction.
#[tauri::command]
pub async fn record_sale(db: State<'_, DbState>, input: SaleInput) -> Result<SaleDto, ApiError> {
    debug!(items = input.items.len(), "record_sale command");

    let draft = NewSale::from(input);
    validate_new_sale(&draft)?;

    let sale = db.inner_db().sales().record(&draft).await?;
    info!(sale_id = %sale.id, total_cents = sale.total_cents, "Sale recorded");
    Ok(SaleDto::from(sale))
}

/// Lists sales, optionally restricted to an inclusive `[start, end]`
/// date range (`YYYY-MM-DD` strings).
#[tauri::command]
pub async fn list_sales(
    db: State<'_, DbState>,
    start: Option<String>,
    end: Option<String>,
) -> Result<Vec<SaleDto>, ApiError> {
    debug!(?start, ?end, "list_sales command");

    let sales = match (start, end) {
        (Some(start), Some(end)) => {
            let start = parse_date(&start, "start")?;
            let end = parse_date(&end, "end")?;
            db.inner_db().sales().list_between(start, end).await?
        }
        _ => db.inner_db().sales().list_all().await?,
    };

    Ok(sales.into_iter().map(SaleDto::from).collect())
}

/// Returns the line items of a sale.
#[tauri::command]
pub async fn list_sale_items(
    db: State<'_, DbState>,
    sale_id: i64,
) -> Result<Vec<SaleItemDto>, ApiError> {
    debug!(sale_id = %sale_id, "list_sale_items command");
    let items = db.inner_db().sales().items_for(sale_id).await?;
    Ok(items.into_iter().map(SaleItemDto::from).collect())
}
