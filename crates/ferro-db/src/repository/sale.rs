//! # Sale Repository
//!
//! Recording a sale is the one multi-table write in the system, and it is
//! atomic: header, line items, and stock decrements all happen inside a
//! single transaction. If any product is missing or short on stock the
//! whole sale rolls back and inventory is untouched.
//!
//! ## Write Flow
//! ```text
//! record(NewSale)
//!     │
//!     ├── BEGIN
//!     ├── for each line: SELECT stock ──► NotFound / InsufficientStock?
//!     ├── INSERT sales (total frozen from the lines)
//!     ├── for each line: INSERT sale_items + UPDATE products.stock
//!     └── COMMIT (or ROLLBACK on any error)
//! ```

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use ferro_core::{NewSale, Sale, SaleItem};

const SALE_COLUMNS: &str = "id, customer_id, total_cents, created_at FROM sales";

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale atomically.
    ///
    /// Checks stock for every line before writing anything; the first
    /// failing line aborts the whole sale.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - a line references a product that
    ///   doesn't exist
    /// * `Err(DbError::InsufficientStock)` - a line asks for more units
    ///   than are on hand
    pub async fn record(&self, sale: &NewSale) -> DbResult<Sale> {
        debug!(items = sale.items.len(), "Recording sale");

        let mut tx = self.pool.begin().await?;

        for item in &sale.items {
            let row: Option<(String, i64)> =
                sqlx::query_as("SELECT name, stock FROM products WHERE id = ?1")
                    .bind(item.product_id)
                    .fetch_optional(&mut *tx)
                    .await?;

            let (name, stock) = match row {
                Some(row) => row,
                None => return Err(DbError::not_found("Product", item.product_id)),
            };

            if stock < item.quantity {
                return Err(DbError::InsufficientStock {
                    name,
                    available: stock,
                    requested: item.quantity,
                });
            }
        }

        let now = Utc::now();
        let total_cents = sale.total_cents();

        let result = sqlx::query(
            "INSERT INTO sales (customer_id, total_cents, created_at) VALUES (?1, ?2, ?3)",
        )
        .bind(sale.customer_id)
        .bind(total_cents)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let sale_id = result.last_insert_rowid();

        for item in &sale.items {
            sqlx::query(
                r#"
                INSERT INTO sale_items (sale_id, product_id, quantity, unit_price_cents, line_total_cents)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(sale_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .bind(item.line_total_cents())
            .execute(&mut *tx)
            .await?;

            sqlx::query(
                "UPDATE products SET stock = stock - ?2, updated_at = ?3 WHERE id = ?1",
            )
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(sale_id = %sale_id, total_cents = total_cents, "Sale recorded");

        let sql = format!("SELECT {SALE_COLUMNS} WHERE id = ?1");
        let stored = sqlx::query_as::<_, Sale>(&sql)
            .bind(sale_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Sale", sale_id))?;

        Ok(stored)
    }

    /// Lists all sales, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<Sale>> {
        let sql = format!("SELECT {SALE_COLUMNS} ORDER BY created_at DESC, id DESC");
        let sales = sqlx::query_as::<_, Sale>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    /// Gets a sale by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sql = format!("SELECT {SALE_COLUMNS} WHERE id = ?1");
        let sale = sqlx::query_as::<_, Sale>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    /// Lists sales whose calendar date falls within [start, end].
    ///
    /// Both ends are inclusive: a sale at 23:59 on `end` is included.
    pub async fn list_between(&self, start: NaiveDate, end: NaiveDate) -> DbResult<Vec<Sale>> {
        let sql = format!(
            "SELECT {SALE_COLUMNS} \
             WHERE date(created_at) BETWEEN date(?1) AND date(?2) \
             ORDER BY created_at DESC, id DESC"
        );
        let sales = sqlx::query_as::<_, Sale>(&sql)
            .bind(start.format("%Y-%m-%d").to_string())
            .bind(end.format("%Y-%m-%d").to_string())
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    /// Returns the line items of a sale.
    pub async fn items_for(&self, sale_id: i64) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, product_id, quantity, unit_price_cents, line_total_cents
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
