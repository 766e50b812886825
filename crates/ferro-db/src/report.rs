//! # Report Queries
//!
//! Read-only aggregate queries over sales and inventory. Two reports:
//!
//! - `sales_summary(start, end)`: totals and best-sellers for a date range
//! - `stock_report()`: low-stock alerts plus inventory valuation at cost
//!
//! All aggregation happens in SQL; this layer only shapes the rows into
//! named structs for the frontend.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use ferro_core::{Product, StockSeverity};

// =============================================================================
// Report Types
// =============================================================================

/// Aggregate figures for sales within a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesSummary {
    /// Number of sales in the range.
    pub sale_count: i64,
    /// Sum of sale totals, in cents.
    pub revenue_cents: i64,
    /// revenue / sale_count, in cents. Zero when there were no sales.
    pub average_cents: i64,
    /// Smallest sale total in the range.
    pub min_cents: i64,
    /// Largest sale total in the range.
    pub max_cents: i64,
    /// Best sellers, ranked by units sold.
    pub top_products: Vec<TopProduct>,
}

/// One row of the best-seller ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopProduct {
    pub product_id: i64,
    pub name: String,
    /// Total units sold across the range.
    pub quantity_sold: i64,
    /// Total revenue from this product, in cents.
    pub revenue_cents: i64,
    /// revenue / quantity, in cents.
    pub avg_unit_price_cents: i64,
}

/// A product at or below its reorder threshold, tagged with its tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowStockEntry {
    pub product: Product,
    pub severity: StockSeverity,
}

/// Inventory health: alerts plus valuation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockReport {
    /// Products needing attention, most urgent first.
    pub low_stock: Vec<LowStockEntry>,
    /// Σ stock × purchase price over the whole catalog, in cents.
    /// Valuation is at cost, not sale price.
    pub inventory_value_cents: i64,
}

// =============================================================================
// Reports
// =============================================================================

/// Read-only report query layer.
#[derive(Debug, Clone)]
pub struct Reports {
    pool: SqlitePool,
}

impl Reports {
    /// Creates a new report query layer.
    pub fn new(pool: SqlitePool) -> Self {
        Reports { pool }
    }

    /// Sales figures for the inclusive date range `[start, end]`.
    pub async fn sales_summary(&self, start: NaiveDate, end: NaiveDate) -> DbResult<SalesSummary> {
        debug!(start = %start, end = %end, "Building sales summary");

        let start_s = start.format("%Y-%m-%d").to_string();
        let end_s = end.format("%Y-%m-%d").to_string();

        let (sale_count, revenue_cents, min_cents, max_cents): (i64, i64, i64, i64) =
            sqlx::query_as(
                r#"
                SELECT
                    COUNT(*),
                    COALESCE(SUM(total_cents), 0),
                    COALESCE(MIN(total_cents), 0),
                    COALESCE(MAX(total_cents), 0)
                FROM sales
                WHERE date(created_at) BETWEEN date(?1) AND date(?2)
                "#,
            )
            .bind(&start_s)
            .bind(&end_s)
            .fetch_one(&self.pool)
            .await?;

        let average_cents = if sale_count > 0 {
            revenue_cents / sale_count
        } else {
            0
        };

        let rows: Vec<(i64, String, i64, i64)> = sqlx::query_as(
            r#"
            SELECT
                si.product_id,
                p.name,
                SUM(si.quantity),
                SUM(si.line_total_cents)
            FROM sale_items si
            JOIN sales s ON s.id = si.sale_id
            JOIN products p ON p.id = si.product_id
            WHERE date(s.created_at) BETWEEN date(?1) AND date(?2)
            GROUP BY si.product_id, p.name
            ORDER BY SUM(si.quantity) DESC, p.name
            LIMIT 10
            "#,
        )
        .bind(&start_s)
        .bind(&end_s)
        .fetch_all(&self.pool)
        .await?;

        let top_products = rows
            .into_iter()
            .map(
                |(product_id, name, quantity_sold, revenue_cents)| TopProduct {
                    product_id,
                    name,
                    quantity_sold,
                    revenue_cents,
                    avg_unit_price_cents: if quantity_sold > 0 {
                        revenue_cents / quantity_sold
                    } else {
                        0
                    },
                },
            )
            .collect();

        Ok(SalesSummary {
            sale_count,
            revenue_cents,
            average_cents,
            min_cents,
            max_cents,
            top_products,
        })
    }

    /// Low-stock alerts and inventory valuation.
    pub async fn stock_report(&self) -> DbResult<StockReport> {
        debug!("Building stock report");

        let low = crate::repository::product::ProductRepository::new(self.pool.clone())
            .low_stock()
            .await?;

        let low_stock = low
            .into_iter()
            .map(|product| {
                let severity = if product.stock == 0 {
                    StockSeverity::Out
                } else {
                    StockSeverity::Low
                };
                LowStockEntry { product, severity }
            })
            .collect();

        // Zero-stock rows contribute 0 naturally
        let inventory_value_cents: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(stock * purchase_price_cents), 0) FROM products",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(StockReport {
            low_stock,
            inventory_value_cents,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use ferro_core::{NewProduct, NewSale, NewSaleItem};

    async fn seed_product(
        db: &Database,
        name: &str,
        stock: i64,
        min_stock: i64,
        purchase_cents: i64,
        sale_cents: i64,
    ) -> i64 {
        db.products()
            .insert(&NewProduct {
                name: name.to_string(),
                description: None,
                category: None,
                purchase_price_cents: purchase_cents,
                sale_price_cents: sale_cents,
                stock,
                min_stock,
                unit: "pz".to_string(),
                supplier_id: None,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_sales_summary() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let hammer = seed_product(&db, "Martillo", 50, 5, 5000, 9000).await;
        let nails = seed_product(&db, "Clavos", 500, 50, 10, 25).await;

        db.sales()
            .record(&NewSale {
                customer_id: None,
                items: vec![NewSaleItem {
                    product_id: hammer,
                    quantity: 2,
                    unit_price_cents: 9000,
                }],
            })
            .await
            .unwrap();
        db.sales()
            .record(&NewSale {
                customer_id: None,
                items: vec![
                    NewSaleItem {
                        product_id: nails,
                        quantity: 100,
                        unit_price_cents: 25,
                    },
                    NewSaleItem {
                        product_id: hammer,
                        quantity: 1,
                        unit_price_cents: 9000,
                    },
                ],
            })
            .await
            .unwrap();

        let today = Utc::now().date_naive();
        let summary = db.reports().sales_summary(today, today).await.unwrap();

        assert_eq!(summary.sale_count, 2);
        assert_eq!(summary.revenue_cents, 18000 + 2500 + 9000);
        assert_eq!(summary.min_cents, 11500);
        assert_eq!(summary.max_cents, 18000);
        assert_eq!(summary.average_cents, summary.revenue_cents / 2);

        // Nails lead by quantity even though hammers earned more
        assert_eq!(summary.top_products[0].name, "Clavos");
        assert_eq!(summary.top_products[0].quantity_sold, 100);
        assert_eq!(summary.top_products[1].name, "Martillo");
        assert_eq!(summary.top_products[1].quantity_sold, 3);
        assert_eq!(summary.top_products[1].revenue_cents, 27000);
        assert_eq!(summary.top_products[1].avg_unit_price_cents, 9000);
    }

    #[tokio::test]
    async fn test_empty_range_summary_is_all_zero() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let today = Utc::now().date_naive();
        let summary = db.reports().sales_summary(today, today).await.unwrap();

        assert_eq!(summary.sale_count, 0);
        assert_eq!(summary.revenue_cents, 0);
        assert_eq!(summary.average_cents, 0);
        assert_eq!(summary.min_cents, 0);
        assert_eq!(summary.max_cents, 0);
        assert!(summary.top_products.is_empty());
    }

    #[tokio::test]
    async fn test_stock_report() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        // 3 on hand at $50.00 cost, threshold 5: Low, contributes $150.00
        seed_product(&db, "Martillo", 3, 5, 5000, 9000).await;
        // Out of stock
        seed_product(&db, "Cinta métrica", 0, 2, 1500, 3500).await;
        // Healthy, still counts toward valuation
        seed_product(&db, "Clavos", 500, 50, 10, 25).await;

        let report = db.reports().stock_report().await.unwrap();

        assert_eq!(report.low_stock.len(), 2);
        // low_stock() orders by stock ascending
        assert_eq!(report.low_stock[0].product.name, "Cinta métrica");
        assert_eq!(report.low_stock[0].severity, StockSeverity::Out);
        assert_eq!(report.low_stock[1].product.name, "Martillo");
        assert_eq!(report.low_stock[1].severity, StockSeverity::Low);

        assert_eq!(report.inventory_value_cents, 3 * 5000 + 500 * 10);
    }
}
