//! # CSV Export
//!
//! Writes products, sales and customers to CSV files for use in
//! spreadsheets. Output is UTF-8 with a human-readable header row, one
//! row per entity, and money rendered with two decimals. Quoting and
//! escaping (embedded commas, quotes, line breaks) are handled by the
//! `csv` crate.

use std::path::Path;

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;
use crate::repository::product::ProductRepository;
use ferro_core::Money;

/// CSV export over the live database.
#[derive(Debug, Clone)]
pub struct Exporter {
    pool: SqlitePool,
}

impl Exporter {
    /// Creates a new Exporter.
    pub fn new(pool: SqlitePool) -> Self {
        Exporter { pool }
    }

    /// Writes the full product catalog to `path`. Returns the row count.
    pub async fn products_csv(&self, path: &Path) -> DbResult<usize> {
        let products = ProductRepository::new(self.pool.clone()).list_all().await?;

        let mut w = csv::Writer::from_path(path)?;
        w.write_record([
            "ID",
            "Nombre",
            "Descripción",
            "Categoría",
            "Precio Compra",
            "Precio Venta",
            "Stock",
            "Stock Mínimo",
            "Unidad",
            "Proveedor",
        ])?;

        let count = products.len();
        for p in products {
            w.write_record([
                p.id.to_string(),
                p.name,
                p.description.unwrap_or_default(),
                p.category.unwrap_or_default(),
                Money::from_cents(p.purchase_price_cents).to_decimal_string(),
                Money::from_cents(p.sale_price_cents).to_decimal_string(),
                p.stock.to_string(),
                p.min_stock.to_string(),
                p.unit,
                p.supplier_name.unwrap_or_default(),
            ])?;
        }

        w.flush()?;
        info!(path = %path.display(), rows = count, "Exported products CSV");
        Ok(count)
    }

    /// Writes sales within `[start, end]` (inclusive) to `path`.
    /// Returns the row count.
    pub async fn sales_csv(&self, path: &Path, start: NaiveDate, end: NaiveDate) -> DbResult<usize> {
        let rows: Vec<(i64, String, Option<String>, i64)> = sqlx::query_as(
            r#"
            SELECT s.id, s.created_at, c.name, s.total_cents
            FROM sales s
            LEFT JOIN customers c ON c.id = s.customer_id
            WHERE date(s.created_at) BETWEEN date(?1) AND date(?2)
            ORDER BY s.created_at, s.id
            "#,
        )
        .bind(start.format("%Y-%m-%d").to_string())
        .bind(end.format("%Y-%m-%d").to_string())
        .fetch_all(&self.pool)
        .await?;

        let mut w = csv::Writer::from_path(path)?;
        w.write_record(["ID", "Fecha", "Cliente", "Total"])?;

        let count = rows.len();
        for (id, created_at, customer, total_cents) in rows {
            w.write_record([
                id.to_string(),
                created_at,
                customer.unwrap_or_else(|| "Público general".to_string()),
                Money::from_cents(total_cents).to_decimal_string(),
            ])?;
        }

        w.flush()?;
        info!(path = %path.display(), rows = count, "Exported sales CSV");
        Ok(count)
    }

    /// Writes all customers to `path`. Returns the row count.
    pub async fn customers_csv(&self, path: &Path) -> DbResult<usize> {
        let rows: Vec<(i64, String, Option<String>, Option<String>, Option<String>)> =
            sqlx::query_as(
                "SELECT id, name, phone, email, address FROM customers ORDER BY name",
            )
            .fetch_all(&self.pool)
            .await?;

        let mut w = csv::Writer::from_path(path)?;
        w.write_record(["ID", "Nombre", "Teléfono", "Email", "Dirección"])?;

        let count = rows.len();
        for (id, name, phone, email, address) in rows {
            w.write_record([
                id.to_string(),
                name,
                phone.unwrap_or_default(),
                email.unwrap_or_default(),
                address.unwrap_or_default(),
            ])?;
        }

        w.flush()?;
        info!(path = %path.display(), rows = count, "Exported customers CSV");
        Ok(count)
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
    use ferro_core::{NewCustomer, NewProduct, NewSale, NewSaleItem};

    #[tokio::test]
    async fn test_products_csv_shape_and_escaping() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.products()
            .insert(&NewProduct {
                name: "Tornillos, caja 100".to_string(),
                description: Some("Cabeza \"plana\"".to_string()),
                category: None,
                purchase_price_cents: 4550,
                sale_price_cents: 7999,
                stock: 10,
                min_stock: 2,
                unit: "caja".to_string(),
                supplier_id: None,
            })
            .await
            .unwrap();
        db.products()
            .insert(&NewProduct {
                name: "Martillo".to_string(),
                description: None,
                category: Some("Herramientas".to_string()),
                purchase_price_cents: 5000,
                sale_price_cents: 9000,
                stock: 3,
                min_stock: 5,
                unit: "pz".to_string(),
                supplier_id: None,
            })
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("productos.csv");

        let rows = db.exporter().products_csv(&path).await.unwrap();
        assert_eq!(rows, 2);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        // K entities, K + 1 lines
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID,Nombre"));
        // list_all orders by name, Martillo first
        assert!(lines[1].contains("Martillo"));
        assert!(lines[1].contains("50.00"));
        assert!(lines[1].contains("90.00"));
        assert!(lines[2].contains("\"Tornillos, caja 100\""));
        assert!(lines[2].contains("\"Cabeza \"\"plana\"\"\""));
        assert!(lines[2].contains("45.50"));
    }

    #[tokio::test]
    async fn test_products_csv_reparses_to_same_values() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.products()
            .insert(&NewProduct {
                name: "Cinta, 5m".to_string(),
                description: Some("línea\nrota".to_string()),
                category: None,
                purchase_price_cents: 1500,
                sale_price_cents: 3500,
                stock: 4,
                min_stock: 2,
                unit: "pz".to_string(),
                supplier_id: None,
            })
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("productos.csv");
        db.exporter().products_csv(&path).await.unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[1], "Cinta, 5m");
        assert_eq!(&record[2], "línea\nrota");
        assert_eq!(&record[4], "15.00");
        assert_eq!(&record[6], "4");
    }

    #[tokio::test]
    async fn test_sales_csv_in_range() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let product = db
            .products()
            .insert(&NewProduct {
                name: "Martillo".to_string(),
                description: None,
                category: None,
                purchase_price_cents: 5000,
                sale_price_cents: 9000,
                stock: 10,
                min_stock: 2,
                unit: "pz".to_string(),
                supplier_id: None,
            })
            .await
            .unwrap();
        let customer = db
            .customers()
            .insert(&NewCustomer {
                name: "Ana".to_string(),
                phone: None,
                email: None,
                address: None,
            })
            .await
            .unwrap();

        db.sales()
            .record(&NewSale {
                customer_id: Some(customer.id),
                items: vec![NewSaleItem {
                    product_id: product.id,
                    quantity: 1,
                    unit_price_cents: 9000,
                }],
            })
            .await
            .unwrap();
        db.sales()
            .record(&NewSale {
                customer_id: None,
                items: vec![NewSaleItem {
                    product_id: product.id,
                    quantity: 2,
                    unit_price_cents: 9000,
                }],
            })
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ventas.csv");

        let today = Utc::now().date_naive();
        let rows = db.exporter().sales_csv(&path, today, today).await.unwrap();
        assert_eq!(rows, 2);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ID,Fecha,Cliente,Total");
        assert!(lines[1].contains("Ana"));
        assert!(lines[1].contains("90.00"));
        assert!(lines[2].contains("Público general"));
        assert!(lines[2].contains("180.00"));

        // A range before the sales yields only the header
        let earlier = today.pred_opt().unwrap();
        let empty_path = dir.path().join("vacio.csv");
        let rows = db
            .exporter()
            .sales_csv(&empty_path, earlier, earlier)
            .await
            .unwrap();
        assert_eq!(rows, 0);
        let content = std::fs::read_to_string(&empty_path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[tokio::test]
    async fn test_customers_csv() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.customers()
            .insert(&NewCustomer {
                name: "López, María".to_string(),
                phone: Some("555-0142".to_string()),
                email: None,
                address: None,
            })
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clientes.csv");

        let rows = db.exporter().customers_csv(&path).await.unwrap();
        assert_eq!(rows, 1);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("\"López, María\""));
    }
}
