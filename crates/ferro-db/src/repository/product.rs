//! # Product Repository
//!
//! Database operations for catalog products.
//!
//! ## Key Operations
//! - CRUD with named-field structs
//! - Case-insensitive substring search over name and category (query-level
//!   LIKE, not an in-memory filter)
//! - Low-stock listing for the report layer
//!
//! ## Search Semantics
//! ```text
//! search("mart")  → products whose name OR category contains "mart",
//!                   case-insensitively
//! search("")      → identical to list_all()
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use ferro_core::{NewProduct, Product};

/// Column list shared by every product read. Reads resolve the supplier
/// display name through a LEFT JOIN so the UI never does a second lookup.
const PRODUCT_COLUMNS: &str = r#"
    p.id,
    p.name,
    p.description,
    p.category,
    p.purchase_price_cents,
    p.sale_price_cents,
    p.stock,
    p.min_stock,
    p.unit,
    p.supplier_id,
    s.name AS supplier_name,
    p.created_at,
    p.updated_at
FROM products p
LEFT JOIN suppliers s ON s.id = p.supplier_id
"#;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products, ordered by name.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} ORDER BY p.name");
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Searches products by case-insensitive substring against name or
    /// category.
    ///
    /// ## Arguments
    /// * `term` - Search term; an empty (or whitespace) term returns all
    ///   products, matching `list_all()`
    ///
    /// LIKE wildcards in the term are escaped, so "100%" matches literally.
    pub async fn search(&self, term: &str) -> DbResult<Vec<Product>> {
        let term = term.trim();

        debug!(term = %term, "Searching products");

        if term.is_empty() {
            return self.list_all().await;
        }

        let escaped = term
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = format!("%{escaped}%");

        // LIKE is case-insensitive for ASCII in SQLite
        let sql = format!(
            r#"SELECT {PRODUCT_COLUMNS}
            WHERE p.name LIKE ?1 ESCAPE '\'
               OR p.category LIKE ?1 ESCAPE '\'
            ORDER BY p.name"#
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} WHERE p.id = ?1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - the stored row with its generated id
    /// * `Err(DbError::ForeignKeyViolation)` - supplier_id doesn't exist
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(name = %product.name, "Inserting product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO products (
                name, description, category,
                purchase_price_cents, sale_price_cents,
                stock, min_stock, unit, supplier_id,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(product.purchase_price_cents)
        .bind(product.sale_price_cents)
        .bind(product.stock)
        .bind(product.min_stock)
        .bind(&product.unit)
        .bind(product.supplier_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| name_product_fk(e.into()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Updates an existing product in place by id.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - the id doesn't exist (stale data)
    pub async fn update(&self, id: i64, product: &NewProduct) -> DbResult<()> {
        debug!(id = %id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                category = ?4,
                purchase_price_cents = ?5,
                sale_price_cents = ?6,
                stock = ?7,
                min_stock = ?8,
                unit = ?9,
                supplier_id = ?10,
                updated_at = ?11
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(product.purchase_price_cents)
        .bind(product.sale_price_cents)
        .bind(product.stock)
        .bind(product.min_stock)
        .bind(&product.unit)
        .bind(product.supplier_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| name_product_fk(e.into()))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes a product by id.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - sale history still
    ///   references this product; the message names the relationship so the
    ///   UI can show it as-is
    /// * `Err(DbError::NotFound)` - the id doesn't exist
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::ForeignKeyViolation { .. } => DbError::foreign_key(
                    "product is referenced by recorded sales and cannot be deleted",
                ),
                other => other,
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Lists products at or below their reorder threshold
    /// (stock <= min_stock), the emptiest first.
    pub async fn low_stock(&self) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} WHERE p.stock <= p.min_stock ORDER BY p.stock, p.name"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Rewraps a foreign key failure on product writes with a message naming
/// the supplier relationship.
fn name_product_fk(err: DbError) -> DbError {
    match err {
        DbError::ForeignKeyViolation { .. } => {
            DbError::foreign_key("supplier_id does not reference an existing supplier")
        }
        other => other,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use ferro_core::NewSupplier;

    fn martillo() -> NewProduct {
        NewProduct {
            name: "Martillo".to_string(),
            description: Some("Martillo de carpintero".to_string()),
            category: Some("Herramientas".to_string()),
            purchase_price_cents: 5000,
            sale_price_cents: 9000,
            stock: 3,
            min_stock: 5,
            unit: "pz".to_string(),
            supplier_id: None,
        }
    }

    fn tornillos() -> NewProduct {
        NewProduct {
            name: "Tornillos 3/4".to_string(),
            description: None,
            category: Some("Fijaciones".to_string()),
            purchase_price_cents: 20,
            sale_price_cents: 50,
            stock: 500,
            min_stock: 100,
            unit: "pz".to_string(),
            supplier_id: None,
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.products();

        let stored = repo.insert(&martillo()).await.unwrap();
        assert!(stored.id > 0);
        assert_eq!(stored.name, "Martillo");
        assert_eq!(stored.stock, 3);

        let fetched = repo.get_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched, stored);

        assert!(repo.get_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_resolves_supplier_name() {
        let db = test_db().await;

        let supplier = db
            .suppliers()
            .insert(&NewSupplier {
                name: "Aceros del Norte".to_string(),
                contact_name: None,
                phone: None,
                email: None,
                address: None,
            })
            .await
            .unwrap();

        let mut draft = martillo();
        draft.supplier_id = Some(supplier.id);
        let stored = db.products().insert(&draft).await.unwrap();

        assert_eq!(stored.supplier_name.as_deref(), Some("Aceros del Norte"));
    }

    #[tokio::test]
    async fn test_insert_unknown_supplier_is_integrity_error() {
        let db = test_db().await;

        let mut draft = martillo();
        draft.supplier_id = Some(424242);
        let err = db.products().insert(&draft).await.unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_search_matches_name_and_category() {
        let db = test_db().await;
        let repo = db.products();
        repo.insert(&martillo()).await.unwrap();
        repo.insert(&tornillos()).await.unwrap();

        // Case-insensitive name match
        let hits = repo.search("MARTI").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Martillo");

        // Category match
        let hits = repo.search("fijacion").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Tornillos 3/4");

        // No match
        assert!(repo.search("taladro").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_search_equals_list_all() {
        let db = test_db().await;
        let repo = db.products();
        repo.insert(&martillo()).await.unwrap();
        repo.insert(&tornillos()).await.unwrap();

        let all = repo.list_all().await.unwrap();
        let searched = repo.search("   ").await.unwrap();
        assert_eq!(all, searched);
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_update() {
        let db = test_db().await;
        let repo = db.products();
        let stored = repo.insert(&martillo()).await.unwrap();

        let mut changed = martillo();
        changed.stock = 12;
        changed.sale_price_cents = 9500;
        repo.update(stored.id, &changed).await.unwrap();

        let fetched = repo.get_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.stock, 12);
        assert_eq!(fetched.sale_price_cents, 9500);

        // Stale id surfaces as NotFound
        let err = repo.update(9999, &changed).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let repo = db.products();
        let stored = repo.insert(&martillo()).await.unwrap();

        repo.delete(stored.id).await.unwrap();
        assert!(repo.get_by_id(stored.id).await.unwrap().is_none());

        let err = repo.delete(stored.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_low_stock_membership() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert(&martillo()).await.unwrap(); // 3 <= 5: low
        repo.insert(&tornillos()).await.unwrap(); // 500 > 100: fine

        let mut empty = martillo();
        empty.name = "Cinta métrica".to_string();
        empty.stock = 0;
        repo.insert(&empty).await.unwrap(); // 0: out

        let low = repo.low_stock().await.unwrap();
        let names: Vec<&str> = low.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Cinta métrica", "Martillo"]);
    }
}
