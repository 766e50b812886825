//! # Supplier Repository
//!
//! Database operations for suppliers. Deletion is referential-integrity
//! safe: a supplier referenced by any product cannot be removed, and the
//! violation surfaces as a distinct error kind naming the relationship.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use ferro_core::{NewSupplier, Supplier};

const SUPPLIER_COLUMNS: &str =
    "id, name, contact_name, phone, email, address, created_at FROM suppliers";

/// Repository for supplier database operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Lists all suppliers, ordered by name.
    pub async fn list_all(&self) -> DbResult<Vec<Supplier>> {
        let sql = format!("SELECT {SUPPLIER_COLUMNS} ORDER BY name");
        let suppliers = sqlx::query_as::<_, Supplier>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(suppliers)
    }

    /// Gets a supplier by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Supplier>> {
        let sql = format!("SELECT {SUPPLIER_COLUMNS} WHERE id = ?1");
        let supplier = sqlx::query_as::<_, Supplier>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(supplier)
    }

    /// Inserts a new supplier and returns the stored row.
    pub async fn insert(&self, supplier: &NewSupplier) -> DbResult<Supplier> {
        debug!(name = %supplier.name, "Inserting supplier");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO suppliers (name, contact_name, phone, email, address, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&supplier.name)
        .bind(&supplier.contact_name)
        .bind(&supplier.phone)
        .bind(&supplier.email)
        .bind(&supplier.address)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Supplier", id))
    }

    /// Updates an existing supplier by id.
    pub async fn update(&self, id: i64, supplier: &NewSupplier) -> DbResult<()> {
        debug!(id = %id, "Updating supplier");

        let result = sqlx::query(
            r#"
            UPDATE suppliers SET
                name = ?2,
                contact_name = ?3,
                phone = ?4,
                email = ?5,
                address = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&supplier.name)
        .bind(&supplier.contact_name)
        .bind(&supplier.phone)
        .bind(&supplier.email)
        .bind(&supplier.address)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", id));
        }

        Ok(())
    }

    /// Deletes a supplier by id.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - one or more products still
    ///   reference this supplier (ON DELETE RESTRICT)
    /// * `Err(DbError::NotFound)` - the id doesn't exist
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting supplier");

        let result = sqlx::query("DELETE FROM suppliers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::ForeignKeyViolation { .. } => DbError::foreign_key(
                    "supplier is still assigned to products and cannot be deleted",
                ),
                other => other,
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use ferro_core::NewProduct;

    fn acme() -> NewSupplier {
        NewSupplier {
            name: "Ferretera ACME".to_string(),
            contact_name: Some("Juan Pérez".to_string()),
            phone: Some("555-0100".to_string()),
            email: Some("ventas@acme.example".to_string()),
            address: None,
        }
    }

    #[tokio::test]
    async fn test_crud() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.suppliers();

        let stored = repo.insert(&acme()).await.unwrap();
        assert_eq!(stored.name, "Ferretera ACME");

        let mut changed = acme();
        changed.phone = Some("555-0199".to_string());
        repo.update(stored.id, &changed).await.unwrap();

        let fetched = repo.get_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.phone.as_deref(), Some("555-0199"));

        repo.delete(stored.id).await.unwrap();
        assert!(repo.get_by_id(stored.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_referenced_supplier_fails() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let supplier = db.suppliers().insert(&acme()).await.unwrap();
        db.products()
            .insert(&NewProduct {
                name: "Clavos".to_string(),
                description: None,
                category: None,
                purchase_price_cents: 10,
                sale_price_cents: 25,
                stock: 100,
                min_stock: 20,
                unit: "pz".to_string(),
                supplier_id: Some(supplier.id),
            })
            .await
            .unwrap();

        let err = db.suppliers().delete(supplier.id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        // An unreferenced supplier deletes fine
        let other = db
            .suppliers()
            .insert(&NewSupplier {
                name: "Proveedora del Sur".to_string(),
                contact_name: None,
                phone: None,
                email: None,
                address: None,
            })
            .await
            .unwrap();
        db.suppliers().delete(other.id).await.unwrap();
    }
}
