//! Store configuration (name, phone, address), kept as a single row that
//! the initial migration seeds. Reads always succeed; saves overwrite in
//! place.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use ferro_core::StoreInfo;

/// Repository for the single store configuration row.
#[derive(Debug, Clone)]
pub struct StoreInfoRepository {
    pool: SqlitePool,
}

impl StoreInfoRepository {
    /// Creates a new StoreInfoRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StoreInfoRepository { pool }
    }

    /// Returns the store configuration.
    pub async fn get(&self) -> DbResult<StoreInfo> {
        let info = sqlx::query_as::<_, StoreInfo>(
            "SELECT name, phone, address FROM store_info WHERE id = 1",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(info)
    }

    /// Saves the store configuration, replacing the current values.
    pub async fn save(&self, info: &StoreInfo) -> DbResult<()> {
        debug!(name = %info.name, "Saving store info");

        sqlx::query(
            r#"
            INSERT INTO store_info (id, name, phone, address)
            VALUES (1, ?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                phone = excluded.phone,
                address = excluded.address
            "#,
        )
        .bind(&info.name)
        .bind(&info.phone)
        .bind(&info.address)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_seeded_row_and_save() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.store_info();

        // Migration seeds the row with a default store name, so get never
        // fails on a fresh database
        let seeded = repo.get().await.unwrap();
        assert_eq!(seeded.name, "Ferretería");
        assert_eq!(seeded.phone, "");

        let mine = StoreInfo {
            name: "Ferretería El Tornillo".to_string(),
            phone: "555-0123".to_string(),
            address: "Calle Principal 45".to_string(),
        };
        repo.save(&mine).await.unwrap();

        assert_eq!(repo.get().await.unwrap(), mine);

        // Saving again overwrites rather than adding a second row
        repo.save(&mine).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM store_info")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
