//! # Backup and Restore
//!
//! File-level backup of the SQLite database.
//!
//! ## Backup
//! The WAL is checkpointed (`PRAGMA wal_checkpoint(TRUNCATE)`) before the
//! file copy, so the copied file is a complete snapshot with no sidecar
//! files required. An existing target is never overwritten; a ` (n)`
//! suffix is appended before the extension instead.
//!
//! ## Restore
//! Restore validates the SQLite magic header, then replaces the live
//! database file and deletes stale `-wal`/`-shm` siblings. The pool MUST
//! be closed before calling restore, and the application restarted
//! afterward so every connection reopens against the restored file.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::Local;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::{DbError, DbResult};

/// First bytes of every SQLite 3 database file.
const SQLITE_MAGIC: &[u8; 16] = b"SQLite format 3\0";

/// Manages file-level backup and restore for one database file.
#[derive(Debug, Clone)]
pub struct BackupManager {
    pool: SqlitePool,
    db_path: PathBuf,
}

impl BackupManager {
    /// Creates a backup manager for the database behind `pool` stored at
    /// `db_path`.
    pub fn new(pool: SqlitePool, db_path: PathBuf) -> Self {
        BackupManager { pool, db_path }
    }

    /// Suggested file name for a new backup, timestamped to the second.
    pub fn default_backup_name() -> String {
        Local::now()
            .format("ferrostock_backup_%Y%m%d_%H%M%S.db")
            .to_string()
    }

    /// Copies the live database file to `target`.
    ///
    /// Returns the path actually written, which differs from `target`
    /// when a collision suffix was needed.
    pub async fn create_backup(&self, target: &Path) -> DbResult<PathBuf> {
        info!(target = %target.display(), "Creating backup");

        // Fold the WAL into the main file so the copy is self-contained
        sqlx::query("PRAGMA wal_checkpoint(TRUNCATE)")
            .execute(&self.pool)
            .await?;

        let destination = unused_path(target);
        fs::copy(&self.db_path, &destination)?;

        info!(path = %destination.display(), "Backup written");
        Ok(destination)
    }

    /// Replaces the live database file with the backup at `source`.
    ///
    /// The caller must close the pool first and restart the application
    /// afterward.
    ///
    /// ## Returns
    /// * `Err(DbError::Storage)` - `source` is missing, unreadable, or not
    ///   a SQLite database
    pub fn restore_backup(&self, source: &Path) -> DbResult<()> {
        info!(source = %source.display(), "Restoring backup");

        validate_sqlite_file(source)?;

        fs::copy(source, &self.db_path)?;

        // Stale WAL/SHM files belong to the replaced database
        for suffix in ["-wal", "-shm"] {
            let mut sidecar = self.db_path.as_os_str().to_owned();
            sidecar.push(suffix);
            let sidecar = PathBuf::from(sidecar);
            if sidecar.exists() {
                if let Err(e) = fs::remove_file(&sidecar) {
                    warn!(path = %sidecar.display(), error = %e, "Failed to remove sidecar file");
                }
            }
        }

        info!("Backup restored, application restart required");
        Ok(())
    }
}

/// Returns `target` if free, otherwise the first `name (n).ext` variant
/// that doesn't exist yet.
fn unused_path(target: &Path) -> PathBuf {
    if !target.exists() {
        return target.to_path_buf();
    }

    let stem = target
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = target.extension().map(|e| e.to_string_lossy().into_owned());
    let parent = target.parent().unwrap_or_else(|| Path::new(""));

    for n in 1u32.. {
        let candidate_name = match &extension {
            Some(ext) => format!("{stem} ({n}).{ext}"),
            None => format!("{stem} ({n})"),
        };
        let candidate = parent.join(candidate_name);
        if !candidate.exists() {
            return candidate;
        }
    }

    unreachable!("ran out of collision suffixes")
}

/// Checks the 16-byte SQLite magic header.
fn validate_sqlite_file(path: &Path) -> DbResult<()> {
    let mut file = fs::File::open(path)?;
    let mut header = [0u8; 16];
    file.read_exact(&mut header).map_err(|_| {
        DbError::Storage(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{} is too small to be a SQLite database", path.display()),
        ))
    })?;

    if &header != SQLITE_MAGIC {
        return Err(DbError::Storage(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{} is not a SQLite database", path.display()),
        )));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use ferro_core::NewProduct;

    fn hammer() -> NewProduct {
        NewProduct {
            name: "Martillo".to_string(),
            description: None,
            category: None,
            purchase_price_cents: 5000,
            sale_price_cents: 9000,
            stock: 10,
            min_stock: 2,
            unit: "pz".to_string(),
            supplier_id: None,
        }
    }

    #[test]
    fn test_default_backup_name_format() {
        let name = BackupManager::default_backup_name();
        assert!(name.starts_with("ferrostock_backup_"));
        assert!(name.ends_with(".db"));
        // ferrostock_backup_YYYYMMDD_HHMMSS.db
        assert_eq!(name.len(), "ferrostock_backup_20250101_120000.db".len());
    }

    #[test]
    fn test_unused_path_appends_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("copia.db");

        assert_eq!(unused_path(&target), target);

        std::fs::write(&target, b"x").unwrap();
        assert_eq!(unused_path(&target), dir.path().join("copia (1).db"));

        std::fs::write(dir.path().join("copia (1).db"), b"x").unwrap();
        assert_eq!(unused_path(&target), dir.path().join("copia (2).db"));
    }

    #[tokio::test]
    async fn test_backup_restore_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("ferrostock.db");

        let db = Database::new(DbConfig::new(&db_path)).await.unwrap();
        let stored = db.products().insert(&hammer()).await.unwrap();

        let backup_path = db
            .backups()
            .create_backup(&dir.path().join("copia.db"))
            .await
            .unwrap();

        // Mutate after the backup, then roll the file back
        db.products().delete(stored.id).await.unwrap();
        assert_eq!(db.products().count().await.unwrap(), 0);

        let backups = db.backups();
        db.close().await;
        backups.restore_backup(&backup_path).unwrap();

        let reopened = Database::new(DbConfig::new(&db_path)).await.unwrap();
        let products = reopened.products().list_all().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Martillo");
    }

    #[tokio::test]
    async fn test_restore_rejects_non_sqlite_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("ferrostock.db");
        let db = Database::new(DbConfig::new(&db_path)).await.unwrap();

        let bogus = dir.path().join("notas.txt");
        std::fs::write(&bogus, "esto no es una base de datos").unwrap();

        let err = db.backups().restore_backup(&bogus).unwrap_err();
        assert!(matches!(err, DbError::Storage(_)));
    }
}
