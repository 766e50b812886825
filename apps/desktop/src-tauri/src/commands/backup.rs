//! # Backup Commands
//!
//! Database backup and restore. Restore is the one command that tears
//! the world down: it closes the connection pool, overwrites the live
//! database file and restarts the application so everything reopens
//! against the restored data.

use std::path::PathBuf;

use tauri::State;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::DbState;
use ferro_db::backup::BackupManager;

/// Copies the live database to `path` (WAL checkpointed first).
/// Returns the path actually written, which may carry a ` (n)` suffix
/// when `path` already existed.
#[tauri::command]
pub async fn create_backup(db: State<'_, DbState>, path: String) -> Result<String, ApiError> {
    let target = PathBuf::from(path);
    let written = db.inner_db().backups().create_backup(&target).await?;
    info!(path = %written.display(), "Backup created");
    Ok(written.display().to_string())
}

/// Suggested timestamped file name for the save dialog.
#[tauri::command]
pub fn default_backup_name() -> String {
    BackupManager::default_backup_name()
}

/// Replaces the live database with the backup at `path`, then restarts
/// the application.
///
/// ## Order Matters
/// 1. Validate + close the pool (no open handles on the db file)
/// 2. Overwrite the file, drop stale `-wal`/`-shm` siblings
/// 3. Restart, so startup reconnects and re-runs migrations
#[tauri::command]
pub async fn restore_backup(
    app: tauri::AppHandle,
    db: State<'_, DbState>,
    path: String,
) -> Result<(), ApiError> {
    let source = PathBuf::from(path);
    warn!(source = %source.display(), "Restoring backup, application will restart");

    let backups = db.inner_db().backups();
    db.inner_db().close().await;

    backups.restore_backup(&source)?;

    info!("Backup restored, restarting application");
    app.restart();
}
