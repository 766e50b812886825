//! # FerroStock Desktop Library
//!
//! Core library for the FerroStock desktop application.
//! This is the main entry point that configures and runs the Tauri app.
//!
//! ## Module Organization
//! ```text
//! ferro_desktop_lib/
//! ├── lib.rs           ◄─── You are here (Tauri setup & run)
//! ├── state/
//! │   ├── mod.rs       ◄─── State type exports
//! │   └── db.rs        ◄─── Database state wrapper
//! ├── commands/
//! │   ├── mod.rs       ◄─── Command exports
//! │   ├── product.rs   ◄─── Product CRUD + search + low stock
//! │   ├── supplier.rs  ◄─── Supplier CRUD
//! │   ├── customer.rs  ◄─── Customer CRUD
//! │   ├── sale.rs      ◄─── Sale recording and listing
//! │   ├── report.rs    ◄─── Reports + CSV export
//! │   ├── backup.rs    ◄─── Backup create/restore
//! │   └── settings.rs  ◄─── Store info get/save
//! └── error.rs         ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use directories::ProjectDirs;
use std::path::PathBuf;
use tauri::Manager;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ferro_db::{Database, DbConfig};
use state::DbState;

/// Runs the Tauri application.
///
/// ## Startup Sequence
/// 1. Initialize tracing (logging)
/// 2. Determine database path (platform app data directory)
/// 3. Connect to database & run migrations
/// 4. `app.manage(DbState)`
/// 5. Register commands and launch the window
pub fn run() {
    init_tracing();

    info!("Starting FerroStock Desktop Application");

    tauri::Builder::default()
        // Setup hook runs before the app starts
        .setup(|app| {
            let db_path = get_database_path(app)?;
            info!(?db_path, "Database path determined");

            // Initialize database (blocking in setup, async in runtime)
            let db = tauri::async_runtime::block_on(async {
                let config = DbConfig::new(db_path);
                Database::new(config).await
            })?;

            info!("Database connected and migrations applied");

            app.manage(DbState::new(db));

            info!("State initialized");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Product commands
            commands::product::list_products,
            commands::product::search_products,
            commands::product::get_product,
            commands::product::create_product,
            commands::product::update_product,
            commands::product::delete_product,
            commands::product::list_low_stock,
            // Supplier commands
            commands::supplier::list_suppliers,
            commands::supplier::create_supplier,
            commands::supplier::update_supplier,
            commands::supplier::delete_supplier,
            // Customer commands
            commands::customer::list_customers,
            commands::customer::create_customer,
            commands::customer::update_customer,
            commands::customer::delete_customer,
            // Sale commands
            commands::sale::record_sale,
            commands::sale::list_sales,
            commands::sale::list_sale_items,
            // Report & export commands
            commands::report::sales_summary,
            commands::report::stock_report,
            commands::report::export_products_csv,
            commands::report::export_sales_csv,
            commands::report::export_customers_csv,
            // Backup commands
            commands::backup::create_backup,
            commands::backup::restore_backup,
            commands::backup::default_backup_name,
            // Settings commands
            commands::settings::get_store_info,
            commands::settings::save_store_info,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=ferro=trace` - Show trace for ferro crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ferro=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.ferrostock.app/ferrostock.db`
/// - **Windows**: `%APPDATA%\ferrostock\app\ferrostock.db`
/// - **Linux**: `~/.local/share/ferrostock/ferrostock.db`
///
/// ## Development Override
/// Set the `FERRO_DB_PATH` environment variable to use a custom path.
fn get_database_path(_app: &tauri::App) -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Check for override
    if let Ok(path) = std::env::var("FERRO_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("com", "ferrostock", "app")
        .ok_or("Could not determine app data directory")?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("ferrostock.db"))
}
