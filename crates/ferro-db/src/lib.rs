//! # ferro-db: Storage Layer for FerroStock
//!
//! This crate provides database access for FerroStock. It uses SQLite for
//! local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Tauri command (list_products, record_sale, ...)                    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                   ferro-db (THIS CRATE)                       │  │
//! │  │                                                               │  │
//! │  │  Database (pool.rs)   Repositories     Reports / Export       │  │
//! │  │  SqlitePool           products         sales summary          │  │
//! │  │  Migrations           suppliers        stock report           │  │
//! │  │  Backup (backup.rs)   customers        CSV files              │  │
//! │  │                       sales                                   │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database file (WAL mode, foreign keys on)                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations per entity
//! - [`report`] - Aggregate report queries
//! - [`export`] - CSV export
//! - [`backup`] - Database file backup/restore
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ferro_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/ferrostock.db")).await?;
//! let products = db.products().search("martillo").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backup;
pub mod error;
pub mod export;
pub mod migrations;
pub mod pool;
pub mod report;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::store_info::StoreInfoRepository;
pub use repository::supplier::SupplierRepository;
