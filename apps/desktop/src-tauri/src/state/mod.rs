//! # State Module
//!
//! Application state for the Tauri desktop app. A single focused state
//! type: `DbState`, wrapping the database handle. The inner `SqlitePool`
//! is thread-safe, so commands run concurrently without explicit locking.

mod db;

pub use db::DbState;
