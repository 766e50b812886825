//! # ferro-core: Pure Domain Logic for FerroStock
//!
//! This crate is the heart of FerroStock. It contains the domain model and
//! business rules for a small hardware store as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      FerroStock Architecture                        │
//! │                                                                     │
//! │  Frontend (WebView) ──► Tauri Commands ──► ★ ferro-core ★          │
//! │                                                   │                 │
//! │                                                   ▼                 │
//! │                                             ferro-db (SQLite)       │
//! │                                                                     │
//! │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Supplier, Customer, Sale, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic - same input = same output
//! 2. **No I/O**: database and file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64), never floats
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use ferro_core::Money` instead of
// `use ferro_core::money::Money`.

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length for entity names (products, suppliers, customers).
///
/// ## Business Reason
/// Keeps labels renderable in table cells and CSV exports; anything longer
/// is almost certainly a paste error.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length for the product unit label ("pz", "kg", "m", ...).
pub const MAX_UNIT_LEN: usize = 20;

/// Maximum quantity of a single product on one sale line.
///
/// ## Business Reason
/// Prevents accidental over-entry (e.g. typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 9999;
