//! # FerroStock Desktop Application Entry Point
//!
//! This is the main entry point for the Tauri desktop application.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       FerroStock Desktop                            │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                      Tauri WebView                            │  │
//! │  │  • Product catalog      • Sale entry                          │  │
//! │  │  • Reports & CSV export • Backup/restore                      │  │
//! │  │                         │                                     │  │
//! │  │                 invoke('command')                             │  │
//! │  └─────────────────────────┼─────────────────────────────────────┘  │
//! │                            ▼                                        │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                  Rust Backend (this crate)                    │  │
//! │  │                                                               │  │
//! │  │  main.rs ────► delegates to lib.rs                            │  │
//! │  │  lib.rs ─────► logging, database path, Tauri setup            │  │
//! │  │  commands/ ──► product, supplier, customer, sale, report,     │  │
//! │  │                backup, settings                               │  │
//! │  │  state/ ─────► DbState                                        │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │                            │                                        │
//! │                            ▼                                        │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │  SQLite database file (WAL mode, foreign keys on)             │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

// Prevents an additional console window on Windows in release
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

fn main() {
    // The actual setup is in lib.rs for better testability
    ferro_desktop_lib::run();
}
