//! # Tauri Commands Module
//!
//! All commands exposed to the frontend.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── Product CRUD, search, low stock
//! ├── supplier.rs  ◄─── Supplier CRUD
//! ├── customer.rs  ◄─── Customer CRUD
//! ├── sale.rs      ◄─── Sale recording and listing
//! ├── report.rs    ◄─── Reports and CSV export
//! ├── backup.rs    ◄─── Database backup/restore
//! └── settings.rs  ◄─── Store info get/save
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Tauri Command Flow                             │
//! │                                                                     │
//! │  Frontend                                                           │
//! │  ────────                                                           │
//! │  import { invoke } from '@tauri-apps/api/core';                     │
//! │                                                                     │
//! │  const products = await invoke('search_products', {                 │
//! │    term: 'martillo'                                                 │
//! │  });                                                                │
//! │         │                                                           │
//! │         │ (IPC via WebView)                                         │
//! │         ▼                                                           │
//! │  Rust Backend                                                       │
//! │  ────────────                                                       │
//! │  #[tauri::command]                                                  │
//! │  async fn search_products(                                          │
//! │      db: State<'_, DbState>,  ◄── Injected by Tauri                 │
//! │      term: String,            ◄── From invoke params                │
//! │  ) -> Result<Vec<ProductDto>, ApiError>                             │
//! │         │                                                           │
//! │         │ (JSON serialization)                                      │
//! │         ▼                                                           │
//! │  Frontend receives: ProductDto[]                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

pub mod backup;
pub mod customer;
pub mod product;
pub mod report;
pub mod sale;
pub mod settings;
pub mod supplier;
