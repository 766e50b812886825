//! # Repositories
//!
//! One repository per entity. Each exposes the same CRUD surface
//! (list_all, get_by_id, insert, update, delete) plus entity-specific
//! queries, and returns named-field structs from ferro-core - nothing in
//! the codebase indexes rows by position.

pub mod customer;
pub mod product;
pub mod sale;
pub mod store_info;
pub mod supplier;
