//! # Domain Types
//!
//! Core domain types used throughout FerroStock.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐               │
//! │  │   Product    │  │   Supplier   │  │   Customer   │               │
//! │  │ ───────────  │  │ ───────────  │  │ ───────────  │               │
//! │  │ id (i64)     │  │ id (i64)     │  │ id (i64)     │               │
//! │  │ name, unit   │  │ name         │  │ name         │               │
//! │  │ prices cents │  │ contact      │  │ contact      │               │
//! │  │ stock levels │  └──────▲───────┘  └──────▲───────┘               │
//! │  └──────┬───────┘         │ supplier_id     │ customer_id           │
//! │         │ product_id      │ (nullable FK)   │ (nullable FK)         │
//! │  ┌──────▼───────┐  ┌──────┴───────┐                                 │
//! │  │   SaleItem   │──│     Sale     │                                 │
//! │  └──────────────┘  └──────────────┘                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Named Fields Everywhere
//! Entities are structs with named fields; nothing in the codebase indexes
//! rows by position. `New*` companion structs carry user input into insert
//! paths (no id, no timestamps - the storage layer generates those).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Stock Severity
// =============================================================================

/// Alert tier for products at or below their reorder threshold.
///
/// ## Invariant
/// - `Out` ⇔ stock == 0 (nothing on hand)
/// - `Low` ⇔ 0 < stock <= min_stock (reorder soon)
/// - No severity ⇔ stock > min_stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockSeverity {
    /// Completely out of stock.
    Out,
    /// At or below the reorder threshold, but not empty.
    Low,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Surrogate key (SQLite rowid).
    pub id: i64,

    /// Display name, required and non-empty.
    pub name: String,

    /// Optional free-form description.
    pub description: Option<String>,

    /// Optional category label, used for grouping and search.
    pub category: Option<String>,

    /// Purchase (cost) price in cents. Inventory is valued at this price.
    pub purchase_price_cents: i64,

    /// Sale price in cents.
    pub sale_price_cents: i64,

    /// Units currently on hand. Never negative.
    pub stock: i64,

    /// Reorder threshold: stock at or below this level raises a low-stock
    /// alert.
    pub min_stock: i64,

    /// Unit label ("pz", "kg", "m", ...).
    pub unit: String,

    /// Supplier reference, nullable.
    pub supplier_id: Option<i64>,

    /// Supplier display name, resolved by the read queries (LEFT JOIN).
    /// `None` when the product has no supplier.
    pub supplier_name: Option<String>,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the purchase price as a Money type.
    #[inline]
    pub fn purchase_price(&self) -> Money {
        Money::from_cents(self.purchase_price_cents)
    }

    /// Returns the sale price as a Money type.
    #[inline]
    pub fn sale_price(&self) -> Money {
        Money::from_cents(self.sale_price_cents)
    }

    /// Value of the units on hand, at cost (not sale price).
    ///
    /// ## Example
    /// 3 units with purchase price $50.00 contribute $150.00.
    #[inline]
    pub fn inventory_value(&self) -> Money {
        self.purchase_price().multiply_quantity(self.stock)
    }

    /// Returns the alert tier for this product, if any.
    pub fn stock_severity(&self) -> Option<StockSeverity> {
        if self.stock == 0 {
            Some(StockSeverity::Out)
        } else if self.stock <= self.min_stock {
            Some(StockSeverity::Low)
        } else {
            None
        }
    }

    /// Checks whether the product is at or below its reorder threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }
}

/// Input for creating or updating a product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub purchase_price_cents: i64,
    pub sale_price_cents: i64,
    pub stock: i64,
    pub min_stock: i64,
    pub unit: String,
    pub supplier_id: Option<i64>,
}

// =============================================================================
// Supplier
// =============================================================================

/// A product supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Input for creating or updating a supplier.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewSupplier {
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

// =============================================================================
// Customer
// =============================================================================

/// A store customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Input for creating or updating a customer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCustomer {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Sale {
    pub id: i64,
    pub customer_id: Option<i64>,
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// A line item of a recorded sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleItem {
    pub id: i64,
    pub sale_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Unit price in cents at the time of sale.
    pub unit_price_cents: i64,
    /// quantity × unit price, frozen at the time of sale.
    pub line_total_cents: i64,
}

/// Input for recording a sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewSale {
    pub customer_id: Option<i64>,
    pub items: Vec<NewSaleItem>,
}

/// One line of a sale being recorded.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewSaleItem {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl NewSaleItem {
    /// Line total in cents (quantity × unit price).
    #[inline]
    pub fn line_total_cents(&self) -> i64 {
        self.quantity * self.unit_price_cents
    }
}

impl NewSale {
    /// Sale total in cents, summed over all lines.
    pub fn total_cents(&self) -> i64 {
        self.items.iter().map(NewSaleItem::line_total_cents).sum()
    }
}

// =============================================================================
// Store Info
// =============================================================================

/// Store configuration shown on reports (single row in the database).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct StoreInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i64, min_stock: i64) -> Product {
        Product {
            id: 1,
            name: "Martillo".to_string(),
            description: None,
            category: Some("Herramientas".to_string()),
            purchase_price_cents: 5000,
            sale_price_cents: 9000,
            stock,
            min_stock,
            unit: "pz".to_string(),
            supplier_id: None,
            supplier_name: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_stock_severity_tiers() {
        assert_eq!(product(0, 5).stock_severity(), Some(StockSeverity::Out));
        assert_eq!(product(3, 5).stock_severity(), Some(StockSeverity::Low));
        assert_eq!(product(5, 5).stock_severity(), Some(StockSeverity::Low));
        assert_eq!(product(6, 5).stock_severity(), None);
    }

    #[test]
    fn test_inventory_value_at_cost() {
        // Valuation uses purchase price, not sale price
        let p = product(3, 5);
        assert_eq!(p.inventory_value().cents(), 15000);

        let empty = product(0, 5);
        assert_eq!(empty.inventory_value().cents(), 0);
    }

    #[test]
    fn test_sale_totals() {
        let sale = NewSale {
            customer_id: None,
            items: vec![
                NewSaleItem {
                    product_id: 1,
                    quantity: 2,
                    unit_price_cents: 9000,
                },
                NewSaleItem {
                    product_id: 2,
                    quantity: 1,
                    unit_price_cents: 2500,
                },
            ],
        };
        assert_eq!(sale.items[0].line_total_cents(), 18000);
        assert_eq!(sale.total_cents(), 20500);
    }
}
