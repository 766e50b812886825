//! # Validation Module
//!
//! Input validation for FerroStock.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Frontend form widgets                                     │
//! │  └── immediate feedback, numeric spinners                           │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE (GUI-free, reusable headlessly)               │
//! │  └── required fields, explicit range checks - never delegated       │
//! │      to widget clamping                                             │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  └── NOT NULL, CHECK and foreign key constraints                    │
//! │                                                                     │
//! │  Defense in depth: each layer catches different mistakes            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{NewCustomer, NewProduct, NewSale, NewSupplier};
use crate::{CoreError, MAX_LINE_QUANTITY, MAX_NAME_LEN, MAX_UNIT_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a required, non-empty name field.
///
/// ## Example
/// ```rust
/// use ferro_core::validation::validate_name;
///
/// assert!(validate_name("Martillo", "name").is_ok());
/// assert!(validate_name("   ", "name").is_err());
/// ```
pub fn validate_name(value: &str, field: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates the product unit label ("pz", "kg", "m", ...).
pub fn validate_unit(unit: &str) -> ValidationResult<()> {
    let unit = unit.trim();

    if unit.is_empty() {
        return Err(ValidationError::Required {
            field: "unit".to_string(),
        });
    }

    if unit.len() > MAX_UNIT_LEN {
        return Err(ValidationError::TooLong {
            field: "unit".to_string(),
            max: MAX_UNIT_LEN,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero is allowed (giveaway items)
pub fn validate_price_cents(cents: i64, field: &str) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a stock quantity (current or minimum).
pub fn validate_stock(value: i64, field: &str) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a sale line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates a product draft before insert or update.
///
/// Range checks are explicit here rather than relying on UI widget
/// clamping, so the rules hold for any caller.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_name(&product.name, "name")?;
    validate_unit(&product.unit)?;
    validate_price_cents(product.purchase_price_cents, "purchase price")?;
    validate_price_cents(product.sale_price_cents, "sale price")?;
    validate_stock(product.stock, "stock")?;
    validate_stock(product.min_stock, "minimum stock")?;
    Ok(())
}

/// Validates a supplier draft.
pub fn validate_new_supplier(supplier: &NewSupplier) -> ValidationResult<()> {
    validate_name(&supplier.name, "name")
}

/// Validates a customer draft.
pub fn validate_new_customer(customer: &NewCustomer) -> ValidationResult<()> {
    validate_name(&customer.name, "name")
}

/// Validates a sale draft: at least one line, positive quantities,
/// non-negative prices.
pub fn validate_new_sale(sale: &NewSale) -> Result<(), CoreError> {
    if sale.items.is_empty() {
        return Err(CoreError::EmptySale);
    }

    for item in &sale.items {
        validate_quantity(item.quantity)?;
        validate_price_cents(item.unit_price_cents, "unit price")?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewSaleItem;

    fn draft() -> NewProduct {
        NewProduct {
            name: "Martillo".to_string(),
            description: None,
            category: Some("Herramientas".to_string()),
            purchase_price_cents: 5000,
            sale_price_cents: 9000,
            stock: 3,
            min_stock: 5,
            unit: "pz".to_string(),
            supplier_id: None,
        }
    }

    #[test]
    fn test_valid_product_passes() {
        assert!(validate_new_product(&draft()).is_ok());
    }

    #[test]
    fn test_required_fields() {
        let mut p = draft();
        p.name = "  ".to_string();
        assert!(matches!(
            validate_new_product(&p),
            Err(ValidationError::Required { field }) if field == "name"
        ));

        let mut p = draft();
        p.unit = String::new();
        assert!(matches!(
            validate_new_product(&p),
            Err(ValidationError::Required { field }) if field == "unit"
        ));
    }

    #[test]
    fn test_range_checks() {
        let mut p = draft();
        p.purchase_price_cents = -1;
        assert!(validate_new_product(&p).is_err());

        let mut p = draft();
        p.stock = -3;
        assert!(validate_new_product(&p).is_err());

        // Zero prices and zero stock are legal
        let mut p = draft();
        p.purchase_price_cents = 0;
        p.sale_price_cents = 0;
        p.stock = 0;
        p.min_stock = 0;
        assert!(validate_new_product(&p).is_ok());
    }

    #[test]
    fn test_sale_validation() {
        let empty = NewSale {
            customer_id: None,
            items: vec![],
        };
        assert!(matches!(
            validate_new_sale(&empty),
            Err(CoreError::EmptySale)
        ));

        let bad_qty = NewSale {
            customer_id: None,
            items: vec![NewSaleItem {
                product_id: 1,
                quantity: 0,
                unit_price_cents: 9000,
            }],
        };
        assert!(validate_new_sale(&bad_qty).is_err());

        let ok = NewSale {
            customer_id: None,
            items: vec![NewSaleItem {
                product_id: 1,
                quantity: 2,
                unit_price_cents: 9000,
            }],
        };
        assert!(validate_new_sale(&ok).is_ok());
    }

    #[test]
    fn test_name_length_cap() {
        assert!(validate_name(&"A".repeat(300), "name").is_err());
        assert!(validate_name(&"A".repeat(200), "name").is_ok());
    }
}
