//! # Product Commands
//!
//! Tauri commands for the product catalog: listing, substring search,
//! CRUD and the low-stock view. Input is validated in `ferro-core`
//! before it reaches the repository, so a rejected form never touches
//! the database.

use serde::{Deserialize, Serialize};
use tauri::State;
use tracing::debug;

use crate::error::ApiError;
use crate::state::DbState;
use ferro_core::validation::validate_new_product;
use ferro_core::{NewProduct, Product};

/// Product DTO (Data Transfer Object) for the frontend.
///
/// ## Why DTO?
/// - Decouples internal domain model from API contract
/// - Handles serde rename to camelCase for JS consumption
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub purchase_price_cents: i64,
    pub sale_price_cents: i64,
    pub stock: i64,
    pub min_stock: i64,
    pub unit: String,
    pub supplier_id: Option<i64>,
    /// Resolved supplier name, for display without a second lookup.
    pub supplier_name: Option<String>,
    /// "out", "low", or null when the stock level is healthy.
    pub stock_severity: Option<String>,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        let stock_severity = p.stock_severity().map(|s| {
            match s {
                ferro_core::StockSeverity::Out => "out",
                ferro_core::StockSeverity::Low => "low",
            }
            .to_string()
        });

        ProductDto {
            id: p.id,
            name: p.name,
            description: p.description,
            category: p.category,
            purchase_price_cents: p.purchase_price_cents,
            sale_price_cents: p.sale_price_cents,
            stock: p.stock,
            min_stock: p.min_stock,
            unit: p.unit,
            supplier_id: p.supplier_id,
            supplier_name: p.supplier_name,
            stock_severity,
        }
    }
}

/// Product form input from the frontend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
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

impl From<ProductInput> for NewProduct {
    fn from(input: ProductInput) -> Self {
        NewProduct {
            name: input.name.trim().to_string(),
            description: input.description,
            category: input.category,
            purchase_price_cents: input.purchase_price_cents,
            sale_price_cents: input.sale_price_cents,
            stock: input.stock,
            min_stock: input.min_stock,
            unit: input.unit.trim().to_string(),
            supplier_id: input.supplier_id,
        }
    }
}

/// Lists the full catalog, ordered by name.
#[tauri::command]
pub async fn list_products(db: State<'_, DbState>) -> Result<Vec<ProductDto>, ApiError> {
    debug!("list_products command");
    let products = db.inner_db().products().list_all().await?;
    Ok(products.into_iter().map(ProductDto::from).collect())
}

/// Searches products by name or category (case-insensitive substring).
/// An empty term returns the full catalog.
#[tauri::command]
pub async fn search_products(
    db: State<'_, DbState>,
    term: String,
) -> Result<Vec<ProductDto>, ApiError> {
    debug!(term = %term, "search_products command");
    let products = db.inner_db().products().search(&term).await?;
    Ok(products.into_iter().map(ProductDto::from).collect())
}

/// Gets a single product by id.
#[tauri::command]
pub async fn get_product(db: State<'_, DbState>, id: i64) -> Result<ProductDto, ApiError> {
    debug!(id = %id, "get_product command");
    let product = db
        .inner_db()
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id.to_string()))?;
    Ok(ProductDto::from(product))
}

/// Creates a product from validated form input.
#[tauri::command]
pub async fn create_product(
    db: State<'_, DbState>,
    input: ProductInput,
) -> Result<ProductDto, ApiError> {
    debug!(name = %input.name, "create_product command");

    let draft = NewProduct::from(input);
    validate_new_product(&draft)?;

    let product = db.inner_db().products().insert(&draft).await?;
    Ok(ProductDto::from(product))
}

/// Updates a product in place.
#[tauri::command]
pub async fn update_product(
    db: State<'_, DbState>,
    id: i64,
    input: ProductInput,
) -> Result<ProductDto, ApiError> {
    debug!(id = %id, "update_product command");

    let draft = NewProduct::from(input);
    validate_new_product(&draft)?;

    db.inner_db().products().update(id, &draft).await?;
    let product = db
        .inner_db()
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id.to_string()))?;
    Ok(ProductDto::from(product))
}

/// Deletes a product. Fails with INTEGRITY_ERROR when the product
/// appears in recorded sales.
#[tauri::command]
pub async fn delete_product(db: State<'_, DbState>, id: i64) -> Result<(), ApiError> {
    debug!(id = %id, "delete_product command");
    db.inner_db().products().delete(id).await?;
    Ok(())
}

/// Lists products at or below their reorder threshold.
#[tauri::command]
pub async fn list_low_stock(db: State<'_, DbState>) -> Result<Vec<ProductDto>, ApiError> {
    debug!("list_low_stock command");
    let products = db.inner_db().products().low_stock().await?;
    Ok(products.into_iter().map(ProductDto::from).collect())
}
