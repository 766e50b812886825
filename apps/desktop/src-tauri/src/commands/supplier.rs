//! Supplier CRUD commands. Deleting a supplier still referenced by
//! products fails with INTEGRITY_ERROR; the frontend keeps the row and
//! shows the message.

use serde::{Deserialize, Serialize};
use tauri::State;
use tracing::debug;

use crate::error::ApiError;
use crate::state::DbState;
use ferro_core::validation::validate_new_supplier;
use ferro_core::{NewSupplier, Supplier};

/// Supplier DTO for the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDto {
    pub id: i64,
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl From<Supplier> for SupplierDto {
    fn from(s: Supplier) -> Self {
        SupplierDto {
            id: s.id,
            name: s.name,
            contact_name: s.contact_name,
            phone: s.phone,
            email: s.email,
            address: s.address,
        }
    }
}

/// Supplier form input from the frontend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInput {
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl From<SupplierInput> for NewSupplier {
    fn from(input: SupplierInput) -> Self {
        NewSupplier {
            name: input.name.trim().to_string(),
            contact_name: input.contact_name,
            phone: input.phone,
            email: input.email,
            address: input.address,
        }
    }
}

/// Lists all suppliers, ordered by name.
#[tauri::command]
pub async fn list_suppliers(db: State<'_, DbState>) -> Result<Vec<SupplierDto>, ApiError> {
    debug!("list_suppliers command");
    let suppliers = db.inner_db().suppliers().list_all().await?;
    Ok(suppliers.into_iter().map(SupplierDto::from).collect())
}

/// Creates a supplier from validated form input.
#[tauri::command]
pub async fn create_supplier(
    db: State<'_, DbState>,
    input: SupplierInput,
) -> Result<SupplierDto, ApiError> {
    debug!(name = %input.name, "create_supplier command");

    let draft = NewSupplier::from(input);
    validate_new_supplier(&draft)?;

    let supplier = db.inner_db().suppliers().insert(&draft).await?;
    Ok(SupplierDto::from(supplier))
}

/// Updates a supplier in place.
#[tauri::command]
pub async fn update_supplier(
    db: State<'_, DbState>,
    id: i64,
    input: SupplierInput,
) -> Result<(), ApiError> {
    debug!(id = %id, "update_supplier command");

    let draft = NewSupplier::from(input);
    validate_new_supplier(&draft)?;

    db.inner_db().suppliers().update(id, &draft).await?;
    Ok(())
}

/// Deletes a supplier not referenced by any product.
#[tauri::command]
pub async fn delete_supplier(db: State<'_, DbState>, id: i64) -> Result<(), ApiError> {
    debug!(id = %id, "delete_supplier command");
    db.inner_db().suppliers().delete(id).await?;
    Ok(())
}
