//! Customer CRUD commands.

use serde::{Deserialize, Serialize};
use tauri::State;
use tracing::debug;

use crate::error::ApiError;
use crate::state::DbState;
use ferro_core::validation::validate_new_customer;
use ferro_core::{Customer, NewCustomer};

/// Customer DTO for the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl From<Customer> for CustomerDto {
    fn from(c: Customer) -> Self {
        CustomerDto {
            id: c.id,
            name: c.name,
            phone: c.phone,
            email: c.email,
            address: c.address,
        }
    }
}

/// Customer form input from the frontend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl From<CustomerInput> for NewCustomer {
    fn from(input: CustomerInput) -> Self {
        NewCustomer {
            name: input.name.trim().to_string(),
            phone: input.phone,
            email: input.email,
            address: input.address,
        }
    }
}

/// Lists all customers, ordered by name.
#[tauri::command]
pub async fn list_customers(db: State<'_, DbState>) -> Result<Vec<CustomerDto>, ApiError> {
    debug!("list_customers command");
    let customers = db.inner_db().customers().list_all().await?;
    Ok(customers.into_iter().map(CustomerDto::from).collect())
}

/// Creates a customer from validated form input.
#[tauri::command]
pub async fn create_customer(
    db: State<'_, DbState>,
    input: CustomerInput,
) -> Result<CustomerDto, ApiError> {
    debug!(name = %input.name, "create_customer command");

    let draft = NewCustomer::from(input);
    validate_new_customer(&draft)?;

    let customer = db.inner_db().customers().insert(&draft).await?;
    Ok(CustomerDto::from(customer))
}

/// Updates a customer in place.
#[tauri::command]
pub async fn update_customer(
    db: State<'_, DbState>,
    id: i64,
    input: CustomerInput,
) -> Result<(), ApiError> {
    debug!(id = %id, "update_customer command");

    let draft = NewCustomer::from(input);
    validate_new_customer(&draft)?;

    db.inner_db().customers().update(id, &draft).await?;
    Ok(())
}

/// Deletes a customer. Their past sales survive with the customer
/// reference cleared.
#[tauri::command]
pub async fn delete_customer(db: State<'_, DbState>, id: i64) -> Result<(), ApiError> {
    debug!(id = %id, "delete_customer command");
    db.inner_db().customers().delete(id).await?;
    Ok(())
}
