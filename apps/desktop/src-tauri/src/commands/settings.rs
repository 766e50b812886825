//! Store info commands. The store name, phone and address shown on
//! report headers; a single row the user edits in the settings screen.

use serde::{Deserialize, Serialize};
use tauri::State;
use tracing::debug;

use crate::error::ApiError;
use crate::state::DbState;
use ferro_core::validation::validate_name;
use ferro_core::StoreInfo;

/// Store info DTO, both read and write shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfoDto {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl From<StoreInfo> for StoreInfoDto {
    fn from(info: StoreInfo) -> Self {
        StoreInfoDto {
            name: info.name,
            phone: info.phone,
            address: info.address,
        }
    }
}

/// Returns the store configuration.
#[tauri::command]
pub async fn get_store_info(db: State<'_, DbState>) -> Result<StoreInfoDto, ApiError> {
    debug!("get_store_info command");
    let info = db.inner_db().store_info().get().await?;
    Ok(StoreInfoDto::from(info))
}

/// Saves the store configuration.
#[tauri::command]
pub async fn save_store_info(db: State<'_, DbState>, input: StoreInfoDto) -> Result<(), ApiError> {
    debug!(name = %input.name, "save_store_info command");

    validate_name(&input.name, "name")?;

    let info = StoreInfo {
        name: input.name.trim().to_string(),
        phone: input.phone,
        address: input.address,
    };
    db.inner_db().store_info().save(&info).await?;
    Ok(())
}
