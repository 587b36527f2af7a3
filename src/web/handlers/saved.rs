// src/web/handlers/saved.rs
//! Saved-application listing, creation, and CSV export.

use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

use crate::models::{SavePayload, SavedRecord};
use crate::store::export_csv;
use crate::web::types::{internal_error, ApiError, ExportResponse, SavedStore};

fn store_error(e: anyhow::Error) -> ApiError {
    error!("Saved-application store failure: {}", e);
    internal_error(
        "Failed to access saved applications".to_string(),
        "STORE_ERROR",
        vec![
            "Try again in a few moments".to_string(),
            "Check the application store file is readable".to_string(),
        ],
    )
}

pub async fn get_saved_handler(
    store: &State<SavedStore>,
) -> Result<Json<Vec<SavedRecord>>, ApiError> {
    let records = store.repo().list().await.map_err(store_error)?;
    Ok(Json(records))
}

pub async fn save_application_handler(
    payload: Json<SavePayload>,
    store: &State<SavedStore>,
) -> Result<Json<SavedRecord>, ApiError> {
    let record = store.repo().append(payload.into_inner()).await.map_err(store_error)?;
    info!(
        "Saved application {} for {} at {}",
        record.id, record.job.title, record.job.company
    );
    Ok(Json(record))
}

pub async fn export_saved_handler(
    store: &State<SavedStore>,
) -> Result<Json<ExportResponse>, ApiError> {
    let records = store.repo().list().await.map_err(store_error)?;
    Ok(Json(ExportResponse {
        csv: export_csv(&records),
    }))
}
