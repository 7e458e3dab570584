//! Upload handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use outreach_storage::models::{CreateUpload, Upload};
use outreach_storage::repository::UploadRepository;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use super::{error_response, not_found, validation_error, ApiError};
use crate::state::AppState;

/// List upload history
///
/// GET /api/uploads
pub async fn list_uploads(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Upload>>, ApiError> {
    let repo = UploadRepository::new(state.db_pool.pool().clone());

    let uploads = repo.list().await.map_err(|e| {
        error!("Failed to list uploads: {}", e);
        error_response(e)
    })?;

    Ok(Json(uploads))
}

/// Record an imported contact file
///
/// POST /api/uploads
pub async fn create_upload(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateUpload>,
) -> Result<(StatusCode, Json<Upload>), ApiError> {
    if input.filename.trim().is_empty() {
        return Err(validation_error("Filename is required"));
    }
    if input.original_name.trim().is_empty() {
        return Err(validation_error("Original file name is required"));
    }
    if input.storage_path.trim().is_empty() {
        return Err(validation_error("Storage path is required"));
    }

    let repo = UploadRepository::new(state.db_pool.pool().clone());

    let upload = repo.create(input).await.map_err(|e| {
        error!("Failed to record upload: {}", e);
        error_response(e)
    })?;

    info!("Recorded upload {} ({})", upload.id, upload.filename);

    Ok((StatusCode::CREATED, Json(upload)))
}

/// Get an upload record
///
/// GET /api/uploads/:upload_id
pub async fn get_upload(
    State(state): State<Arc<AppState>>,
    Path(upload_id): Path<Uuid>,
) -> Result<Json<Upload>, ApiError> {
    let repo = UploadRepository::new(state.db_pool.pool().clone());

    let upload = repo
        .get(upload_id)
        .await
        .map_err(|e| {
            error!("Failed to get upload: {}", e);
            error_response(e)
        })?
        .ok_or_else(|| not_found("Upload not found"))?;

    Ok(Json(upload))
}
