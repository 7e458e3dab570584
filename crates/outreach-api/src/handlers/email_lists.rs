//! Email list handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use outreach_storage::models::{CreateEmailList, EmailList};
use outreach_storage::repository::EmailListRepository;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use super::{error_response, not_found, validation_error, ApiError};
use crate::state::AppState;

/// List email lists
///
/// GET /api/lists
pub async fn list_lists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EmailList>>, ApiError> {
    let repo = EmailListRepository::new(state.db_pool.pool().clone());

    let lists = repo.list().await.map_err(|e| {
        error!("Failed to list email lists: {}", e);
        error_response(e)
    })?;

    Ok(Json(lists))
}

/// Create an email list
///
/// POST /api/lists
pub async fn create_list(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateEmailList>,
) -> Result<(StatusCode, Json<EmailList>), ApiError> {
    if input.name.trim().is_empty() {
        return Err(validation_error("List name is required"));
    }

    let repo = EmailListRepository::new(state.db_pool.pool().clone());

    let list = repo.create(input).await.map_err(|e| {
        error!("Failed to create email list: {}", e);
        error_response(e)
    })?;

    info!("Created email list {}", list.id);

    Ok((StatusCode::CREATED, Json(list)))
}

/// Get an email list
///
/// GET /api/lists/:list_id
pub async fn get_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<Uuid>,
) -> Result<Json<EmailList>, ApiError> {
    let repo = EmailListRepository::new(state.db_pool.pool().clone());

    let list = repo
        .get(list_id)
        .await
        .map_err(|e| {
            error!("Failed to get email list: {}", e);
            error_response(e)
        })?
        .ok_or_else(|| not_found("Email list not found"))?;

    Ok(Json(list))
}

/// Delete an email list and its contacts
///
/// DELETE /api/lists/:list_id
pub async fn delete_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = EmailListRepository::new(state.db_pool.pool().clone());

    let deleted = repo.delete(list_id).await.map_err(|e| {
        error!("Failed to delete email list: {}", e);
        error_response(e)
    })?;

    if deleted {
        info!("Deleted email list {}", list_id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Email list not found"))
    }
}
