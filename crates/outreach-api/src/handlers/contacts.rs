//! Contact handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use outreach_storage::models::{Contact, CreateContact};
use outreach_storage::repository::{ContactRepository, EmailListRepository};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use super::{error_response, not_found, valid_email, validation_error, ApiError};
use crate::state::AppState;

/// List the contacts on a list
///
/// GET /api/lists/:list_id/contacts
pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<Uuid>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let lists = EmailListRepository::new(state.db_pool.pool().clone());
    if lists
        .get(list_id)
        .await
        .map_err(error_response)?
        .is_none()
    {
        return Err(not_found("Email list not found"));
    }

    let repo = ContactRepository::new(state.db_pool.pool().clone());

    let contacts = repo.list_by_list(list_id).await.map_err(|e| {
        error!("Failed to list contacts: {}", e);
        error_response(e)
    })?;

    Ok(Json(contacts))
}

/// Add a contact to a list
///
/// POST /api/lists/:list_id/contacts
pub async fn add_contact(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<Uuid>,
    Json(input): Json<CreateContact>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    if !valid_email(&input.email) {
        return Err(validation_error("A valid contact email is required"));
    }

    let repo = ContactRepository::new(state.db_pool.pool().clone());

    let contact = repo.create(list_id, input).await.map_err(|e| {
        error!("Failed to add contact: {}", e);
        error_response(e)
    })?;

    let lists = EmailListRepository::new(state.db_pool.pool().clone());
    if let Err(e) = lists.refresh_contact_count(list_id).await {
        error!("Failed to refresh contact count: {}", e);
    }

    info!("Added contact {} to list {}", contact.id, list_id);

    Ok((StatusCode::CREATED, Json(contact)))
}

/// Remove a contact
///
/// DELETE /api/lists/:list_id/contacts/:contact_id
pub async fn delete_contact(
    State(state): State<Arc<AppState>>,
    Path((list_id, contact_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let repo = ContactRepository::new(state.db_pool.pool().clone());

    let deleted = repo.delete(contact_id).await.map_err(|e| {
        error!("Failed to delete contact: {}", e);
        error_response(e)
    })?;

    if !deleted {
        return Err(not_found("Contact not found"));
    }

    let lists = EmailListRepository::new(state.db_pool.pool().clone());
    if let Err(e) = lists.refresh_contact_count(list_id).await {
        error!("Failed to refresh contact count: {}", e);
    }

    Ok(StatusCode::NO_CONTENT)
}
