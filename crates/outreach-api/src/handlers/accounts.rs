//! Sender account handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use outreach_storage::models::{CreateSmtpAccount, EmailAccount};
use outreach_storage::repository::EmailAccountRepository;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use super::{error_response, not_found, valid_email, validation_error, ApiError};
use crate::state::AppState;

/// List active sender accounts
///
/// GET /api/accounts
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EmailAccount>>, ApiError> {
    let repo = EmailAccountRepository::new(state.db_pool.pool().clone());

    let accounts = repo.list_active().await.map_err(|e| {
        error!("Failed to list accounts: {}", e);
        error_response(e)
    })?;

    Ok(Json(accounts))
}

/// Register an SMTP sender account
///
/// POST /api/accounts/smtp
pub async fn create_smtp_account(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateSmtpAccount>,
) -> Result<(StatusCode, Json<EmailAccount>), ApiError> {
    if !valid_email(&input.email) {
        return Err(validation_error("A valid account email is required"));
    }
    if input.smtp_host.trim().is_empty() {
        return Err(validation_error("SMTP host is required"));
    }
    if !(1..=65535).contains(&input.smtp_port) {
        return Err(validation_error("SMTP port must be between 1 and 65535"));
    }

    let repo = EmailAccountRepository::new(state.db_pool.pool().clone());

    let account = repo.create_smtp(input).await.map_err(|e| {
        error!("Failed to register SMTP account: {}", e);
        error_response(e)
    })?;

    info!("Registered SMTP account {}", account.id);

    Ok((StatusCode::CREATED, Json(account)))
}

/// Deactivate a sender account
///
/// DELETE /api/accounts/:account_id
pub async fn deactivate_account(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = EmailAccountRepository::new(state.db_pool.pool().clone());

    let deactivated = repo.deactivate(account_id).await.map_err(|e| {
        error!("Failed to deactivate account: {}", e);
        error_response(e)
    })?;

    if deactivated {
        info!("Deactivated account {}", account_id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Account not found"))
    }
}
