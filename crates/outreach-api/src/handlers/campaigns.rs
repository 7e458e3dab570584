//! Campaign handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use outreach_core::{CampaignContent, CampaignSchedule, ContentSync, Snapshot};
use outreach_storage::models::{Campaign, CreateCampaign, UpdateCampaign};
use outreach_storage::repository::CampaignRepository;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use super::{error_response, not_found, validation_error, ApiError, ErrorResponse};
use crate::state::AppState;

/// Query parameters for listing campaigns
#[derive(Debug, Deserialize)]
pub struct ListCampaignsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Request body for creating a campaign
#[derive(Debug, Deserialize)]
pub struct CreateCampaignRequest {
    pub name: String,
    pub description: Option<String>,
    pub email_list_id: Option<Uuid>,
    pub personalization_type: Option<String>,
}

/// List campaigns
///
/// GET /api/campaigns
pub async fn list_campaigns(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListCampaignsQuery>,
) -> Result<Json<Vec<Campaign>>, ApiError> {
    let repo = CampaignRepository::new(state.db_pool.pool().clone());

    let campaigns = repo
        .list(query.limit, query.offset)
        .await
        .map_err(|e| {
            error!("Failed to list campaigns: {}", e);
            error_response(e)
        })?;

    Ok(Json(campaigns))
}

/// Create a new campaign
///
/// POST /api/campaigns
pub async fn create_campaign(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<Campaign>), ApiError> {
    if input.name.trim().is_empty() {
        return Err(validation_error("Campaign name is required"));
    }

    let repo = CampaignRepository::new(state.db_pool.pool().clone());

    let campaign = repo
        .create(CreateCampaign {
            name: input.name,
            description: input.description,
            email_list_id: input.email_list_id,
            personalization_type: input.personalization_type,
        })
        .await
        .map_err(|e| {
            error!("Failed to create campaign: {}", e);
            error_response(e)
        })?;

    info!("Created campaign {}", campaign.id);

    Ok((StatusCode::CREATED, Json(campaign)))
}

/// Get a campaign by ID
///
/// GET /api/campaigns/:campaign_id
pub async fn get_campaign(
    State(state): State<Arc<AppState>>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<Campaign>, ApiError> {
    let repo = CampaignRepository::new(state.db_pool.pool().clone());

    let campaign = repo
        .get(campaign_id)
        .await
        .map_err(|e| {
            error!("Failed to get campaign: {}", e);
            error_response(e)
        })?
        .ok_or_else(|| not_found("Campaign not found"))?;

    Ok(Json(campaign))
}

/// Update campaign setup fields
///
/// PUT /api/campaigns/:campaign_id
pub async fn update_campaign(
    State(state): State<Arc<AppState>>,
    Path(campaign_id): Path<Uuid>,
    Json(input): Json<UpdateCampaign>,
) -> Result<Json<Campaign>, ApiError> {
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(validation_error("Campaign name cannot be empty"));
        }
    }

    let repo = CampaignRepository::new(state.db_pool.pool().clone());

    let campaign = repo
        .update(campaign_id, input)
        .await
        .map_err(|e| {
            error!("Failed to update campaign: {}", e);
            error_response(e)
        })?
        .ok_or_else(|| not_found("Campaign not found"))?;

    info!("Updated campaign {}", campaign_id);

    Ok(Json(campaign))
}

/// Delete a draft campaign
///
/// DELETE /api/campaigns/:campaign_id
pub async fn delete_campaign(
    State(state): State<Arc<AppState>>,
    Path(campaign_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = CampaignRepository::new(state.db_pool.pool().clone());

    let deleted = repo.delete(campaign_id).await.map_err(|e| {
        error!("Failed to delete campaign: {}", e);
        error_response(e)
    })?;

    if deleted {
        info!("Deleted campaign {}", campaign_id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Campaign not found or not in draft status"))
    }
}

/// Get the draft content snapshot
///
/// GET /api/campaigns/:campaign_id/content
pub async fn get_content(
    State(state): State<Arc<AppState>>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<Option<CampaignContent>>, ApiError> {
    let repo = CampaignRepository::new(state.db_pool.pool().clone());

    let raw = repo.get_content(campaign_id).await.map_err(|e| {
        error!("Failed to load campaign content: {}", e);
        error_response(e)
    })?;

    let content = raw
        .as_deref()
        .and_then(Snapshot::parse)
        .map(|s| s.normalize(campaign_id));

    Ok(Json(content))
}

/// Save the draft content snapshot.
///
/// PUT /api/campaigns/:campaign_id/content
///
/// The body is either a full snapshot or a bare step array from an
/// older client. Either way the steps are re-derived server-side and
/// the denormalized columns recomputed before storing.
pub async fn put_content(
    State(state): State<Arc<AppState>>,
    Path(campaign_id): Path<Uuid>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<CampaignContent>, ApiError> {
    let raw = body.to_string();
    let snapshot = Snapshot::parse(&raw)
        .ok_or_else(|| validation_error("Body is not a recognizable content snapshot"))?;
    let content = snapshot.normalize(campaign_id);

    let sync = ContentSync {
        content: serde_json::to_string(&content)
            .map_err(|e| validation_error(&e.to_string()))?,
        email_content: content.plain_text(),
        subject_line: content.subject_line().to_string(),
        total_steps: content.total_steps,
        completion_rate: content.completion_rate,
    };

    let repo = CampaignRepository::new(state.db_pool.pool().clone());
    repo.set_content(campaign_id, &sync).await.map_err(|e| {
        error!("Failed to save campaign content: {}", e);
        let status =
            StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            Json(ErrorResponse {
                error: e.code().to_string(),
                message: e.save_message(),
            }),
        )
    })?;

    info!(
        "Saved content for campaign {} ({} steps, {}% complete)",
        campaign_id, content.total_steps, content.completion_rate
    );

    Ok(Json(content))
}

/// Launch a campaign with its send schedule
///
/// POST /api/campaigns/:campaign_id/launch
pub async fn launch_campaign(
    State(state): State<Arc<AppState>>,
    Path(campaign_id): Path<Uuid>,
    Json(schedule): Json<CampaignSchedule>,
) -> Result<Json<Campaign>, ApiError> {
    schedule.validate().map_err(error_response)?;

    let repo = CampaignRepository::new(state.db_pool.pool().clone());

    let campaign = repo.get(campaign_id).await.map_err(error_response)?;
    let campaign = campaign.ok_or_else(|| not_found("Campaign not found"))?;
    if campaign.total_steps == 0 {
        return Err(validation_error("Campaign has no email content"));
    }
    if campaign.email_list_id.is_none() {
        return Err(validation_error("Campaign has no email list"));
    }

    let campaign = repo.launch(campaign_id, &schedule).await.map_err(|e| {
        error!("Failed to launch campaign: {}", e);
        error_response(e)
    })?;

    info!(
        "Launched campaign {} (status {})",
        campaign_id, campaign.status
    );

    Ok(Json(campaign))
}
