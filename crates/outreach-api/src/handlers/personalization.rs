//! AI personalization handlers

use axum::{extract::State, Json};
use outreach_core::{CompanyProfile, PitchOutcome, PitchTarget};
use outreach_storage::repository::ContactRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use super::{error_response, validation_error, ApiError};
use crate::state::AppState;

/// Request body for batch pitch generation
#[derive(Debug, Deserialize)]
pub struct GeneratePitchesRequest {
    pub profile: CompanyProfile,
    pub contact_ids: Vec<Uuid>,
}

/// Per-contact generation result
#[derive(Debug, Serialize)]
pub struct ContactPitch {
    pub contact_id: Uuid,
    pub pitch: Option<String>,
    pub error: Option<String>,
}

/// Batch generation response
#[derive(Debug, Serialize)]
pub struct GeneratePitchesResponse {
    pub results: Vec<ContactPitch>,
    pub generated: usize,
    pub failed: usize,
}

/// Generate pitches for a set of contacts. Failures are reported
/// per contact; the batch itself always succeeds.
///
/// POST /api/personalization/generate
pub async fn generate_pitches(
    State(state): State<Arc<AppState>>,
    Json(input): Json<GeneratePitchesRequest>,
) -> Result<Json<GeneratePitchesResponse>, ApiError> {
    input
        .profile
        .validate()
        .map_err(|msg| validation_error(&msg))?;
    if input.contact_ids.is_empty() {
        return Err(validation_error("At least one contact is required"));
    }

    let repo = ContactRepository::new(state.db_pool.pool().clone());
    let contacts = repo.get_many(&input.contact_ids).await.map_err(|e| {
        error!("Failed to load contacts: {}", e);
        error_response(e)
    })?;

    // Preserve the requested order; unknown IDs are dropped.
    let targets: Vec<PitchTarget> = input
        .contact_ids
        .iter()
        .filter_map(|id| contacts.iter().find(|c| c.id == *id))
        .map(|c| PitchTarget {
            contact_id: c.id,
            website: c.website.clone(),
            first_name: c.first_name.clone(),
        })
        .collect();

    let outcomes = state
        .pitch_client
        .generate_batch(&input.profile, &targets)
        .await;

    let mut generated = 0;
    let mut failed = 0;
    let results = outcomes
        .into_iter()
        .map(|(contact_id, outcome)| match outcome {
            PitchOutcome::Generated(pitch) => {
                generated += 1;
                ContactPitch {
                    contact_id,
                    pitch: Some(pitch),
                    error: None,
                }
            }
            PitchOutcome::Failed(message) => {
                failed += 1;
                ContactPitch {
                    contact_id,
                    pitch: None,
                    error: Some(message),
                }
            }
        })
        .collect();

    info!(
        "Pitch generation finished: {} generated, {} failed",
        generated, failed
    );

    Ok(Json(GeneratePitchesResponse {
        results,
        generated,
        failed,
    }))
}
