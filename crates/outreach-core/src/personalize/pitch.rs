//! Client for the external AI pitch-generation service

use futures::stream::{self, StreamExt};
use outreach_common::config::PitchConfig;
use outreach_common::types::ContactId;
use outreach_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::table::CompanyProfile;

/// Error string recorded for contacts that cannot be pitched because
/// no website is on file. Recognized downstream to keep the cell
/// editable rather than treating it as generated content.
pub const NO_WEBSITE_ERROR: &str = "Error: No website URL found for this contact";

/// Request body for the generation endpoint
#[derive(Debug, Clone, Serialize)]
pub struct PitchRequest {
    pub my_company: String,
    pub my_desc: String,
    pub my_services: String,
    pub target_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_pitch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
}

/// Response body from the generation endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PitchResponse {
    pub pitch: String,
    #[serde(default)]
    pub target_company_name: String,
    #[serde(default)]
    pub my_company: String,
    #[serde(default)]
    pub success: bool,
}

/// The contact fields pitch generation needs
#[derive(Debug, Clone)]
pub struct PitchTarget {
    pub contact_id: ContactId,
    pub website: Option<String>,
    pub first_name: Option<String>,
}

/// Per-contact result of a generation batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PitchOutcome {
    Generated(String),
    Failed(String),
}

impl PitchOutcome {
    /// Text written into the contact's pitch cell either way.
    pub fn cell_text(&self) -> &str {
        match self {
            PitchOutcome::Generated(pitch) => pitch,
            PitchOutcome::Failed(message) => message,
        }
    }
}

/// HTTP client for the pitch-generation service
pub struct PitchClient {
    client: reqwest::Client,
    base_url: String,
    concurrency: usize,
}

impl PitchClient {
    pub fn new(config: &PitchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            concurrency: config.concurrency.max(1),
        })
    }

    /// Generate one pitch. Non-2xx responses surface as external
    /// errors carrying the response body.
    pub async fn generate(&self, request: &PitchRequest) -> Result<PitchResponse> {
        let url = format!("{}/ai/generate-pitch", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::External(format!("Pitch service request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::External(format!(
                "Pitch service returned {}: {}",
                status, body
            )));
        }

        response
            .json::<PitchResponse>()
            .await
            .map_err(|e| Error::External(format!("Invalid pitch service response: {}", e)))
    }

    /// Generate pitches for a batch of contacts. Each contact succeeds
    /// or fails on its own; one failure never aborts the batch.
    /// Results come back in input order.
    pub async fn generate_batch(
        &self,
        profile: &CompanyProfile,
        targets: &[PitchTarget],
    ) -> Vec<(ContactId, PitchOutcome)> {
        let sample_pitch = if profile.sample_pitch.trim().is_empty() {
            None
        } else {
            Some(profile.sample_pitch.clone())
        };

        // Collect the (lazy) futures up front so the closure is applied at a
        // concrete lifetime; building them inside `stream::iter` trips
        // rust-lang/rust#89976 when the handler future must be `Send`.
        let futures: Vec<_> = targets
            .iter()
            .enumerate()
            .map(|(idx, target)| {
                let sample_pitch = sample_pitch.clone();
                async move {
                    let outcome = self.generate_one(profile, target, sample_pitch).await;
                    (idx, target.contact_id, outcome)
                }
            })
            .collect();

        let mut results: Vec<(usize, ContactId, PitchOutcome)> = stream::iter(futures)
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        results.sort_by_key(|(idx, _, _)| *idx);
        results
            .into_iter()
            .map(|(_, contact_id, outcome)| (contact_id, outcome))
            .collect()
    }

    async fn generate_one(
        &self,
        profile: &CompanyProfile,
        target: &PitchTarget,
        sample_pitch: Option<String>,
    ) -> PitchOutcome {
        let Some(website) = target.website.as_deref().filter(|w| !w.trim().is_empty()) else {
            debug!(contact_id = %target.contact_id, "Skipping pitch, contact has no website");
            return PitchOutcome::Failed(NO_WEBSITE_ERROR.to_string());
        };

        let request = PitchRequest {
            my_company: profile.company_name.clone(),
            my_desc: profile.description(),
            my_services: profile.services.clone(),
            target_url: website.to_string(),
            sample_pitch,
            first_name: target.first_name.clone(),
        };

        match self.generate(&request).await {
            Ok(response) => PitchOutcome::Generated(response.pitch),
            Err(e) => {
                warn!(contact_id = %target.contact_id, error = %e, "Pitch generation failed");
                PitchOutcome::Failed(format!("Error: {}", e))
            }
        }
    }
}
