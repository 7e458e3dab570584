//! Campaign repository

use async_trait::async_trait;
use chrono::Utc;
use outreach_common::types::CampaignId;
use outreach_common::{Error, Result};
use outreach_core::{CampaignSchedule, ContentSync, RemoteDrafts};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::classify_db_error;
use crate::models::{Campaign, CreateCampaign, UpdateCampaign};

/// Campaign repository
#[derive(Clone)]
pub struct CampaignRepository {
    pool: PgPool,
}

impl CampaignRepository {
    /// Create a new campaign repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new campaign in draft status
    pub async fn create(&self, input: CreateCampaign) -> Result<Campaign> {
        let id = Uuid::new_v4();

        sqlx::query_as::<_, Campaign>(
            r#"
            INSERT INTO campaigns (id, name, description, email_list_id, personalization_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.email_list_id)
        .bind(input.personalization_type.as_deref().unwrap_or("standard"))
        .fetch_one(&self.pool)
        .await
        .map_err(classify_db_error)
    }

    /// Get a campaign by ID
    pub async fn get(&self, id: CampaignId) -> Result<Option<Campaign>> {
        sqlx::query_as::<_, Campaign>("SELECT * FROM campaigns WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify_db_error)
    }

    /// List campaigns, newest first
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Campaign>> {
        sqlx::query_as::<_, Campaign>(
            r#"
            SELECT * FROM campaigns
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(classify_db_error)
    }

    /// Update campaign setup fields. Only draft campaigns change;
    /// anything else is returned untouched.
    pub async fn update(&self, id: CampaignId, input: UpdateCampaign) -> Result<Option<Campaign>> {
        let current = match self.get(id).await? {
            Some(c) => c,
            None => return Ok(None),
        };

        if current.status != "draft" {
            return Ok(Some(current));
        }

        sqlx::query_as::<_, Campaign>(
            r#"
            UPDATE campaigns SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                email_list_id = COALESCE($4, email_list_id),
                sender_account_id = COALESCE($5, sender_account_id),
                personalization_type = COALESCE($6, personalization_type),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.email_list_id)
        .bind(input.sender_account_id)
        .bind(&input.personalization_type)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify_db_error)
    }

    /// Read the stored draft content snapshot.
    pub async fn get_content(&self, id: CampaignId) -> Result<Option<String>> {
        let row: Option<(Option<serde_json::Value>,)> =
            sqlx::query_as("SELECT content FROM campaigns WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(classify_db_error)?;

        match row {
            None => Err(Error::NotFound(format!("Campaign not found: {}", id))),
            Some((content,)) => Ok(content.map(|v| v.to_string())),
        }
    }

    /// Write the draft content snapshot together with its derived
    /// columns.
    pub async fn set_content(&self, id: CampaignId, sync: &ContentSync) -> Result<()> {
        let content: serde_json::Value =
            serde_json::from_str(&sync.content).map_err(|e| Error::Internal(e.to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE campaigns SET
                content = $2,
                email_content = $3,
                subject_line = $4,
                total_steps = $5,
                completion_rate = $6,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&content)
        .bind(&sync.email_content)
        .bind(&sync.subject_line)
        .bind(sync.total_steps as i32)
        .bind(sync.completion_rate as i32)
        .execute(&self.pool)
        .await
        .map_err(classify_db_error)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Campaign not found: {}", id)));
        }
        Ok(())
    }

    /// Launch a campaign: store the schedule and flip the status.
    /// Campaigns with a future start date become `scheduled`,
    /// everything else starts `running` immediately.
    pub async fn launch(&self, id: CampaignId, schedule: &CampaignSchedule) -> Result<Campaign> {
        let scheduled_at = schedule.scheduled_at();
        let status = match scheduled_at {
            Some(at) if at > Utc::now() => "scheduled",
            _ => "running",
        };
        let schedule_json =
            serde_json::to_value(schedule).map_err(|e| Error::Internal(e.to_string()))?;

        sqlx::query_as::<_, Campaign>(
            r#"
            UPDATE campaigns SET
                status = $2,
                schedule = $3,
                scheduled_at = $4,
                sender_account_id = $5,
                launched_at = NOW(),
                updated_at = NOW()
            WHERE id = $1 AND status = 'draft'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(&schedule_json)
        .bind(scheduled_at)
        .bind(schedule.sender_account_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify_db_error)?
        .ok_or_else(|| Error::Validation("Only draft campaigns can be launched".to_string()))
    }

    /// Delete a draft campaign
    pub async fn delete(&self, id: CampaignId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1 AND status = 'draft'")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl RemoteDrafts for CampaignRepository {
    async fn load_content(&self, campaign_id: CampaignId) -> Result<Option<String>> {
        self.get_content(campaign_id).await
    }

    async fn save_content(&self, campaign_id: CampaignId, sync: &ContentSync) -> Result<()> {
        self.set_content(campaign_id, sync).await
    }
}
