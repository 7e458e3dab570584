//! Database models

use chrono::{DateTime, Utc};
use outreach_common::types::{AccountId, CampaignId, ContactId, EmailListId, UploadId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Campaign model
///
/// `content` holds the serialized draft snapshot; `email_content`,
/// `subject_line`, `completion_rate` and `total_steps` are derived
/// from it at save time so the send pipeline and list views never
/// parse the snapshot.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub personalization_type: String,
    pub email_list_id: Option<EmailListId>,
    pub sender_account_id: Option<AccountId>,
    pub content: Option<serde_json::Value>,
    pub email_content: Option<String>,
    pub subject_line: Option<String>,
    pub completion_rate: i32,
    pub total_steps: i32,
    pub schedule: Option<serde_json::Value>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub launched_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Campaign creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaign {
    pub name: String,
    pub description: Option<String>,
    pub email_list_id: Option<EmailListId>,
    pub personalization_type: Option<String>,
}

/// Campaign update input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCampaign {
    pub name: Option<String>,
    pub description: Option<String>,
    pub email_list_id: Option<EmailListId>,
    pub sender_account_id: Option<AccountId>,
    pub personalization_type: Option<String>,
}

/// Email list model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct EmailList {
    pub id: EmailListId,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub contact_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Email list creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmailList {
    pub name: String,
    pub description: Option<String>,
}

/// Contact model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub list_id: EmailListId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub job_title: Option<String>,
    /// Drives AI pitch generation; contacts without one get the
    /// missing-website error instead of a pitch.
    pub website: Option<String>,
    pub notes: Option<String>,
    pub custom_fields: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Contact creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContact {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub job_title: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub custom_fields: Option<serde_json::Value>,
}

/// Upload model, one row per imported contact file
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Upload {
    pub id: UploadId,
    pub filename: String,
    pub original_name: String,
    pub file_size: i64,
    pub file_type: Option<String>,
    pub storage_path: String,
    pub status: String,
    pub list_id: Option<EmailListId>,
    pub row_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Upload creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUpload {
    pub filename: String,
    pub original_name: String,
    pub file_size: i64,
    pub file_type: Option<String>,
    pub storage_path: String,
    pub list_id: Option<EmailListId>,
    pub row_count: i32,
}

/// Sender email account model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct EmailAccount {
    pub id: AccountId,
    pub email: String,
    pub display_name: Option<String>,
    pub provider: String,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<i32>,
    pub smtp_username: Option<String>,
    #[serde(skip_serializing)]
    pub smtp_password: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// SMTP account creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSmtpAccount {
    pub email: String,
    pub display_name: Option<String>,
    pub smtp_host: String,
    pub smtp_port: i32,
    pub smtp_username: String,
    pub smtp_password: String,
}
