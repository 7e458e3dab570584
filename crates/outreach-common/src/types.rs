//! Common types for Outreach

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for campaigns
pub type CampaignId = Uuid;

/// Unique identifier for email lists
pub type EmailListId = Uuid;

/// Unique identifier for contacts
pub type ContactId = Uuid;

/// Unique identifier for steps in an email sequence
pub type StepId = Uuid;

/// Unique identifier for sending accounts
pub type AccountId = Uuid;

/// Unique identifier for uploads
pub type UploadId = Uuid;

/// Campaign lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Running,
    Paused,
    Completed,
    Failed,
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CampaignStatus::Draft => write!(f, "draft"),
            CampaignStatus::Scheduled => write!(f, "scheduled"),
            CampaignStatus::Running => write!(f, "running"),
            CampaignStatus::Paused => write!(f, "paused"),
            CampaignStatus::Completed => write!(f, "completed"),
            CampaignStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for CampaignStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(CampaignStatus::Draft),
            "scheduled" => Ok(CampaignStatus::Scheduled),
            "running" => Ok(CampaignStatus::Running),
            "paused" => Ok(CampaignStatus::Paused),
            "completed" => Ok(CampaignStatus::Completed),
            "failed" => Ok(CampaignStatus::Failed),
            _ => Err(format!("Invalid campaign status: {}", s)),
        }
    }
}

/// How the wizard personalizes content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalizationMode {
    /// One shared message for every contact
    Standard,
    /// Per-contact AI-generated content
    Personalization,
}

impl std::fmt::Display for PersonalizationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersonalizationMode::Standard => write!(f, "standard"),
            PersonalizationMode::Personalization => write!(f, "personalization"),
        }
    }
}

impl std::str::FromStr for PersonalizationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(PersonalizationMode::Standard),
            "personalization" => Ok(PersonalizationMode::Personalization),
            _ => Err(format!("Invalid personalization mode: {}", s)),
        }
    }
}

/// What happens when a recipient replies mid-sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyHandling {
    AutoRespond,
    Forward,
    PauseSequence,
    Ignore,
}

impl Default for ReplyHandling {
    fn default() -> Self {
        ReplyHandling::AutoRespond
    }
}

impl std::fmt::Display for ReplyHandling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplyHandling::AutoRespond => write!(f, "auto_respond"),
            ReplyHandling::Forward => write!(f, "forward"),
            ReplyHandling::PauseSequence => write!(f, "pause_sequence"),
            ReplyHandling::Ignore => write!(f, "ignore"),
        }
    }
}

/// Sending account provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Smtp,
    GmailOauth,
    MicrosoftOauth,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Smtp => write!(f, "smtp"),
            Provider::GmailOauth => write!(f, "gmail_oauth"),
            Provider::MicrosoftOauth => write!(f, "microsoft_oauth"),
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smtp" => Ok(Provider::Smtp),
            "gmail_oauth" => Ok(Provider::GmailOauth),
            "microsoft_oauth" => Ok(Provider::MicrosoftOauth),
            _ => Err(format!("Invalid provider: {}", s)),
        }
    }
}

/// Email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress {
    pub local: String,
    pub domain: String,
}

impl EmailAddress {
    /// Create a new email address
    pub fn new(local: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            domain: domain.into(),
        }
    }

    /// Parse an email address from a string
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.splitn(2, '@').collect();
        if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
            Some(Self::new(parts[0], parts[1]))
        } else {
            None
        }
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.local, self.domain)
    }
}

impl std::str::FromStr for EmailAddress {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::Error::Validation("Invalid email address".to_string()))
    }
}

/// Timestamp wrapper
pub type Timestamp = DateTime<Utc>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_address_parse() {
        let email = EmailAddress::parse("user@example.com").unwrap();
        assert_eq!(email.local, "user");
        assert_eq!(email.domain, "example.com");
        assert_eq!(email.to_string(), "user@example.com");
    }

    #[test]
    fn test_email_address_invalid() {
        assert!(EmailAddress::parse("invalid").is_none());
        assert!(EmailAddress::parse("@example.com").is_none());
        assert!(EmailAddress::parse("user@").is_none());
    }

    #[test]
    fn test_status_roundtrip() {
        assert_eq!("scheduled".parse::<CampaignStatus>().unwrap(), CampaignStatus::Scheduled);
        assert_eq!(CampaignStatus::Draft.to_string(), "draft");
        assert!("launching".parse::<CampaignStatus>().is_err());
    }

    #[test]
    fn test_personalization_mode_display() {
        assert_eq!(PersonalizationMode::Standard.to_string(), "standard");
        assert_eq!(
            "personalization".parse::<PersonalizationMode>().unwrap(),
            PersonalizationMode::Personalization
        );
    }
}
