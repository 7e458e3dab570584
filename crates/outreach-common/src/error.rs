//! Error types for Outreach

use thiserror::Error;

/// Main error type for Outreach
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Duplicate record: {0}")]
    DuplicateKey(String),

    #[error("Value too long: {0}")]
    FieldTooLong(String),

    #[error("External service error: {0}")]
    External(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Outreach
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Config(_) => 500,
            Error::Database(_) => 500,
            Error::Validation(_) => 422,
            Error::NotFound(_) => 404,
            Error::PermissionDenied(_) => 403,
            Error::DuplicateKey(_) => 409,
            Error::FieldTooLong(_) => 422,
            Error::External(_) => 502,
            Error::Internal(_) => 500,
            Error::Other(_) => 500,
        }
    }

    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Error::Config(_) => "CONFIG_ERROR",
            Error::Database(_) => "DATABASE_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
            Error::PermissionDenied(_) => "FORBIDDEN",
            Error::DuplicateKey(_) => "DUPLICATE_KEY",
            Error::FieldTooLong(_) => "FIELD_TOO_LONG",
            Error::External(_) => "EXTERNAL_ERROR",
            Error::Internal(_) => "INTERNAL_ERROR",
            Error::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the user-facing message for a failed save.
    ///
    /// Write errors are classified so the wizard can show a distinct
    /// message per failure class instead of a generic one.
    pub fn save_message(&self) -> String {
        match self {
            Error::PermissionDenied(_) => {
                "You don't have permission to save this campaign.".to_string()
            }
            Error::DuplicateKey(_) => {
                "A campaign with this name already exists.".to_string()
            }
            Error::FieldTooLong(_) => {
                "One of the fields is too long to be saved.".to_string()
            }
            other => format!("Failed to save campaign: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::Validation("x".into()).status_code(), 422);
        assert_eq!(Error::PermissionDenied("x".into()).status_code(), 403);
        assert_eq!(Error::DuplicateKey("x".into()).status_code(), 409);
        assert_eq!(Error::NotFound("x".into()).status_code(), 404);
    }

    #[test]
    fn test_save_message_classification() {
        let msg = Error::DuplicateKey("campaigns_name_key".into()).save_message();
        assert!(msg.contains("already exists"));

        let msg = Error::FieldTooLong("subject_line".into()).save_message();
        assert!(msg.contains("too long"));

        let msg = Error::Database("connection reset".into()).save_message();
        assert!(msg.contains("Failed to save"));
    }
}
