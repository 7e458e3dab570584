//! HTTP handlers

pub mod accounts;
pub mod campaigns;
pub mod contacts;
pub mod email_lists;
pub mod health;
pub mod personalization;
pub mod uploads;

use axum::http::StatusCode;
use axum::Json;
use outreach_common::types::EmailAddress;
use outreach_common::Error;
use serde::Serialize;

/// Error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map an application error to its wire shape.
pub fn error_response(e: Error) -> ApiError {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: e.code().to_string(),
            message: e.to_string(),
        }),
    )
}

/// 404 with a consistent body
pub fn not_found(message: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "not_found".to_string(),
            message: message.to_string(),
        }),
    )
}

/// 400 for request validation failures
pub fn validation_error(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "validation_error".to_string(),
            message: message.to_string(),
        }),
    )
}

/// Reject blank or malformed email input before any write.
pub fn valid_email(value: &str) -> bool {
    EmailAddress::parse(value.trim()).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_email_rejects_malformed_input() {
        assert!(valid_email("jane@acme.com"));
        assert!(valid_email("  jane@acme.com  "));
        assert!(!valid_email(""));
        assert!(!valid_email("   "));
        assert!(!valid_email("jane"));
        assert!(!valid_email("@acme.com"));
        assert!(!valid_email("jane@"));
    }

    #[test]
    fn test_error_response_maps_status_and_code() {
        let (status, body) = error_response(Error::DuplicateKey("dup".to_string()));
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.error, "DUPLICATE_KEY");

        let (status, _) = error_response(Error::External("pitch".to_string()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
