//! Error classification for display.
//!
//! Maps an [`ApiError`] (or a local validation failure) onto a user-facing
//! message, a closed category, and a retryability flag. Pure and stateless:
//! no retries happen here, retry is always a user-initiated re-submission.

use serde::Serialize;

use crate::client::ApiError;

/// Closed set of error categories the presentation layer can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    RateLimited,
    AuthFailed,
    ServerError,
    BadRequest,
    Api,
    Network,
    Validation,
    Unknown,
}

/// Display-ready error description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub message: String,
    pub kind: ErrorKind,
    pub suggestion: Option<String>,
    pub retryable: bool,
}

/// Classify a backend call failure.
pub fn classify(error: &ApiError) -> ErrorInfo {
    match error {
        ApiError::Api {
            status, message, ..
        } => classify_status(*status, message),

        ApiError::Transport(_) => ErrorInfo {
            message: "Network error. Please check your internet connection.".to_string(),
            kind: ErrorKind::Network,
            suggestion: Some("Check your connection and try again".to_string()),
            retryable: true,
        },

        ApiError::Decode(_) => ErrorInfo {
            message: "An unexpected error occurred. Please try again.".to_string(),
            kind: ErrorKind::Unknown,
            suggestion: Some("If this persists, please contact support".to_string()),
            retryable: true,
        },
    }
}

fn classify_status(status: u16, message: &str) -> ErrorInfo {
    match status {
        429 => ErrorInfo {
            message: "Too many requests. Please wait a moment before trying again.".to_string(),
            kind: ErrorKind::RateLimited,
            suggestion: Some("Rate limit: 2 requests per second, 10 per minute".to_string()),
            retryable: true,
        },
        401 => ErrorInfo {
            message: "Authentication failed. Please check your API configuration.".to_string(),
            kind: ErrorKind::AuthFailed,
            suggestion: Some("Contact support if this persists".to_string()),
            retryable: false,
        },
        s if s >= 500 => ErrorInfo {
            message: "Server error. Our fact-checking service is temporarily unavailable."
                .to_string(),
            kind: ErrorKind::ServerError,
            suggestion: Some("Please try again in a few minutes".to_string()),
            retryable: true,
        },
        400 => ErrorInfo {
            message: format!("Invalid request: {}", message),
            kind: ErrorKind::BadRequest,
            suggestion: Some("Please check your input and try again".to_string()),
            retryable: true,
        },
        _ => ErrorInfo {
            message: if message.is_empty() {
                "API error occurred".to_string()
            } else {
                message.to_string()
            },
            kind: ErrorKind::Api,
            suggestion: None,
            retryable: true,
        },
    }
}

/// Build a non-retryable local validation error.
pub fn validation_error(message: impl Into<String>) -> ErrorInfo {
    ErrorInfo {
        message: message.into(),
        kind: ErrorKind::Validation,
        suggestion: None,
        retryable: false,
    }
}
