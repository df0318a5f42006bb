//! HTTP client for the fact-checking backend.
//!
//! One POST per call, no retries. The API key travels in the `X-API-Key`
//! header; an unset key is sent as an empty string, which the backend treats
//! as anonymous access rather than a client-side error.

use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::FactCheckResult;

/// Hosted backend used when no override is configured.
pub const DEFAULT_BACKEND_URL: &str = "https://factcheck-ai-backend.onrender.com";

/// Backend request path for claim verification.
pub const FACTCHECK_PATH: &str = "/api/v1/factcheck";

/// Fallback message when a backend error body carries no `error` field.
pub const GENERIC_BACKEND_ERROR: &str = "Backend service error";

// ============================================================================
// Error types
// ============================================================================

/// Failures observed while calling the backend.
///
/// `Api` carries the HTTP status and the raw error body so callers can
/// classify or relay it; `Transport` covers everything below HTTP.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// The HTTP status, absent for network-level failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }
}

// ============================================================================
// Config
// ============================================================================

/// Fact-check client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Resolve configuration with environment fallbacks: explicit values win,
    /// then `FACTCHECK_BACKEND_URL` / `FACTCHECK_API_KEY`, then the defaults.
    pub fn new(base_url: Option<String>, api_key: Option<String>) -> Self {
        let base_url = base_url
            .or_else(|| std::env::var("FACTCHECK_BACKEND_URL").ok())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let api_key = api_key
            .or_else(|| std::env::var("FACTCHECK_API_KEY").ok())
            .unwrap_or_default();

        Self {
            base_url,
            api_key,
            timeout_secs: 30,
        }
    }
}

// ============================================================================
// FactCheckClient
// ============================================================================

#[derive(Debug, Serialize)]
struct FactCheckRequest<'a> {
    claim: &'a str,
}

/// Client for `POST /api/v1/factcheck` on the fact-checking backend.
#[derive(Debug, Clone)]
pub struct FactCheckClient {
    client: Client,
    config: ClientConfig,
}

impl FactCheckClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a client with a custom base URL (for testing / integration)
    pub fn with_base_url(mut config: ClientConfig, base_url: String) -> Result<Self, ApiError> {
        config.base_url = base_url;
        Self::new(config)
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Submit a claim and return the backend's JSON body verbatim.
    ///
    /// This is the relay path used by the proxy: 2xx bodies are passed
    /// through untouched so fields this crate does not model survive.
    pub async fn fact_check_raw(&self, claim: &str) -> Result<serde_json::Value, ApiError> {
        let url = format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            FACTCHECK_PATH
        );

        let response = self
            .client
            .post(&url)
            .header("X-API-Key", &self.config.api_key)
            .json(&FactCheckRequest { claim })
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let details = serde_json::from_str::<serde_json::Value>(&error_body).ok();

            let message = details
                .as_ref()
                .and_then(|v| v.get("error"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| GENERIC_BACKEND_ERROR.to_string());

            tracing::error!(status = status.as_u16(), message = %message, "Backend returned an error");

            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
                details,
            });
        }

        let body = response.json::<serde_json::Value>().await?;
        Ok(body)
    }

    /// Submit a claim and decode the backend's verdict.
    pub async fn fact_check(&self, claim: &str) -> Result<FactCheckResult, ApiError> {
        let body = self.fact_check_raw(claim).await?;
        let result = serde_json::from_value(body)?;
        Ok(result)
    }
}

// ============================================================================
// TESTS
// ============================================================================
