//! FactCheck HTTP proxy API
//!
//! Axum-based HTTP server that sits between the browser-facing frontend and
//! the fact-checking backend. The backend API key is held server-side and is
//! never exposed to callers of this API.
//!
//! Architecture: each endpoint has a thin axum handler that delegates to a
//! pure inner function. The inner functions are directly testable without
//! axum dispatch machinery.
//!
//! Endpoints:
//! - POST    /api/factcheck — validate and forward a claim, relay the verdict
//! - OPTIONS /api/factcheck — CORS preflight
//! - GET     /health        — server info

use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use factcheck_core::{ApiError, ClientConfig, FactCheckClient, FactcheckConfig, MAX_CLAIM_LEN};
use tokio::net::TcpListener;
use tokio::sync::broadcast;

/// Shared state for all HTTP handlers
#[derive(Clone)]
pub struct HttpState {
    pub config: FactcheckConfig,
    pub client: FactCheckClient,
}

/// Build the Axum router with all endpoints
pub fn build_router(state: Arc<HttpState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/factcheck",
            post(factcheck_handler).options(preflight_handler),
        )
        .with_state(state)
}

/// Build the backend client from server configuration, with environment
/// fallbacks for the backend URL and API key.
pub fn create_client(config: &FactcheckConfig) -> Result<FactCheckClient, ApiError> {
    let mut client_config = ClientConfig::new(
        Some(config.backend.base_url.clone()),
        config.backend.api_key.clone(),
    );
    client_config.timeout_secs = config.backend.timeout_secs;
    FactCheckClient::new(client_config)
}

/// Start the HTTP server on the configured address.
/// Gracefully shuts down when the broadcast shutdown signal fires.
pub async fn start_http_server(
    config: FactcheckConfig,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()> {
    let addr = format!("{}:{}", config.http.host, config.http.port);
    let client = create_client(&config)?;
    let state = Arc::new(HttpState { config, client });

    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("FactCheck proxy listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("HTTP server shutting down...");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Inner (directly testable) business logic functions
// ============================================================================

fn invalid_request(message: &str) -> (StatusCode, serde_json::Value) {
    (
        StatusCode::BAD_REQUEST,
        serde_json::json!({ "error": message }),
    )
}

/// Inner fact-check — validates the claim, forwards it to the backend, and
/// relays the backend's body and status. Validation failures never contact
/// the backend.
pub async fn factcheck_inner(
    client: &FactCheckClient,
    payload: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let claim = match payload.get("claim").and_then(|v| v.as_str()) {
        Some(c) if !c.trim().is_empty() => c,
        _ => return invalid_request("Invalid request: claim is required and must be a string"),
    };

    if claim.chars().count() > MAX_CLAIM_LEN {
        return invalid_request("Claim too long: maximum 1000 characters");
    }

    match client.fact_check_raw(claim).await {
        Ok(body) => (StatusCode::OK, body),
        Err(ApiError::Api {
            status, message, ..
        }) => {
            // Relay the backend's status with its message (or the generic one
            // already substituted by the client)
            let status =
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, serde_json::json!({ "error": message }))
        }
        Err(e) => {
            tracing::error!(error = %e, "FactCheck proxy error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": "Internal server error" }),
            )
        }
    }
}

/// Inner health — server info (pure, no IO).
pub fn health_inner(state: &HttpState) -> serde_json::Value {
    serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "backend": state.client.base_url(),
    })
}

// ============================================================================
// Axum handler wrappers (thin — delegate to inner functions)
// ============================================================================

pub async fn factcheck_handler(
    State(state): State<Arc<HttpState>>,
    Json(payload): Json<serde_json::Value>,
) -> impl IntoResponse {
    let (status, body) = factcheck_inner(&state.client, payload).await;
    (status, Json(body))
}

/// CORS preflight for browser callers.
pub async fn preflight_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}

pub async fn health_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(health_inner(&state)))
}

// ============================================================================
// Unit Tests — inner functions against a mock backend
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use factcheck_core::GENERIC_BACKEND_ERROR;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: String) -> FactCheckClient {
        let config = ClientConfig {
            base_url: String::new(),
            api_key: "test-key".to_string(),
            timeout_secs: 5,
        };
        FactCheckClient::with_base_url(config, base_url).unwrap()
    }

    #[tokio::test]
    async fn test_factcheck_inner_missing_claim_is_400() {
        let mock_server = MockServer::start().await;
        let client = test_client(mock_server.uri());

        // The backend must never be contacted on validation failure
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let (status, body) =
            factcheck_inner(&client, serde_json::json!({ "not_claim": 1 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Invalid request: claim is required and must be a string"
        );
    }

    #[tokio::test]
    async fn test_factcheck_inner_non_string_claim_is_400() {
        let mock_server = MockServer::start().await;
        let client = test_client(mock_server.uri());

        let (status, body) =
            factcheck_inner(&client, serde_json::json!({ "claim": 42 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_factcheck_inner_overlong_claim_is_400_before_backend() {
        let mock_server = MockServer::start().await;
        let client = test_client(mock_server.uri());

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let long_claim = "a".repeat(MAX_CLAIM_LEN + 1);
        let (status, body) =
            factcheck_inner(&client, serde_json::json!({ "claim": long_claim })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Claim too long: maximum 1000 characters");
    }

    #[tokio::test]
    async fn test_factcheck_inner_relays_backend_body_verbatim() {
        let mock_server = MockServer::start().await;
        let client = test_client(mock_server.uri());

        let backend_body = serde_json::json!({
            "verdict": "False",
            "confidence": 95,
            "reasoning": "Satellite imagery shows a sphere.",
            "sources": [{ "title": "Test Source", "url": "https://example.com" }],
            "claim": "The Earth is flat",
            "extra_field": "preserved"
        });

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(backend_body.clone()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let (status, body) = factcheck_inner(
            &client,
            serde_json::json!({ "claim": "The Earth is flat" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, backend_body);
    }

    #[tokio::test]
    async fn test_factcheck_inner_relays_backend_error_status() {
        let mock_server = MockServer::start().await;
        let client = test_client(mock_server.uri());

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": "Rate limit exceeded"
            })))
            .mount(&mock_server)
            .await;

        let (status, body) =
            factcheck_inner(&client, serde_json::json!({ "claim": "x" })).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "Rate limit exceeded");
    }

    #[tokio::test]
    async fn test_factcheck_inner_backend_error_without_message_is_generic() {
        let mock_server = MockServer::start().await;
        let client = test_client(mock_server.uri());

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let (status, body) =
            factcheck_inner(&client, serde_json::json!({ "claim": "x" })).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], GENERIC_BACKEND_ERROR);
    }

    #[tokio::test]
    async fn test_factcheck_inner_unreachable_backend_is_500() {
        let client = test_client("http://127.0.0.1:1".to_string());

        let (status, body) =
            factcheck_inner(&client, serde_json::json!({ "claim": "x" })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_health_inner_reports_backend_url() {
        let client = test_client("http://backend.test".to_string());
        let state = HttpState {
            config: FactcheckConfig::default(),
            client,
        };

        let body = health_inner(&state);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["backend"], "http://backend.test");
    }
}
