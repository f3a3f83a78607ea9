//! API routes for rythmd

use crate::server::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rythm_common::gateway::{parse_conversation, GatewayFailure, GatewayReply};
use rythm_common::{GatewayError, ValidationError};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

type AppStateArc = Arc<AppState>;

/// Error reply for `/api/llama`
#[derive(Debug)]
pub enum ApiError {
    Invalid(ValidationError),
    Upstream(GatewayError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> GatewayFailure {
        match self {
            ApiError::Invalid(e) => GatewayFailure {
                error: "Invalid messages format".to_string(),
                message: e.to_string(),
                details: None,
            },
            ApiError::Upstream(e) => {
                let (error, message) = match e {
                    GatewayError::NotConfigured | GatewayError::Status { .. } => (
                        "Failed to get AI response",
                        "The AI service is currently unavailable. Please try again in a moment.",
                    ),
                    GatewayError::Malformed(_) | GatewayError::EmptyResponse => (
                        "Invalid response format",
                        "The AI service returned an unexpected response. Please try again.",
                    ),
                    GatewayError::Transport(_) | GatewayError::Timeout(_) => (
                        "Failed to process your request",
                        "I'm having trouble connecting right now. Please try again in a moment.",
                    ),
                };
                GatewayFailure {
                    error: error.to_string(),
                    message: message.to_string(),
                    details: Some(e.to_string()),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Invalid(e)
    }
}

impl From<GatewayError> for ApiError {
    fn from(e: GatewayError) -> Self {
        ApiError::Upstream(e)
    }
}

// ============================================================================
// Gateway Routes
// ============================================================================

pub fn gateway_routes() -> Router<AppStateArc> {
    Router::new().route("/api/llama", post(llama))
}

/// The body is taken raw so a malformed payload still gets the JSON 400
/// shape instead of axum's plain-text rejection.
async fn llama(
    State(state): State<AppStateArc>,
    body: Bytes,
) -> Result<Json<GatewayReply>, ApiError> {
    let value: Value = serde_json::from_slice(&body).map_err(|e| {
        warn!("Rejected /api/llama body: {}", e);
        ValidationError::InvalidJson(e.to_string())
    })?;
    let messages = parse_conversation(&value).map_err(|e| {
        warn!("Rejected /api/llama body: {}", e);
        e
    })?;

    info!(
        "Relaying {} messages to {}",
        messages.len(),
        state.provider.name()
    );

    let response = state.provider.complete(&messages).await.map_err(|e| {
        error!("Provider call failed: {}", e);
        e
    })?;

    Ok(Json(GatewayReply {
        response,
        success: true,
    }))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/ping", get(ping))
}

async fn health(State(state): State<AppStateArc>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}

async fn ping(State(state): State<AppStateArc>) -> Json<Value> {
    Json(json!({ "message": state.ping_message }))
}
