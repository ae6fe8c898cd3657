//! Shared API state, health check and error mapping

use crate::social::{TuneInError, TuneInManager};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

/// Shared server state
pub struct ServerState {
    pub tune_in: Arc<TuneInManager>,
    /// Cap applied to an explicit `limit` on list endpoints
    pub max_page_size: usize,
}

/// Shared API state
pub type ApiState = Arc<ServerState>;

impl ServerState {
    pub fn from_app_state(state: AppState) -> ApiState {
        Arc::new(Self {
            tune_in: Arc::new(TuneInManager::new(state.store.clone())),
            max_page_size: state.config.max_page_size,
        })
    }
}

// ============================================================================
// Health check
// ============================================================================

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub neo4j: String,
}

/// Health check handler — verifies connectivity to Neo4j.
///
/// Returns 200 + `"ok"` when connected, 503 + `"unhealthy"` otherwise.
pub async fn health(State(state): State<ApiState>) -> (StatusCode, Json<HealthResponse>) {
    let neo4j_ok = match state.tune_in.store().health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!("Neo4j health check failed: {}", e);
            false
        }
    };

    let (http_status, status, neo4j) = if neo4j_ok {
        (StatusCode::OK, "ok", "connected")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "disconnected")
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            neo4j: neo4j.to_string(),
        }),
    )
}

// ============================================================================
// Error handling
// ============================================================================

/// API error type
#[derive(Debug)]
pub enum AppError {
    Internal(anyhow::Error),
    NotFound(String),
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal(e) => {
                tracing::error!("Request failed: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<TuneInError> for AppError {
    fn from(err: TuneInError) -> Self {
        match err {
            TuneInError::InvalidRequest(msg) => AppError::BadRequest(msg),
            TuneInError::NotFound(msg) => AppError::NotFound(msg),
            TuneInError::UnknownIdentity(id) => {
                AppError::NotFound(format!("Identity '{}' not found", id))
            }
            TuneInError::Store(e) => AppError::Internal(e),
        }
    }
}
