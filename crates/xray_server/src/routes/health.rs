//! Health check endpoint
//!
//! Reports liveness and the version of the loaded physics library. The
//! library is loaded before the server binds, so this never reports a
//! degraded state.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

use super::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" while the process is serving
    pub status: String,
    /// Version of the loaded physics library
    pub xraylib_version: String,
}

/// Build the health routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}

/// GET /health - Health check endpoint
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        xraylib_version: state.library.version().to_string(),
    };

    (StatusCode::OK, Json(response))
}
