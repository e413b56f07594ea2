//! Route modules for the calculation server
//!
//! This module contains endpoint group-specific routers:
//! - health: Liveness endpoint reporting the loaded library version
//! - lookup: Edge energy, total cross section and atomic weight endpoints

pub mod health;
pub mod lookup;

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use xray_core::XrayLibrary;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Physics library, loaded once at startup and never mutated
    pub library: Arc<dyn XrayLibrary>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(library: Arc<dyn XrayLibrary>) -> Self {
        Self { library }
    }
}

/// Request IDs as random UUIDs
#[derive(Clone, Copy, Default)]
struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&uuid::Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

fn request_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id
    )
}

/// Build the main application router by merging all route modules
///
/// Cross-origin requests are allowed from any origin so a browser front end
/// served from another port can call the API.
pub fn build_router(library: Arc<dyn XrayLibrary>) -> Router {
    let state = AppState::new(library);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(cors);

    Router::new()
        .merge(health::routes())
        .merge(lookup::routes())
        .layer(middleware)
        .with_state(state)
}
