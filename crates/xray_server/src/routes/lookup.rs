//! Physics lookup endpoints
//!
//! Each endpoint accepts a JSON body with a fixed schema, hands the values to
//! the library unchanged and wraps the single result in an envelope named
//! after the quantity. Bodies that do not match the schema are rejected
//! before the library is called.

use axum::{extract::State, routing::post, Router};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::{ApiError, AppJson};

/// Body of `POST /edge_energy`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeEnergyRequest {
    /// Atomic number
    #[serde(rename = "Z")]
    pub z: i32,
    /// Shell code (K = 0, L1 = 1, ...)
    pub shell: i32,
}

/// Body of `POST /cs_total`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossSectionRequest {
    /// Atomic number
    #[serde(rename = "Z")]
    pub z: i32,
    /// Photon energy in keV
    pub energy: f64,
}

/// Body of `POST /atomic_weight`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomicWeightRequest {
    /// Atomic number
    #[serde(rename = "Z")]
    pub z: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeEnergyResponse {
    pub energy: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossSectionResponse {
    pub cs_total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomicWeightResponse {
    pub atomic_weight: f64,
}

/// Build the lookup routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/edge_energy", post(edge_energy_handler))
        .route("/cs_total", post(cs_total_handler))
        .route("/atomic_weight", post(atomic_weight_handler))
}

/// POST /edge_energy - Absorption edge energy (keV)
async fn edge_energy_handler(
    State(state): State<AppState>,
    AppJson(request): AppJson<EdgeEnergyRequest>,
) -> Result<AppJson<EdgeEnergyResponse>, ApiError> {
    let energy = state.library.edge_energy(request.z, request.shell)?;
    tracing::debug!(z = request.z, shell = request.shell, energy, "edge energy");
    Ok(AppJson(EdgeEnergyResponse { energy }))
}

/// POST /cs_total - Total cross section (cm²/g)
async fn cs_total_handler(
    State(state): State<AppState>,
    AppJson(request): AppJson<CrossSectionRequest>,
) -> Result<AppJson<CrossSectionResponse>, ApiError> {
    let cs_total = state.library.cs_total(request.z, request.energy)?;
    tracing::debug!(z = request.z, energy = request.energy, cs_total, "total cross section");
    Ok(AppJson(CrossSectionResponse { cs_total }))
}

/// POST /atomic_weight - Atomic weight (g/mol)
async fn atomic_weight_handler(
    State(state): State<AppState>,
    AppJson(request): AppJson<AtomicWeightRequest>,
) -> Result<AppJson<AtomicWeightResponse>, ApiError> {
    let atomic_weight = state.library.atomic_weight(request.z)?;
    tracing::debug!(z = request.z, atomic_weight, "atomic weight");
    Ok(AppJson(AtomicWeightResponse { atomic_weight }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorResponse;
    use approx::assert_relative_eq;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use std::sync::Arc;
    use tower::ServiceExt;
    use xray_core::{XrayDatabase, XrayLibrary};

    fn create_test_state() -> AppState {
        AppState::new(Arc::new(XrayDatabase::bundled().unwrap()))
    }

    async fn post_json(uri: &str, body: &str) -> Response {
        routes()
            .with_state(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_edge_energy_iron_k() {
        let response = post_json("/edge_energy", r#"{"Z": 26, "shell": 0}"#).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: EdgeEnergyResponse = json_body(response).await;
        let direct = XrayDatabase::bundled().unwrap().edge_energy(26, 0).unwrap();
        assert_eq!(body.energy, direct);
        assert_relative_eq!(body.energy, 7.112);
    }

    #[tokio::test]
    async fn test_edge_energy_invalid_z() {
        let response = post_json("/edge_energy", r#"{"Z": 999, "shell": 0}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = json_body(response).await;
        assert_eq!(body.error, "Z out of range");
    }

    #[tokio::test]
    async fn test_edge_energy_unknown_shell() {
        let response = post_json("/edge_energy", r#"{"Z": 26, "shell": 77}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = json_body(response).await;
        assert_eq!(body.error, "Unknown shell macro provided");
    }

    #[tokio::test]
    async fn test_edge_energy_shell_without_data() {
        let response = post_json("/edge_energy", r#"{"Z": 2, "shell": 3}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = json_body(response).await;
        assert_eq!(body.error, "Invalid shell for this atomic number");
    }

    #[tokio::test]
    async fn test_edge_energy_float_z_rejected() {
        let response = post_json("/edge_energy", r#"{"Z": 26.5, "shell": 0}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = json_body(response).await;
        assert!(!body.error.is_empty());
    }

    #[tokio::test]
    async fn test_cs_total_silicon() {
        let response = post_json("/cs_total", r#"{"Z": 14, "energy": 10.0}"#).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: CrossSectionResponse = json_body(response).await;
        assert!(body.cs_total.is_finite() && body.cs_total > 0.0);
    }

    #[tokio::test]
    async fn test_cs_total_accepts_integer_energy() {
        let response = post_json("/cs_total", r#"{"Z": 14, "energy": 10}"#).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: CrossSectionResponse = json_body(response).await;
        let direct = XrayDatabase::bundled().unwrap().cs_total(14, 10.0).unwrap();
        assert_eq!(body.cs_total, direct);
    }

    #[tokio::test]
    async fn test_cs_total_negative_energy() {
        let response = post_json("/cs_total", r#"{"Z": 14, "energy": -1.0}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = json_body(response).await;
        assert_eq!(body.error, "Energy must be strictly positive");
    }

    #[tokio::test]
    async fn test_cs_total_energy_beyond_table() {
        let response = post_json("/cs_total", r#"{"Z": 14, "energy": 5000.0}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = json_body(response).await;
        assert_eq!(body.error, "Spline extrapolation is not allowed");
    }

    #[tokio::test]
    async fn test_cs_total_transuranic() {
        let response = post_json("/cs_total", r#"{"Z": 94, "energy": 10.0}"#).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: CrossSectionResponse = json_body(response).await;
        let direct = XrayDatabase::bundled().unwrap().cs_total(94, 10.0).unwrap();
        assert_eq!(body.cs_total, direct);
    }

    #[tokio::test]
    async fn test_cs_total_missing_energy() {
        let response = post_json("/cs_total", r#"{"Z": 14}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = json_body(response).await;
        assert!(body.error.contains("energy"));
    }

    #[tokio::test]
    async fn test_atomic_weight_hydrogen() {
        let response = post_json("/atomic_weight", r#"{"Z": 1}"#).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: AtomicWeightResponse = json_body(response).await;
        assert_relative_eq!(body.atomic_weight, 1.008, epsilon = 1e-3);
    }

    #[tokio::test]
    async fn test_atomic_weight_missing_z() {
        let response = post_json("/atomic_weight", "{}").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = json_body(response).await;
        assert!(body.error.contains("Z"));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let response = post_json("/atomic_weight", r#"{"Z": "#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = json_body(response).await;
        assert!(!body.error.is_empty());
    }

    #[tokio::test]
    async fn test_missing_content_type_is_400() {
        let response = routes()
            .with_state(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/atomic_weight")
                    .body(Body::from(r#"{"Z": 1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = json_body(response).await;
        assert!(!body.error.is_empty());
    }

    #[tokio::test]
    async fn test_extra_keys_ignored() {
        let response = post_json("/atomic_weight", r#"{"Z": 26, "unit": "g/mol"}"#).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_lookup_routes_are_post_only() {
        let response = routes()
            .with_state(create_test_state())
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/edge_energy")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
