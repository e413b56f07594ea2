//! Request-boundary error handling
//!
//! Every failure a handler can produce becomes an [`ApiError`], which renders
//! as `{"error": "<message>"}` with HTTP 400. The JSON extractor [`AppJson`]
//! routes body rejections through the same type so malformed payloads get the
//! same envelope as library errors.

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use xray_core::XrayError;

/// Errors returned to the client
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body is not valid JSON, or keys are missing or of the wrong type.
    /// The library is never invoked for these.
    #[error("{0}")]
    MalformedRequest(String),

    /// The library rejected the input. Its message is passed through verbatim.
    #[error(transparent)]
    Computation(#[from] XrayError),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) | ApiError::Computation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}

/// Error envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        match &self {
            ApiError::MalformedRequest(_) => {
                tracing::warn!(%status, error = %message, "Rejected malformed request")
            }
            ApiError::Computation(_) => {
                tracing::warn!(%status, error = %message, "Computation failed")
            }
        }

        (status, axum::Json(ErrorResponse { error: message })).into_response()
    }
}

/// JSON extractor and response wrapper whose rejection is [`ApiError`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

impl<T> IntoResponse for AppJson<T>
where
    axum::Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
