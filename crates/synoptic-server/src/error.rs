//! API error types with structured JSON responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
///
/// The core itself never fails on request data; the only error surface is an
/// organ code with no registered configuration.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unknown organ: {0}")]
    UnknownOrgan(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::UnknownOrgan(organ) => (
                StatusCode::NOT_FOUND,
                "UNKNOWN_ORGAN",
                format!("no configuration registered for organ '{organ}'"),
            ),
        };
        (
            status,
            Json(ErrorBody {
                error: ErrorDetail { code, message },
            }),
        )
            .into_response()
    }
}
