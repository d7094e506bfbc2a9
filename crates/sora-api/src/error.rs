//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from the engine crates to HTTP status codes and
//! returns JSON error bodies with a machine-readable code.
//!
//! Regulatory outcomes (out-of-scope, Category C, compliance gaps) are
//! NOT errors — they travel as 200-level structured responses. Only
//! malformed input and infrastructure failures land here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use sora_core::SoraError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (422). Covers both JSON deserialization
    /// failures and domain validation — the client sent syntactically
    /// valid HTTP with semantically invalid content.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal server error (500). Message is logged, not returned.
    #[error("internal error: {0}")]
    Internal(String),

    /// Calculation service returned an error or is unreachable (502).
    #[error("upstream calculation service error: {0}")]
    Upstream(String),

    /// Service dependency not configured (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// The HTTP status and machine-readable code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        }
    }
}

impl From<SoraError> for AppError {
    fn from(err: SoraError) -> Self {
        // Every engine error class is a property of the request.
        Self::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match &self {
            // Never leak internals on 500s.
            Self::Internal(detail) => {
                tracing::error!(%detail, "internal error");
                "internal error".to_string()
            }
            other => other.to_string(),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sora_error_maps_to_validation() {
        let err: AppError = SoraError::validation("ua_dimension_m", "must be positive").into();
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_upstream_maps_to_502() {
        let (status, _) = AppError::Upstream("boom".into()).status_and_code();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
