//! # Validated JSON Extraction
//!
//! Handlers take `Result<Json<T>, JsonRejection>` and pass it through
//! [`extract_validated_json`]: deserialization failures and `Validate`
//! failures both normalize to 422 with a field-level message, so no
//! partial computation ever runs on a malformed request.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Request-level validation, run after deserialization.
pub trait Validate {
    /// Check semantic validity; the message becomes the 422 body.
    fn validate(&self) -> Result<(), String>;
}

/// Unwrap a JSON body and run its validation.
pub fn extract_validated_json<T: Validate>(
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let Json(value) = body.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    value
        .validate()
        .map_err(AppError::Validation)?;
    Ok(value)
}
