//! # Complete Calculation Route
//!
//! `POST /v1/sora/complete` — the end-to-end pipeline through the
//! orchestrator. Regulatory terminal states (out of scope, Category C)
//! come back as 200 with a reason code; the handler also records the
//! calculation outcome metric.

use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Extension, Json, Router};
use serde::Serialize;

use sora_engine::{execute_complete, SoraCompleteRequest, SoraCompleteResult};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::middleware::metrics::ApiMetrics;
use crate::routes::CalculationEnvelope;
use crate::state::AppState;

impl Validate for SoraCompleteRequest {
    fn validate(&self) -> Result<(), String> {
        if !self.ua.dimension_m.is_finite() || self.ua.dimension_m <= 0.0 {
            return Err("ua.dimension_m must be a positive finite number".to_string());
        }
        if !self.ua.max_speed_mps.is_finite() || self.ua.max_speed_mps <= 0.0 {
            return Err("ua.max_speed_mps must be a positive finite number".to_string());
        }
        Ok(())
    }
}

/// Flat summary alongside the full stage results, for callers that only
/// need the headline numbers.
#[derive(Debug, Serialize)]
pub struct CompleteSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intrinsic_grc: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_grc: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_arc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residual_arc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmpr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_compliant: Option<bool>,
}

/// The complete-calculation response body.
#[derive(Debug, Serialize)]
pub struct CompleteResponse {
    pub summary: CompleteSummary,
    #[serde(flatten)]
    pub detail: SoraCompleteResult,
}

impl CompleteResponse {
    fn new(detail: SoraCompleteResult) -> Self {
        let summary = CompleteSummary {
            intrinsic_grc: detail.intrinsic_grc().map(|g| g.get()),
            final_grc: detail.final_grc().map(|g| g.get()),
            initial_arc: detail.air.as_ref().map(|a| a.initial_arc.as_str().to_string()),
            residual_arc: detail.residual_arc().map(|a| a.as_str().to_string()),
            sail: detail
                .sail
                .as_ref()
                .and_then(|s| s.sail)
                .map(|s| s.as_roman().to_string()),
            tmpr: detail.tmpr.as_ref().map(|t| t.level.as_str().to_string()),
            is_compliant: detail.is_compliant(),
        };
        Self { summary, detail }
    }
}

/// POST /v1/sora/complete — run the full pipeline.
#[utoipa::path(
    post,
    path = "/v1/sora/complete",
    operation_id = "compute_complete",
    request_body = SoraCompleteRequest,
    responses(
        (status = 200, description = "Complete result; terminal regulatory outcomes carry a reason code"),
        (status = 422, description = "Malformed or out-of-domain input", body = crate::error::ErrorBody),
    ),
    tag = "calculations"
)]
pub async fn compute(
    metrics: Option<Extension<ApiMetrics>>,
    body: Result<Json<SoraCompleteRequest>, JsonRejection>,
) -> Result<Json<CalculationEnvelope<CompleteResponse>>, AppError> {
    let request = extract_validated_json(body)?;
    let result = execute_complete(&request)?;

    if let Some(Extension(metrics)) = metrics {
        let outcome = match result.reason_code {
            Some(code) => code.as_str(),
            None => "ASSIGNED",
        };
        metrics.record_calculation(result.sora_version.as_str(), outcome);
    }

    Ok(Json(CalculationEnvelope::new(CompleteResponse::new(result))))
}

/// The complete-calculation router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/sora/complete", post(compute))
}
