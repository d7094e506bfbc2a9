//! # SAIL Routes
//!
//! `POST /v1/sail` — SAIL determination from a final GRC and residual
//! ARC. When a calculation service is configured, SORA 2.5 requests are
//! delegated to it and interpreted under the engine's trust rules; 2.0
//! and unconfigured deployments resolve locally. Either way the
//! response shape is identical and states its source.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use sora_core::{AirRiskClass, SoraVersion};
use sora_engine::{
    interpret_remote_sail, RemoteSailOutcome, SailComputationRequest,
};
use sora_oso::required_oso_count;
use sora_sail::{determine_sail, SailOutcome, SailResult};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::routes::CalculationEnvelope;
use crate::state::AppState;

/// Request body for a SAIL determination.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SailRequest {
    /// The SORA edition ("2.0" or "2.5").
    #[schema(value_type = String, example = "2.0")]
    pub sora_version: SoraVersion,
    /// The final GRC.
    pub final_grc: u8,
    /// The residual ARC ("a"–"d").
    #[schema(value_type = String, example = "c")]
    pub residual_arc: AirRiskClass,
}

impl Validate for SailRequest {
    fn validate(&self) -> Result<(), String> {
        // Range handling belongs to the engine (out-of-range GRC is a
        // regulatory outcome, not a rejection); only absurd values stop here.
        if self.final_grc > 100 {
            return Err("final_grc is not a plausible GRC".to_string());
        }
        Ok(())
    }
}

/// SAIL determination response, local or delegated.
#[derive(Debug, Serialize)]
pub struct SailResponse {
    /// The determination itself.
    pub result: SailResult,
    /// Objectives mandated at the assigned SAIL; absent for Category C
    /// and out-of-scope outcomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_oso_count: Option<usize>,
    /// Remote document reference, when delegated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// "local" or "remote".
    pub source: &'static str,
}

/// POST /v1/sail — determine the SAIL.
#[utoipa::path(
    post,
    path = "/v1/sail",
    operation_id = "compute_sail",
    request_body = SailRequest,
    responses(
        (status = 200, description = "SAIL determination, including Category C and out-of-scope outcomes"),
        (status = 422, description = "Malformed input", body = crate::error::ErrorBody),
        (status = 502, description = "Calculation service failed", body = crate::error::ErrorBody),
    ),
    tag = "calculations"
)]
pub async fn compute(
    State(state): State<AppState>,
    body: Result<Json<SailRequest>, JsonRejection>,
) -> Result<Json<CalculationEnvelope<SailResponse>>, AppError> {
    let request = extract_validated_json(body)?;

    // Delegate 2.5 to the calculation service when one is configured.
    let response = match (&state.calc_client, request.sora_version) {
        (Some(client), SoraVersion::V2_5) => {
            delegate(client, request.sora_version, request.final_grc, request.residual_arc).await?
        }
        _ => local(request.sora_version, request.final_grc, request.residual_arc),
    };
    Ok(Json(CalculationEnvelope::new(response)))
}

fn local(version: SoraVersion, final_grc: u8, residual_arc: AirRiskClass) -> SailResponse {
    let result = determine_sail(version, final_grc, residual_arc);
    let required_oso_count = result
        .sail
        .map(|sail| required_oso_count(version, sail));
    SailResponse {
        result,
        required_oso_count,
        reference: None,
        source: "local",
    }
}

async fn delegate(
    client: &sora_calcsvc::CalcServiceClient,
    version: SoraVersion,
    final_grc: u8,
    residual_arc: AirRiskClass,
) -> Result<SailResponse, AppError> {
    let wire = SailComputationRequest::new(version, final_grc, residual_arc);
    let remote = client
        .compute_sail(&wire)
        .await
        .map_err(|err| AppError::Upstream(err.to_string()))?;
    let reference = remote.reference.clone();
    let outcome = interpret_remote_sail(version, &remote)?;

    let response = match outcome {
        RemoteSailOutcome::Assigned {
            sail,
            required_oso_count,
        } => SailResponse {
            result: SailResult {
                version,
                is_in_scope: true,
                sail: Some(sail),
                outcome: SailOutcome::Assigned,
                notes: vec![format!(
                    "SAIL {sail} assigned by the calculation service for final GRC {final_grc} and residual ARC-{residual_arc}"
                )],
            },
            required_oso_count: Some(required_oso_count),
            reference,
            source: "remote",
        },
        RemoteSailOutcome::CategoryC => SailResponse {
            result: SailResult {
                version,
                is_in_scope: false,
                sail: None,
                outcome: SailOutcome::CategoryC,
                notes: vec![
                    "calculation service reports Category C; no SAIL is assigned".to_string(),
                ],
            },
            required_oso_count: None,
            reference,
            source: "remote",
        },
    };
    Ok(response)
}

/// The SAIL router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/sail", post(compute))
}
