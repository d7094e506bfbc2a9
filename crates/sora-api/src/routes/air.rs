//! # Air Risk Routes
//!
//! `POST /v1/air-risk` — AEC selection, initial ARC, and residual ARC
//! with strategic mitigation in one call.

use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use sora_air::{
    determine_initial_arc, determine_residual_arc, AirspaceClass, AirspaceControl,
    AirspaceEnvironment, ArcResult, EnvironmentType, LocationType, StrategicMitigationId,
    StrategicMitigations, Typicality,
};
use sora_core::{AirRiskClass, SoraVersion};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::routes::CalculationEnvelope;
use crate::state::AppState;

/// Request body for an air risk calculation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AirRiskRequest {
    /// The SORA edition ("2.0" or "2.5").
    #[schema(value_type = String, example = "2.5")]
    pub sora_version: SoraVersion,
    /// Maximum operating height AGL in metres.
    pub max_height_agl_m: f64,
    /// Maximum operating height AMSL in metres.
    #[serde(default)]
    pub max_height_amsl_m: Option<f64>,
    /// ICAO airspace class ("a"–"g").
    #[schema(value_type = String, example = "g")]
    pub airspace_class: AirspaceClass,
    /// "controlled" or "uncontrolled".
    #[schema(value_type = String, example = "uncontrolled")]
    pub airspace_control: AirspaceControl,
    /// Operation inside a Mode-S veil.
    #[serde(default)]
    pub is_mode_s_veil: bool,
    /// Operation inside a TMZ.
    #[serde(default)]
    pub is_tmz: bool,
    /// "airport", "heliport" or "non_airport".
    #[schema(value_type = String, example = "non_airport")]
    pub location_type: LocationType,
    /// Ground environment under the operation.
    #[schema(value_type = String, example = "rural")]
    pub environment: EnvironmentType,
    /// "typical" or "atypical_segregated".
    #[schema(value_type = String, example = "typical")]
    pub typicality: Typicality,
    /// Explicit residual ARC override from the competent authority.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "b")]
    pub explicit_arc: Option<AirRiskClass>,
    /// Claimed strategic mitigations.
    #[serde(default)]
    #[schema(value_type = Vec<String>, example = json!(["s1", "s3"]))]
    pub strategic_mitigations: Vec<StrategicMitigationId>,
    /// Demonstrated local density rating 1–5.
    #[serde(default)]
    pub local_density_rating: Option<u8>,
    /// Atypical/segregated claim for the residual step.
    #[serde(default)]
    pub is_atypical_segregated: bool,
}

impl Validate for AirRiskRequest {
    fn validate(&self) -> Result<(), String> {
        if !self.max_height_agl_m.is_finite() || self.max_height_agl_m < 0.0 {
            return Err("max_height_agl_m must be a non-negative finite number".to_string());
        }
        if let Some(rating) = self.local_density_rating {
            if !(1..=5).contains(&rating) {
                return Err("local_density_rating must be between 1 and 5".to_string());
            }
        }
        Ok(())
    }
}

impl AirRiskRequest {
    fn environment(&self) -> AirspaceEnvironment {
        AirspaceEnvironment {
            max_height_agl_m: self.max_height_agl_m,
            max_height_amsl_m: self.max_height_amsl_m,
            airspace_class: self.airspace_class,
            control: self.airspace_control,
            is_mode_s_veil: self.is_mode_s_veil,
            is_tmz: self.is_tmz,
            location_type: self.location_type,
            environment: self.environment,
            typicality: self.typicality,
        }
    }

    fn strategic(&self) -> StrategicMitigations {
        StrategicMitigations {
            explicit_residual_arc: self.explicit_arc,
            atypical_segregated: self.is_atypical_segregated,
            local_density_rating: self.local_density_rating,
            strategic_mitigations: self.strategic_mitigations.clone(),
        }
    }
}

/// POST /v1/air-risk — run the air risk engine.
#[utoipa::path(
    post,
    path = "/v1/air-risk",
    operation_id = "compute_air_risk",
    request_body = AirRiskRequest,
    responses(
        (status = 200, description = "Air risk result with initial and residual ARC"),
        (status = 422, description = "Malformed or out-of-domain input", body = crate::error::ErrorBody),
    ),
    tag = "calculations"
)]
pub async fn compute(
    body: Result<Json<AirRiskRequest>, JsonRejection>,
) -> Result<Json<CalculationEnvelope<ArcResult>>, AppError> {
    let request = extract_validated_json(body)?;
    let initial = determine_initial_arc(request.sora_version, &request.environment())?;
    let result = determine_residual_arc(&initial, &request.strategic())?;
    Ok(Json(CalculationEnvelope::new(result)))
}

/// The air risk router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/air-risk", post(compute))
}
