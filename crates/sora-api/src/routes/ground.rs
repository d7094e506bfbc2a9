//! # Ground Risk Routes
//!
//! `POST /v1/ground-risk` — intrinsic GRC determination plus mitigation
//! application in one call. Out-of-scope and over-limit outcomes return
//! 200 with the flags set; only malformed input is rejected.

use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use sora_core::SoraVersion;
use sora_ground::{
    compute_ground_risk, GroundMitigation, GroundRiskContext, GroundRiskResult,
    OperationalScenario, PopulationDensityBand, UaProfile,
};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::routes::CalculationEnvelope;
use crate::state::AppState;

/// Request body for a ground risk calculation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GroundRiskRequest {
    /// The SORA edition ("2.0" or "2.5").
    #[schema(value_type = String, example = "2.5")]
    pub sora_version: SoraVersion,
    /// UA characteristic dimension in metres.
    pub ua_dimension_m: f64,
    /// UA maximum speed in m/s.
    pub ua_speed_mps: f64,
    /// Maximum take-off mass in kg.
    #[serde(default)]
    pub mtom_kg: Option<f64>,
    /// Expected kinetic energy in joules (2.0 cross-check only).
    #[serde(default)]
    pub kinetic_energy_j: Option<f64>,
    /// SORA 2.0 operational scenario.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "bvlos_populated")]
    pub scenario: Option<OperationalScenario>,
    /// SORA 2.5 density band, given directly.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "below_500")]
    pub density_band: Option<PopulationDensityBand>,
    /// SORA 2.5 numeric density in people/km².
    #[serde(default)]
    pub population_density: Option<f64>,
    /// Whether the operation stays over a controlled ground area.
    #[serde(default)]
    pub is_controlled_ground_area: bool,
    /// Claimed ground-risk mitigations.
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub mitigations: Vec<GroundMitigation>,
}

impl Validate for GroundRiskRequest {
    fn validate(&self) -> Result<(), String> {
        if !self.ua_dimension_m.is_finite() || self.ua_dimension_m <= 0.0 {
            return Err("ua_dimension_m must be a positive finite number".to_string());
        }
        if !self.ua_speed_mps.is_finite() || self.ua_speed_mps <= 0.0 {
            return Err("ua_speed_mps must be a positive finite number".to_string());
        }
        match self.sora_version {
            SoraVersion::V2_0 => {
                if self.scenario.is_none() && !self.is_controlled_ground_area {
                    return Err("SORA 2.0 requires a scenario".to_string());
                }
            }
            SoraVersion::V2_5 => {
                if self.density_band.is_none()
                    && self.population_density.is_none()
                    && !self.is_controlled_ground_area
                {
                    return Err(
                        "SORA 2.5 requires a density band, a numeric density, or the controlled-ground-area flag"
                            .to_string(),
                    );
                }
            }
        }
        Ok(())
    }
}

impl GroundRiskRequest {
    fn ua_profile(&self) -> UaProfile {
        UaProfile {
            dimension_m: self.ua_dimension_m,
            max_speed_mps: self.ua_speed_mps,
            mtom_kg: self.mtom_kg,
            kinetic_energy_j: self.kinetic_energy_j,
        }
    }

    fn ground_context(&self) -> GroundRiskContext {
        GroundRiskContext {
            version: self.sora_version,
            scenario: self.scenario,
            density_band: self.density_band,
            population_density: self.population_density,
            controlled_ground_area: self.is_controlled_ground_area,
        }
    }
}

/// POST /v1/ground-risk — run the ground risk engine.
#[utoipa::path(
    post,
    path = "/v1/ground-risk",
    operation_id = "compute_ground_risk",
    request_body = GroundRiskRequest,
    responses(
        (status = 200, description = "Ground risk result, including out-of-scope and over-limit outcomes"),
        (status = 422, description = "Malformed or out-of-domain input", body = crate::error::ErrorBody),
    ),
    tag = "calculations"
)]
pub async fn compute(
    body: Result<Json<GroundRiskRequest>, JsonRejection>,
) -> Result<Json<CalculationEnvelope<GroundRiskResult>>, AppError> {
    let request = extract_validated_json(body)?;
    let result = compute_ground_risk(
        &request.ua_profile(),
        &request.ground_context(),
        &request.mitigations,
    )?;
    Ok(Json(CalculationEnvelope::new(result)))
}

/// The ground risk router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/ground-risk", post(compute))
}
