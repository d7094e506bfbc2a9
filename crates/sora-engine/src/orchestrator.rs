//! # End-to-End Orchestration
//!
//! [`execute_complete`] sequences the four engines and records why the
//! sequence stopped when it stops early. Skipped stages stay `None` on
//! the result — a Category C result has no SAIL, no TMPR and no OSO
//! count, and nothing downstream invents them.

use serde::{Deserialize, Serialize};

use sora_air::{determine_initial_arc, determine_residual_arc, ArcResult};
use sora_core::{AirRiskClass, GrcValue, SoraError, SoraVersion};
use sora_ground::{compute_ground_risk, GroundRiskResult};
use sora_oso::{required_oso_count, tmpr_for, validate_compliance, ComplianceResult, TmprResult};
use sora_sail::{determine_sail, SailOutcome, SailResult};

use crate::advisory::{advisory_risk, AdvisoryRisk};
use crate::reason::ReasonCode;
use crate::request::SoraCompleteRequest;

/// The complete risk classification outcome.
///
/// Stage results are `None` when the pipeline short-circuited before
/// reaching them; `reason_code` says why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoraCompleteResult {
    /// The SORA edition computed under.
    pub sora_version: SoraVersion,
    /// Ground risk stage output.
    pub ground: GroundRiskResult,
    /// Air risk stage output (initial and residual ARC).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air: Option<ArcResult>,
    /// SAIL stage output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sail: Option<SailResult>,
    /// TMPR derived from the residual ARC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmpr: Option<TmprResult>,
    /// Compliance validation, present when the request declared OSO
    /// implementations and the pipeline reached the OSO stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance: Option<ComplianceResult>,
    /// Objectives mandated at the assigned SAIL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_oso_count: Option<usize>,
    /// Declared implementations addressing a required objective.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implemented_oso_count: Option<usize>,
    /// Advisory overlay — non-regulatory, computed last.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<AdvisoryRisk>,
    /// Why the pipeline stopped early or took a special path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<ReasonCode>,
    /// Human-readable account of an early stop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_of_scope_reason: Option<String>,
}

impl SoraCompleteResult {
    /// The intrinsic GRC, when the ground stage produced one.
    pub fn intrinsic_grc(&self) -> Option<GrcValue> {
        self.ground.intrinsic_grc
    }

    /// The final GRC, when the ground stage produced one.
    pub fn final_grc(&self) -> Option<GrcValue> {
        self.ground.final_grc
    }

    /// The residual ARC, when the air stage ran.
    pub fn residual_arc(&self) -> Option<AirRiskClass> {
        self.air.as_ref().and_then(|a| a.residual_arc)
    }

    /// Whether the declared implementations satisfy the requirement set.
    pub fn is_compliant(&self) -> Option<bool> {
        self.compliance.as_ref().map(|c| c.is_compliant)
    }

    fn terminal(
        request: &SoraCompleteRequest,
        ground: GroundRiskResult,
        air: Option<ArcResult>,
        sail: Option<SailResult>,
        reason: ReasonCode,
        why: String,
    ) -> Self {
        Self {
            sora_version: request.sora_version,
            ground,
            air,
            sail,
            tmpr: None,
            compliance: None,
            required_oso_count: None,
            implemented_oso_count: None,
            advisory: None,
            reason_code: Some(reason),
            out_of_scope_reason: Some(why),
        }
    }
}

/// Run the full classification pipeline for one request.
///
/// Returns `Err` only for malformed input; every regulatory outcome —
/// including out-of-scope and Category C — is a well-formed result.
pub fn execute_complete(request: &SoraCompleteRequest) -> Result<SoraCompleteResult, SoraError> {
    let version = request.sora_version;

    // Stage 1: ground risk.
    let ground = compute_ground_risk(
        &request.ua,
        &request.ground_context(),
        &request.ground_mitigations,
    )?;

    if ground.is_out_of_scope {
        tracing::info!(%version, "ground risk out of scope; skipping remaining stages");
        let why = ground
            .validation_message
            .clone()
            .unwrap_or_else(|| "intrinsic GRC is undefined for this operation".to_string());
        return Ok(SoraCompleteResult::terminal(
            request,
            ground,
            None,
            None,
            ReasonCode::ScopeGreyCell,
            why,
        ));
    }

    let Some(final_grc) = ground.final_grc else {
        // The credit sum left the representable range entirely.
        let why = ground
            .validation_message
            .clone()
            .unwrap_or_else(|| "final GRC left the methodology's range".to_string());
        return Ok(SoraCompleteResult::terminal(
            request,
            ground,
            None,
            None,
            ReasonCode::ScopeHighGrc,
            why,
        ));
    };

    // Stage 2: air risk.
    let initial = determine_initial_arc(version, &request.airspace)?;
    let air = determine_residual_arc(&initial, &request.strategic_mitigations)?;
    // determine_residual_arc always sets the residual.
    let residual_arc = air.residual_arc.unwrap_or(air.initial_arc);

    // Stage 3: SAIL.
    let sail_result = determine_sail(version, final_grc.get(), residual_arc);
    match sail_result.outcome {
        SailOutcome::CategoryC => {
            let why = sail_result
                .notes
                .first()
                .cloned()
                .unwrap_or_else(|| "Category C".to_string());
            return Ok(SoraCompleteResult::terminal(
                request,
                ground,
                Some(air),
                Some(sail_result),
                ReasonCode::CategoryC,
                why,
            ));
        }
        SailOutcome::OutOfScope => {
            let why = sail_result
                .notes
                .first()
                .cloned()
                .unwrap_or_else(|| "GRC outside the defined range".to_string());
            return Ok(SoraCompleteResult::terminal(
                request,
                ground,
                Some(air),
                Some(sail_result),
                ReasonCode::ScopeHighGrc,
                why,
            ));
        }
        SailOutcome::Assigned => {}
    }
    // Assigned outcomes always carry a SAIL.
    let sail = sail_result.sail.ok_or_else(|| {
        SoraError::validation("sail", "assigned outcome without a SAIL level")
    })?;

    // Stage 4: OSO and TMPR.
    let tmpr = tmpr_for(version, residual_arc);
    let required = required_oso_count(version, sail);
    let compliance = if request.oso_implementations.is_empty() {
        None
    } else {
        Some(validate_compliance(
            version,
            sail,
            &request.oso_implementations,
        )?)
    };
    let implemented = compliance.as_ref().map(|c| c.implemented_count);

    // The 2.5 high-GRC path is worth flagging even though it resolves.
    let reason_code = (version == SoraVersion::V2_5 && final_grc.get() >= 9)
        .then_some(ReasonCode::ScopeSailVi);

    // Advisory overlay, computed from final values only.
    let advisory = advisory_risk(final_grc.get(), residual_arc, sail);

    Ok(SoraCompleteResult {
        sora_version: version,
        ground,
        air: Some(air),
        sail: Some(sail_result),
        tmpr: Some(tmpr),
        compliance,
        required_oso_count: Some(required),
        implemented_oso_count: implemented,
        advisory: Some(advisory),
        reason_code,
        out_of_scope_reason: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sora_air::{
        AirspaceClass, AirspaceControl, AirspaceEnvironment, EnvironmentType, LocationType,
        StrategicMitigations, Typicality,
    };
    use sora_core::{Robustness, Sail};
    use sora_ground::{
        GroundMitigation, GroundMitigationType, OperationalScenario, UaProfile,
    };
    use sora_oso::OsoImplementation;

    fn rural_airspace() -> AirspaceEnvironment {
        AirspaceEnvironment {
            max_height_agl_m: 100.0,
            max_height_amsl_m: None,
            airspace_class: AirspaceClass::G,
            control: AirspaceControl::Uncontrolled,
            is_mode_s_veil: false,
            is_tmz: false,
            location_type: LocationType::NonAirport,
            environment: EnvironmentType::Rural,
            typicality: Typicality::Typical,
        }
    }

    fn v20_request(scenario: OperationalScenario, dimension_m: f64) -> SoraCompleteRequest {
        SoraCompleteRequest {
            sora_version: SoraVersion::V2_0,
            ua: UaProfile {
                dimension_m,
                max_speed_mps: 30.0,
                mtom_kg: None,
                kinetic_energy_j: None,
            },
            scenario: Some(scenario),
            density_band: None,
            population_density: None,
            controlled_ground_area: false,
            ground_mitigations: Vec::new(),
            airspace: rural_airspace(),
            strategic_mitigations: StrategicMitigations::default(),
            oso_implementations: Vec::new(),
        }
    }

    #[test]
    fn test_complete_v20_low_risk() {
        // 1 m VLOS sparse (iGRC 2) over rural uncontrolled below 500 ft
        // (AEC 10, ARC-b): SAIL II.
        let request = v20_request(OperationalScenario::VlosSparselyPopulated, 1.0);
        let result = execute_complete(&request).unwrap();
        assert_eq!(result.final_grc().unwrap().get(), 2);
        assert_eq!(result.residual_arc(), Some(AirRiskClass::B));
        assert_eq!(result.sail.as_ref().unwrap().sail, Some(Sail::Ii));
        assert_eq!(
            result.required_oso_count,
            Some(required_oso_count(SoraVersion::V2_0, Sail::Ii))
        );
        assert!(result.reason_code.is_none());
        assert!(result.advisory.is_some());
    }

    #[test]
    fn test_category_c_skips_oso_and_tmpr() {
        // >8 m BVLOS populated: iGRC 10, no mitigation, GRC > 7.
        let request = v20_request(OperationalScenario::BvlosPopulated, 12.0);
        let result = execute_complete(&request).unwrap();
        assert_eq!(result.reason_code, Some(ReasonCode::CategoryC));
        assert!(result.sail.as_ref().unwrap().sail.is_none());
        assert!(result.tmpr.is_none());
        assert!(result.required_oso_count.is_none());
        assert!(result.out_of_scope_reason.is_some());
        // Air stage ran before the stop; its result is preserved.
        assert!(result.air.is_some());
    }

    #[test]
    fn test_grey_cell_skips_air_entirely() {
        let request = v20_request(OperationalScenario::VlosGathering, 10.0);
        let result = execute_complete(&request).unwrap();
        assert_eq!(result.reason_code, Some(ReasonCode::ScopeGreyCell));
        assert!(result.air.is_none());
        assert!(result.sail.is_none());
        assert!(result.advisory.is_none());
    }

    #[test]
    fn test_v25_micro_uas_end_to_end() {
        let request = SoraCompleteRequest {
            sora_version: SoraVersion::V2_5,
            ua: UaProfile {
                dimension_m: 0.3,
                max_speed_mps: 20.0,
                mtom_kg: Some(0.2),
                kinetic_energy_j: None,
            },
            scenario: None,
            density_band: None,
            population_density: Some(30_000.0),
            controlled_ground_area: false,
            ground_mitigations: Vec::new(),
            airspace: rural_airspace(),
            strategic_mitigations: StrategicMitigations::default(),
            oso_implementations: Vec::new(),
        };
        let result = execute_complete(&request).unwrap();
        assert_eq!(result.intrinsic_grc().unwrap().get(), 1);
        assert_eq!(result.final_grc().unwrap().get(), 1);
        assert_eq!(result.sail.as_ref().unwrap().sail, Some(Sail::I));
    }

    #[test]
    fn test_v25_high_grc_resolves_with_sail_vi_flag() {
        let request = SoraCompleteRequest {
            sora_version: SoraVersion::V2_5,
            ua: UaProfile {
                dimension_m: 30.0,
                max_speed_mps: 150.0,
                mtom_kg: None,
                kinetic_energy_j: None,
            },
            scenario: None,
            density_band: None,
            population_density: Some(20_000.0),
            controlled_ground_area: false,
            ground_mitigations: Vec::new(),
            airspace: rural_airspace(),
            strategic_mitigations: StrategicMitigations::default(),
            oso_implementations: Vec::new(),
        };
        let result = execute_complete(&request).unwrap();
        assert_eq!(result.final_grc().unwrap().get(), 9);
        assert_eq!(result.sail.as_ref().unwrap().sail, Some(Sail::Vi));
        assert_eq!(result.reason_code, Some(ReasonCode::ScopeSailVi));
        assert!(result.tmpr.is_some());
    }

    #[test]
    fn test_compliance_folds_into_result() {
        let mut request = v20_request(OperationalScenario::VlosSparselyPopulated, 1.0);
        request.oso_implementations = vec![OsoImplementation {
            oso_id: 8,
            robustness: Robustness::High,
        }];
        let result = execute_complete(&request).unwrap();
        let compliance = result.compliance.as_ref().unwrap();
        // One declaration cannot cover a SAIL II requirement set.
        assert!(!compliance.is_compliant);
        assert_eq!(result.implemented_oso_count, Some(1));
        assert_eq!(result.is_compliant(), Some(false));
    }

    #[test]
    fn test_mitigated_request_applies_credits() {
        let mut request = v20_request(OperationalScenario::BvlosPopulated, 2.0);
        request.ground_mitigations = vec![
            GroundMitigation {
                mitigation_type: GroundMitigationType::M1,
                robustness: Robustness::Medium,
            },
            GroundMitigation {
                mitigation_type: GroundMitigationType::M2,
                robustness: Robustness::High,
            },
        ];
        let result = execute_complete(&request).unwrap();
        // iGRC 6 - 2 - 2 = 2.
        assert_eq!(result.final_grc().unwrap().get(), 2);
    }

    #[test]
    fn test_idempotence_byte_identical() {
        let mut request = v20_request(OperationalScenario::VlosPopulated, 2.5);
        request.strategic_mitigations.local_density_rating = Some(2);
        let a = serde_json::to_vec(&execute_complete(&request).unwrap()).unwrap();
        let b = serde_json::to_vec(&execute_complete(&request).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_validation_failure_propagates_as_error() {
        let mut request = v20_request(OperationalScenario::VlosPopulated, 2.5);
        request.ua.dimension_m = -1.0;
        assert!(execute_complete(&request).is_err());
    }

    #[test]
    fn test_advisory_never_alters_regulatory_values() {
        // Same request, advisory present; the regulatory numbers match a
        // run computed directly through the engines.
        let request = v20_request(OperationalScenario::VlosSparselyPopulated, 1.0);
        let result = execute_complete(&request).unwrap();
        let direct = determine_sail(
            SoraVersion::V2_0,
            result.final_grc().unwrap().get(),
            result.residual_arc().unwrap(),
        );
        assert_eq!(result.sail.as_ref().unwrap().sail, direct.sail);
    }
}
