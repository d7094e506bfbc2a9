//! # Air Risk Engine
//!
//! The two-stage contract: [`determine_initial_arc`] runs the AEC
//! decision tree and reads the static attribute table;
//! [`determine_residual_arc`] applies the strategic mitigation
//! precedence chain:
//!
//! ```text
//! explicit override  >  atypical/segregated claim  >  max(density, strategic)
//! ```
//!
//! The two reduction paths on the right are never summed.

use serde::{Deserialize, Serialize};

use sora_core::{Aec, AirRiskClass, SoraError, SoraVersion};

use crate::aec::{aec_attributes, select_aec};
use crate::environment::AirspaceEnvironment;
use crate::residual::{density_step_down, strategic_step_down, StrategicMitigations};

/// The air risk determination, initial and (after the second stage)
/// residual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcResult {
    /// The SORA edition this was computed under.
    pub version: SoraVersion,
    /// The selected AEC. Absent when an explicit residual override
    /// replaced the classification entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aec: Option<Aec>,
    /// Encounter density rating 1–5 from the AEC table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_rating: Option<u8>,
    /// The initial ARC before strategic mitigation.
    pub initial_arc: AirRiskClass,
    /// The residual ARC, set by [`determine_residual_arc`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residual_arc: Option<AirRiskClass>,
    /// Explanatory notes (conservative classifications, which reduction
    /// path applied, override provenance).
    pub notes: Vec<String>,
}

/// Determine the AEC and initial ARC for an airspace environment.
pub fn determine_initial_arc(
    version: SoraVersion,
    env: &AirspaceEnvironment,
) -> Result<ArcResult, SoraError> {
    env.validate()?;
    let selection = select_aec(env);
    // The decision tree only produces catalogue values.
    let aec = Aec::new(selection.aec)?;
    let attrs = aec_attributes(aec);
    let mut notes = selection.notes;
    notes.push(format!("AEC {}: {}", attrs.aec, attrs.description));
    Ok(ArcResult {
        version,
        aec: Some(aec),
        density_rating: Some(attrs.density_rating),
        initial_arc: attrs.initial_arc,
        residual_arc: None,
        notes,
    })
}

/// Apply strategic mitigation to an initial ARC determination.
///
/// Precedence, highest first: explicit residual override; atypical/
/// segregated claim (forces ARC-a); the larger of the density-based and
/// strategic-mitigation-based step-downs. Apart from the explicit
/// override, the residual is never more risky than the initial.
pub fn determine_residual_arc(
    initial: &ArcResult,
    mitigations: &StrategicMitigations,
) -> Result<ArcResult, SoraError> {
    mitigations.validate()?;
    let mut result = initial.clone();

    if let Some(override_arc) = mitigations.explicit_residual_arc {
        if override_arc > initial.initial_arc {
            tracing::warn!(
                initial = %initial.initial_arc,
                overridden = %override_arc,
                "explicit residual ARC override increases risk above the initial classification"
            );
        }
        result.aec = None;
        result.residual_arc = Some(override_arc);
        result.notes.push(format!(
            "explicit residual ARC-{override_arc} override applied; AEC classification bypassed"
        ));
        return Ok(result);
    }

    if mitigations.atypical_segregated {
        result.residual_arc = Some(AirRiskClass::A);
        result
            .notes
            .push("atypical/segregated airspace claim: residual ARC-a".to_string());
        return Ok(result);
    }

    // Only a demonstrated local rating earns a reduction. The AEC's own
    // rating is already priced into the initial ARC.
    let density_steps = match mitigations.local_density_rating {
        Some(rating) => density_step_down(initial.version, rating),
        None => 0,
    };
    let strategic_steps = strategic_step_down(&mitigations.strategic_mitigations);

    // Competing justifications for the same claim: take the larger
    // single reduction, never the sum.
    let steps = density_steps.max(strategic_steps);
    let residual = initial.initial_arc.step_down(steps);
    if steps > 0 {
        let path = if density_steps >= strategic_steps {
            "local density rating"
        } else {
            "strategic mitigations"
        };
        result.notes.push(format!(
            "residual ARC-{residual}: {steps}-step reduction via {path} (density path {density_steps}, strategic path {strategic_steps}; larger applies)"
        ));
    }
    result.residual_arc = Some(residual);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{
        AirspaceClass, AirspaceControl, EnvironmentType, LocationType, Typicality,
    };
    use crate::residual::StrategicMitigationId;
    use proptest::prelude::*;

    fn env() -> AirspaceEnvironment {
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

    fn initial_d() -> ArcResult {
        ArcResult {
            version: SoraVersion::V2_5,
            aec: Some(Aec::new(1).unwrap()),
            density_rating: Some(5),
            initial_arc: AirRiskClass::D,
            residual_arc: None,
            notes: Vec::new(),
        }
    }

    #[test]
    fn test_airport_class_c_controlled_is_arc_d_aec_1() {
        // Controlled airport environment in class C (2.5).
        let mut e = env();
        e.location_type = LocationType::Airport;
        e.airspace_class = AirspaceClass::C;
        e.control = AirspaceControl::Controlled;
        let result = determine_initial_arc(SoraVersion::V2_5, &e).unwrap();
        assert_eq!(result.aec.unwrap().get(), 1);
        assert_eq!(result.initial_arc, AirRiskClass::D);
        assert_eq!(result.density_rating, Some(5));
    }

    #[test]
    fn test_no_double_counting_takes_max_path() {
        // Initial d, local density 4, S1+S2+S3 (2.5).
        // Density path: 1 step. Strategic path: capped at 2. Max = 2 -> b.
        let mitigations = StrategicMitigations {
            local_density_rating: Some(4),
            strategic_mitigations: vec![
                StrategicMitigationId::S1,
                StrategicMitigationId::S2,
                StrategicMitigationId::S3,
            ],
            ..Default::default()
        };
        let result = determine_residual_arc(&initial_d(), &mitigations).unwrap();
        assert_eq!(result.residual_arc, Some(AirRiskClass::B));
        // Summing the paths would have reached ARC-a; assert it did not.
        assert_ne!(result.residual_arc, Some(AirRiskClass::A));
    }

    #[test]
    fn test_explicit_override_wins_and_clears_aec() {
        let mitigations = StrategicMitigations {
            explicit_residual_arc: Some(AirRiskClass::B),
            atypical_segregated: true,
            local_density_rating: Some(1),
            ..Default::default()
        };
        let result = determine_residual_arc(&initial_d(), &mitigations).unwrap();
        assert_eq!(result.residual_arc, Some(AirRiskClass::B));
        assert!(result.aec.is_none());
    }

    #[test]
    fn test_atypical_claim_forces_arc_a() {
        let mitigations = StrategicMitigations {
            atypical_segregated: true,
            local_density_rating: Some(5),
            ..Default::default()
        };
        let result = determine_residual_arc(&initial_d(), &mitigations).unwrap();
        assert_eq!(result.residual_arc, Some(AirRiskClass::A));
        assert!(result.aec.is_some());
    }

    #[test]
    fn test_no_mitigation_keeps_initial() {
        let result =
            determine_residual_arc(&initial_d(), &StrategicMitigations::default()).unwrap();
        assert_eq!(result.residual_arc, Some(AirRiskClass::D));
    }

    #[test]
    fn test_v20_low_density_two_step_reduction() {
        let initial = ArcResult {
            version: SoraVersion::V2_0,
            ..initial_d()
        };
        let mitigations = StrategicMitigations {
            local_density_rating: Some(2),
            ..Default::default()
        };
        let result = determine_residual_arc(&initial, &mitigations).unwrap();
        assert_eq!(result.residual_arc, Some(AirRiskClass::B));
    }

    #[test]
    fn test_aec12_environment_end_to_end() {
        let mut e = env();
        e.typicality = Typicality::AtypicalSegregated;
        let initial = determine_initial_arc(SoraVersion::V2_0, &e).unwrap();
        assert_eq!(initial.aec.unwrap().get(), 12);
        assert_eq!(initial.initial_arc, AirRiskClass::A);
    }

    proptest! {
        /// Without an explicit override, the residual is never more
        /// risky than the initial ARC.
        #[test]
        fn prop_residual_never_exceeds_initial(
            rating in 1u8..=5,
            claim_count in 0usize..=4,
            atypical in any::<bool>(),
        ) {
            let mitigations = StrategicMitigations {
                explicit_residual_arc: None,
                atypical_segregated: atypical,
                local_density_rating: Some(rating),
                strategic_mitigations: StrategicMitigationId::all()[..claim_count].to_vec(),
            };
            for initial_arc in AirRiskClass::all() {
                let initial = ArcResult { initial_arc: *initial_arc, ..initial_d() };
                let result = determine_residual_arc(&initial, &mitigations).unwrap();
                prop_assert!(result.residual_arc.unwrap() <= *initial_arc);
            }
        }

        /// The combined reduction equals the larger single path, proving
        /// the two paths are not additive.
        #[test]
        fn prop_reduction_is_max_not_sum(
            rating in 1u8..=5,
            claim_count in 0usize..=4,
        ) {
            let both = StrategicMitigations {
                local_density_rating: Some(rating),
                strategic_mitigations: StrategicMitigationId::all()[..claim_count].to_vec(),
                ..Default::default()
            };
            let density_only = StrategicMitigations {
                local_density_rating: Some(rating),
                ..Default::default()
            };
            let strategic_only = StrategicMitigations {
                strategic_mitigations: StrategicMitigationId::all()[..claim_count].to_vec(),
                ..Default::default()
            };
            let initial = initial_d();
            let combined = determine_residual_arc(&initial, &both).unwrap().residual_arc.unwrap();
            let d = determine_residual_arc(&initial, &density_only).unwrap().residual_arc.unwrap();
            let s = determine_residual_arc(&initial, &strategic_only).unwrap().residual_arc.unwrap();
            prop_assert_eq!(combined, d.min(s));
        }
    }
}
