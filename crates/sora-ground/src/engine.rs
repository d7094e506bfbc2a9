//! # Ground Risk Engine
//!
//! The two-stage contract: [`compute_intrinsic_grc`] resolves the iGRC
//! table cell (or the micro-UAS exemption, or a grey cell), then
//! [`apply_mitigations`] sums the mitigation credits and applies the
//! clamping rules to produce the final GRC.
//!
//! ## Clamping Order
//!
//! Credits are additive across mitigation types, each type contributing
//! at most one credit. Clamps run after the full sum, in this order:
//!
//! 1. SORA 2.0 M1 floor — when an M1 credit was applied, the result
//!    never drops below the minimum iGRC of the UA's dimension column.
//! 2. Absolute floor of GRC 1 (both versions).
//!
//! A 2.0 final GRC above 7 is reported invalid ("exceeds acceptability
//! limit"); the value is still carried so the SAIL stage can name the
//! Category C outcome. A 2.5 final GRC of 8–10 stays valid and resolves
//! through the SAIL stage's GRC 9–10 shortcut.

use serde::{Deserialize, Serialize};

use sora_core::{GrcValue, SoraError, SoraVersion};

use crate::context::{GroundRiskContext, ResolvedRow, UaProfile};
use crate::mitigation::{mitigation_credit, AppliedMitigation, GroundMitigation};
use crate::tables;

/// Micro-UAS exemption bounds (SORA 2.5): MTOM and max speed at or below
/// these force iGRC 1 regardless of population density.
const MICRO_UAS_MTOM_KG: f64 = 0.25;
const MICRO_UAS_SPEED_MPS: f64 = 25.0;

/// A 2.0 final GRC above this value is outside the acceptable envelope.
const GRC_ACCEPTABILITY_LIMIT: i16 = 7;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// The intrinsic GRC determination, before mitigation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntrinsicGrc {
    /// The SORA edition this was computed under.
    pub version: SoraVersion,
    /// The intrinsic GRC, absent when the operation fell in a grey cell.
    pub grc: Option<GrcValue>,
    /// Whether the (row, column) cell is outside the methodology's scope.
    pub is_out_of_scope: bool,
    /// Zero-based column index in the version's iGRC table.
    pub column_index: usize,
    /// Human-readable column label.
    pub column_label: &'static str,
    /// The column-minimum GRC used by the 2.0 M1 floor clamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_minimum_grc: Option<u8>,
    /// Whether the 2.5 micro-UAS exemption short-circuited the lookup.
    pub micro_uas_exemption: bool,
    /// Advisory notes accumulated during determination.
    pub notes: Vec<String>,
}

/// The final ground risk determination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundRiskResult {
    /// The SORA edition this was computed under.
    pub version: SoraVersion,
    /// The intrinsic GRC the mitigations applied to.
    pub intrinsic_grc: Option<GrcValue>,
    /// The final GRC after credits and clamps. Absent when the operation
    /// is out of scope or the sum left the representable range.
    pub final_grc: Option<GrcValue>,
    /// Each claimed mitigation with its resolved credit.
    pub applied_mitigations: Vec<AppliedMitigation>,
    /// The 2.0 column-minimum floor that applied, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_minimum_grc: Option<u8>,
    /// Whether the operation fell outside the methodology's scope.
    pub is_out_of_scope: bool,
    /// Whether the result is usable downstream.
    pub is_valid: bool,
    /// Why the result is not valid, when it is not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_message: Option<String>,
    /// Advisory notes accumulated across both stages.
    pub notes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Stage 1 — intrinsic GRC
// ---------------------------------------------------------------------------

/// Determine the intrinsic GRC for a UA over a ground risk context.
///
/// Validates the profile, resolves the table row and column for the
/// context's version, and reads the cell. The 2.5 micro-UAS exemption
/// is checked first and short-circuits the table entirely.
pub fn compute_intrinsic_grc(
    profile: &UaProfile,
    context: &GroundRiskContext,
) -> Result<IntrinsicGrc, SoraError> {
    profile.validate()?;
    let row = context.resolve_row()?;

    // Micro-UAS exemption: a sub-250 g, sub-25 m/s aircraft is iGRC 1
    // regardless of what it flies over.
    if context.version == SoraVersion::V2_5 {
        if let Some(mtom) = profile.mtom_kg {
            if mtom <= MICRO_UAS_MTOM_KG && profile.max_speed_mps <= MICRO_UAS_SPEED_MPS {
                return Ok(IntrinsicGrc {
                    version: context.version,
                    grc: Some(GrcValue::new(1)?),
                    is_out_of_scope: false,
                    column_index: 0,
                    column_label: tables::V2_5_COLUMN_LABELS[0],
                    column_minimum_grc: None,
                    micro_uas_exemption: true,
                    notes: vec![format!(
                        "micro-UAS exemption: MTOM {mtom} kg <= {MICRO_UAS_MTOM_KG} kg and speed {} m/s <= {MICRO_UAS_SPEED_MPS} m/s force iGRC 1",
                        profile.max_speed_mps
                    )],
                });
            }
        }
    }

    let (selection, cell) = match row {
        ResolvedRow::Scenario(scenario) => {
            let selection = tables::select_column_v20(profile);
            let cell = tables::igrc_cell_v20(scenario.row_index(), selection.index);
            (selection, cell)
        }
        ResolvedRow::Density(band) => {
            let selection = tables::select_column_v25(profile)?;
            let cell = tables::igrc_cell_v25(band.row_index(), selection.index);
            (selection, cell)
        }
    };

    let mut notes = selection.notes;
    let grc = match cell {
        Some(value) => Some(GrcValue::new(value)?),
        None => {
            notes.push(format!(
                "no intrinsic GRC is defined for a {} UA in this exposure row; the operation is outside the methodology's scope",
                selection.label
            ));
            None
        }
    };

    Ok(IntrinsicGrc {
        version: context.version,
        is_out_of_scope: grc.is_none(),
        grc,
        column_index: selection.index,
        column_label: selection.label,
        column_minimum_grc: selection.minimum_grc,
        micro_uas_exemption: false,
        notes,
    })
}

// ---------------------------------------------------------------------------
// Stage 2 — mitigation application
// ---------------------------------------------------------------------------

/// Apply ground-risk mitigations to an intrinsic GRC.
///
/// Rejects duplicate mitigation types and types from the wrong version
/// as validation failures before any credit is applied. Credit order
/// does not matter — the clamps run on the full sum.
pub fn apply_mitigations(
    intrinsic: &IntrinsicGrc,
    mitigations: &[GroundMitigation],
) -> Result<GroundRiskResult, SoraError> {
    // Each type contributes at most one credit; a duplicate claim is an
    // input error, not a stacking opportunity.
    for (i, claim) in mitigations.iter().enumerate() {
        if mitigations[..i]
            .iter()
            .any(|prior| prior.mitigation_type == claim.mitigation_type)
        {
            return Err(SoraError::validation(
                "mitigations",
                format!("duplicate mitigation type {}", claim.mitigation_type),
            ));
        }
    }

    let intrinsic_value = match intrinsic.grc {
        Some(grc) => grc,
        None => {
            // Grey cell: nothing to mitigate. The result carries the
            // scope flag so the orchestrator can short-circuit.
            return Ok(GroundRiskResult {
                version: intrinsic.version,
                intrinsic_grc: None,
                final_grc: None,
                applied_mitigations: Vec::new(),
                column_minimum_grc: intrinsic.column_minimum_grc,
                is_out_of_scope: true,
                is_valid: false,
                validation_message: Some(
                    "intrinsic GRC is undefined for this operation; ground risk is out of scope"
                        .to_string(),
                ),
                notes: intrinsic.notes.clone(),
            });
        }
    };

    let mut applied = Vec::with_capacity(mitigations.len());
    let mut m1_applied = false;
    for claim in mitigations {
        let credit = mitigation_credit(intrinsic.version, claim.mitigation_type, claim.robustness)?;
        if claim.mitigation_type == crate::mitigation::GroundMitigationType::M1 && credit != 0 {
            m1_applied = true;
        }
        applied.push(AppliedMitigation {
            mitigation_type: claim.mitigation_type,
            robustness: claim.robustness,
            credit,
        });
    }

    let mut notes = intrinsic.notes.clone();
    let credit_sum: i16 = applied.iter().map(|m| i16::from(m.credit)).sum();
    let mut total = i16::from(intrinsic_value.get()) + credit_sum;

    // 2.0 M1 floor: strategic mitigation cannot take the operation below
    // the least exposed row of its own dimension column.
    if m1_applied {
        if let Some(minimum) = intrinsic.column_minimum_grc {
            if total < i16::from(minimum) {
                tracing::debug!(
                    total,
                    minimum,
                    "M1 credits clamped to the column minimum GRC"
                );
                notes.push(format!(
                    "M1 credits clamped: final GRC held at the column minimum of {minimum}"
                ));
                total = i16::from(minimum);
            }
        }
    }

    if total < i16::from(GrcValue::MIN) {
        notes.push("final GRC floored at 1".to_string());
        total = i16::from(GrcValue::MIN);
    }

    let over_limit = total > GRC_ACCEPTABILITY_LIMIT;
    let (is_valid, validation_message) = match intrinsic.version {
        SoraVersion::V2_0 if over_limit => (
            false,
            Some(format!("final GRC {total} exceeds acceptability limit")),
        ),
        SoraVersion::V2_5 if over_limit => {
            notes.push(format!(
                "final GRC {total} is above 7; the operation resolves only through the SAIL VI path"
            ));
            (true, None)
        }
        _ => (true, None),
    };

    // u8 conversion is safe: total is in [1, 11] here and GrcValue::new
    // rejects anything above the table ceiling.
    let final_grc = GrcValue::new(total as u8).ok();

    Ok(GroundRiskResult {
        version: intrinsic.version,
        intrinsic_grc: Some(intrinsic_value),
        final_grc,
        applied_mitigations: applied,
        column_minimum_grc: intrinsic.column_minimum_grc,
        is_out_of_scope: false,
        is_valid,
        validation_message,
        notes,
    })
}

/// Full ground risk pipeline: intrinsic determination then mitigation.
pub fn compute_ground_risk(
    profile: &UaProfile,
    context: &GroundRiskContext,
    mitigations: &[GroundMitigation],
) -> Result<GroundRiskResult, SoraError> {
    let intrinsic = compute_intrinsic_grc(profile, context)?;
    apply_mitigations(&intrinsic, mitigations)
}
