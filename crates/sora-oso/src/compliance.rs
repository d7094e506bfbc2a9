//! # OSO Compliance Validation
//!
//! Compares operator-declared OSO implementations against the
//! requirement table at a given SAIL. The comparison is ordinal:
//! an implementation satisfies its requirement when its robustness is
//! at or above the mandated level.
//!
//! A failed comparison is a business outcome, itemized on
//! [`ComplianceResult`] — the caller decides what to do with the gaps.

use serde::{Deserialize, Serialize};

use sora_core::{Robustness, Sail, SoraError, SoraVersion};

use crate::requirements::{oso_by_id, oso_requirements};

/// An operator-declared OSO implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsoImplementation {
    /// The OSO line number the declaration addresses.
    pub oso_id: u8,
    /// The robustness the implementation achieves.
    pub robustness: Robustness,
}

/// A requirement met at insufficient robustness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobustnessGap {
    /// The OSO line number.
    pub oso_id: u8,
    /// The mandated robustness at the evaluated SAIL.
    pub required: Robustness,
    /// The robustness the operator declared.
    pub achieved: Robustness,
    /// Human-readable gap statement carrying both values.
    pub message: String,
}

/// The itemized compliance outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    /// The SORA edition validated against.
    pub version: SoraVersion,
    /// The SAIL the requirements were read at.
    pub sail: Sail,
    /// Whether every required objective is adequately implemented.
    pub is_compliant: bool,
    /// Objectives the requirement table mandates at this SAIL.
    pub required_count: usize,
    /// Declared implementations that address a required objective.
    pub implemented_count: usize,
    /// Required objectives with no declaration at all.
    pub missing_osos: Vec<u8>,
    /// Required objectives declared below the mandated robustness.
    pub insufficient_robustness: Vec<RobustnessGap>,
}

/// Validate declared implementations against the requirements at a SAIL.
///
/// Declarations for unknown or version-inapplicable objectives are
/// input errors; duplicates are too. Declarations for objectives that
/// are merely optional at this SAIL are accepted and ignored.
pub fn validate_compliance(
    version: SoraVersion,
    sail: Sail,
    implementations: &[OsoImplementation],
) -> Result<ComplianceResult, SoraError> {
    for (i, declared) in implementations.iter().enumerate() {
        oso_by_id(version, declared.oso_id)?;
        if implementations[..i]
            .iter()
            .any(|prior| prior.oso_id == declared.oso_id)
        {
            return Err(SoraError::validation(
                "oso_implementations",
                format!("duplicate declaration for OSO {}", declared.oso_id),
            ));
        }
    }

    let mut missing_osos = Vec::new();
    let mut insufficient_robustness = Vec::new();
    let mut required_count = 0;
    let mut implemented_count = 0;

    for oso in oso_requirements(version) {
        let Some(required) = oso.required_at(sail).mandated() else {
            continue;
        };
        required_count += 1;

        let declared = implementations.iter().find(|i| i.oso_id == oso.id);
        match declared {
            None => missing_osos.push(oso.id),
            Some(declared) if !declared.robustness.satisfies(required) => {
                implemented_count += 1;
                insufficient_robustness.push(RobustnessGap {
                    oso_id: oso.id,
                    required,
                    achieved: declared.robustness,
                    message: format!(
                        "OSO {} requires {required} robustness at SAIL {sail}, achieved {}",
                        oso.id, declared.robustness
                    ),
                });
            }
            Some(_) => implemented_count += 1,
        }
    }

    Ok(ComplianceResult {
        version,
        sail,
        is_compliant: missing_osos.is_empty() && insufficient_robustness.is_empty(),
        required_count,
        implemented_count,
        missing_osos,
        insufficient_robustness,
    })
}
