//! # Strategic Mitigation & Step-Down Rules
//!
//! The residual ARC is derived from the initial ARC through at most one
//! reduction path. Two paths compete:
//!
//! - **Density-based**: a demonstrated local encounter density below
//!   what the AEC implies.
//! - **Strategic-mitigation-based**: operational restrictions (S1–S4)
//!   that bound exposure by chronology, geography or behaviour.
//!
//! Both justify the same claim, so only the larger single reduction
//! applies. The strategic path is capped at two ARC levels — one
//! calculation can never step further than ARC-d to ARC-b.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use sora_core::{AirRiskClass, SoraError, SoraVersion};

/// The strategic step-down cap, in ARC levels.
pub const STRATEGIC_STEP_DOWN_CAP: u8 = 2;

// ---------------------------------------------------------------------------
// StrategicMitigationId
// ---------------------------------------------------------------------------

/// A strategic air-risk mitigation from the Annex C catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategicMitigationId {
    /// Operational restriction by chronology (time of day/season).
    S1,
    /// Operational restriction by exposure time.
    S2,
    /// Operational restriction by geography (routing away from traffic).
    S3,
    /// Common structures and rules (flight rules, coordination).
    S4,
}

impl StrategicMitigationId {
    /// All catalogue entries.
    pub fn all() -> &'static [StrategicMitigationId] {
        &[Self::S1, Self::S2, Self::S3, Self::S4]
    }

    /// Returns the snake_case wire identifier for this mitigation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S1 => "s1",
            Self::S2 => "s2",
            Self::S3 => "s3",
            Self::S4 => "s4",
        }
    }
}

impl std::fmt::Display for StrategicMitigationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategicMitigationId {
    type Err = SoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|m| m.as_str() == s)
            .copied()
            .ok_or_else(|| SoraError::UnknownValue {
                field: "strategic_mitigation",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// StrategicMitigations (the residual-step input)
// ---------------------------------------------------------------------------

/// Everything an operator can bring to the residual ARC step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StrategicMitigations {
    /// Explicit residual ARC set by the competent authority. Highest
    /// precedence; bypasses the never-increase guarantee by design.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_residual_arc: Option<AirRiskClass>,
    /// Claim that the airspace is atypical/segregated; forces ARC-a.
    #[serde(default)]
    pub atypical_segregated: bool,
    /// Demonstrated local density rating 1–5, overriding the AEC's.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_density_rating: Option<u8>,
    /// Claimed strategic mitigations.
    #[serde(default)]
    pub strategic_mitigations: Vec<StrategicMitigationId>,
}

impl StrategicMitigations {
    /// Validate the density rating range and reject duplicate claims.
    pub fn validate(&self) -> Result<(), SoraError> {
        if let Some(rating) = self.local_density_rating {
            if !(1..=5).contains(&rating) {
                return Err(SoraError::OutOfRange {
                    field: "local_density_rating",
                    value: i64::from(rating),
                    min: 1,
                    max: 5,
                });
            }
        }
        for (i, id) in self.strategic_mitigations.iter().enumerate() {
            if self.strategic_mitigations[..i].contains(id) {
                return Err(SoraError::validation(
                    "strategic_mitigations",
                    format!("duplicate strategic mitigation {id}"),
                ));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Step-down rules
// ---------------------------------------------------------------------------

/// ARC levels the density rating alone justifies stepping down.
///
/// The 2.0 Annex C grants two levels for near-empty airspace (rating
/// 1–2) and one for rating 3–4; 2.5 grants a single level for any
/// demonstrated rating below the densest band.
pub fn density_step_down(version: SoraVersion, density_rating: u8) -> u8 {
    match version {
        SoraVersion::V2_0 => match density_rating {
            1 | 2 => 2,
            3 | 4 => 1,
            _ => 0,
        },
        SoraVersion::V2_5 => match density_rating {
            1..=4 => 1,
            _ => 0,
        },
    }
}

/// ARC levels a set of strategic mitigations justifies stepping down.
///
/// Each catalogue entry contributes one level, capped at
/// [`STRATEGIC_STEP_DOWN_CAP`].
pub fn strategic_step_down(mitigations: &[StrategicMitigationId]) -> u8 {
    // Duplicates are rejected in validation, so len() is the claim count.
    (mitigations.len() as u8).min(STRATEGIC_STEP_DOWN_CAP)
}
