//! # Ground Risk Mitigations & Credit Table
//!
//! Each SORA edition defines its own closed set of ground-risk
//! mitigations. A mitigation claim is a `(type, robustness)` pair; the
//! credit it earns is a fixed integer from the published tables, encoded
//! here as one flat `(version, type, robustness)` lookup rather than
//! scattered branches.
//!
//! Credits are usually negative (risk reduction). The SORA 2.0 M3 row is
//! the exception: declaring no emergency response plan *adds* one GRC.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use sora_core::{Robustness, SoraError, SoraVersion};

// ---------------------------------------------------------------------------
// GroundMitigationType
// ---------------------------------------------------------------------------

/// A ground-risk mitigation type from either SORA edition.
///
/// 2.0 defines M1/M2/M3; 2.5 splits M1 into M1A/M1B/M1C and keeps M2
/// with recalibrated credits. `M2` is therefore valid under both
/// versions — the credit lookup branches on the version tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundMitigationType {
    /// 2.0 M1 — strategic mitigations for ground risk (e.g. tethering,
    /// overflight avoidance).
    M1,
    /// M2 — effects of ground impact are reduced (e.g. parachute).
    M2,
    /// 2.0 M3 — an emergency response plan is in place.
    M3,
    /// 2.5 M1(A) — sheltering by structures.
    M1A,
    /// 2.5 M1(B) — operational restrictions over people.
    M1B,
    /// 2.5 M1(C) — ground observation and warning.
    M1C,
}

impl GroundMitigationType {
    /// All types, 2.0 set first.
    pub fn all() -> &'static [GroundMitigationType] {
        &[Self::M1, Self::M2, Self::M3, Self::M1A, Self::M1B, Self::M1C]
    }

    /// Whether this mitigation type exists under the given version.
    pub fn defined_for(&self, version: SoraVersion) -> bool {
        match self {
            Self::M1 | Self::M3 => version == SoraVersion::V2_0,
            Self::M2 => true,
            Self::M1A | Self::M1B | Self::M1C => version == SoraVersion::V2_5,
        }
    }

    /// Returns the snake_case wire identifier for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M1 => "m1",
            Self::M2 => "m2",
            Self::M3 => "m3",
            Self::M1A => "m1a",
            Self::M1B => "m1b",
            Self::M1C => "m1c",
        }
    }
}

impl std::fmt::Display for GroundMitigationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroundMitigationType {
    type Err = SoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|m| m.as_str() == s)
            .copied()
            .ok_or_else(|| SoraError::UnknownValue {
                field: "mitigation_type",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Credit table
// ---------------------------------------------------------------------------

/// The GRC credit for a `(version, type, robustness)` tuple.
///
/// Returns a [`SoraError::VersionMismatch`] when the mitigation type does
/// not exist under the version. Combinations the published tables leave
/// blank earn 0 — a claim at a robustness the table gives no credit for
/// is legal, it just does nothing.
pub fn mitigation_credit(
    version: SoraVersion,
    mitigation: GroundMitigationType,
    robustness: Robustness,
) -> Result<i8, SoraError> {
    if !mitigation.defined_for(version) {
        return Err(SoraError::VersionMismatch {
            subject: format!("mitigation {mitigation}"),
            version: version.as_str(),
        });
    }

    use self::GroundMitigationType as M;
    use sora_core::Robustness as R;
    let credit = match (version, mitigation, robustness) {
        // SORA 2.0, Table 3.
        (SoraVersion::V2_0, M::M1, R::Low) => -1,
        (SoraVersion::V2_0, M::M1, R::Medium) => -2,
        (SoraVersion::V2_0, M::M1, R::High) => -4,
        (SoraVersion::V2_0, M::M2, R::Medium) => -1,
        (SoraVersion::V2_0, M::M2, R::High) => -2,
        (SoraVersion::V2_0, M::M3, R::None) => 1,
        (SoraVersion::V2_0, M::M3, R::High) => -1,

        // SORA 2.5, Annex B credit rows.
        (SoraVersion::V2_5, M::M1A, R::Low) => -1,
        (SoraVersion::V2_5, M::M1A, R::Medium) => -2,
        (SoraVersion::V2_5, M::M1B, R::Low) => -1,
        (SoraVersion::V2_5, M::M1B, R::Medium) => -2,
        (SoraVersion::V2_5, M::M1B, R::High) => -3,
        (SoraVersion::V2_5, M::M1C, R::Low) => -1,
        (SoraVersion::V2_5, M::M2, R::Low) => -1,
        (SoraVersion::V2_5, M::M2, R::Medium) => -2,
        (SoraVersion::V2_5, M::M2, R::High) => -3,

        _ => 0,
    };
    Ok(credit)
}

// ---------------------------------------------------------------------------
// Claim / applied record
// ---------------------------------------------------------------------------

/// An operator's mitigation claim, before credit resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundMitigation {
    /// The claimed mitigation type.
    #[serde(rename = "type")]
    pub mitigation_type: GroundMitigationType,
    /// The robustness the claim is made at.
    pub robustness: Robustness,
}

/// A mitigation claim with its resolved credit, as reported on results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMitigation {
    /// The claimed mitigation type.
    #[serde(rename = "type")]
    pub mitigation_type: GroundMitigationType,
    /// The robustness the claim was made at.
    pub robustness: Robustness,
    /// The GRC credit the claim earned.
    pub credit: i8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v20_credit_rows_match_published_table() {
        let v = SoraVersion::V2_0;
        assert_eq!(mitigation_credit(v, GroundMitigationType::M1, Robustness::Low).unwrap(), -1);
        assert_eq!(mitigation_credit(v, GroundMitigationType::M1, Robustness::Medium).unwrap(), -2);
        assert_eq!(mitigation_credit(v, GroundMitigationType::M1, Robustness::High).unwrap(), -4);
        assert_eq!(mitigation_credit(v, GroundMitigationType::M2, Robustness::Low).unwrap(), 0);
        assert_eq!(mitigation_credit(v, GroundMitigationType::M2, Robustness::Medium).unwrap(), -1);
        assert_eq!(mitigation_credit(v, GroundMitigationType::M2, Robustness::High).unwrap(), -2);
    }

    #[test]
    fn test_v20_m3_none_is_a_penalty() {
        let credit =
            mitigation_credit(SoraVersion::V2_0, GroundMitigationType::M3, Robustness::None)
                .unwrap();
        assert_eq!(credit, 1);
    }

    #[test]
    fn test_v25_credit_rows_match_published_table() {
        let v = SoraVersion::V2_5;
        assert_eq!(mitigation_credit(v, GroundMitigationType::M1A, Robustness::Low).unwrap(), -1);
        assert_eq!(mitigation_credit(v, GroundMitigationType::M1A, Robustness::Medium).unwrap(), -2);
        assert_eq!(mitigation_credit(v, GroundMitigationType::M1B, Robustness::High).unwrap(), -3);
        assert_eq!(mitigation_credit(v, GroundMitigationType::M1C, Robustness::Low).unwrap(), -1);
        assert_eq!(mitigation_credit(v, GroundMitigationType::M1C, Robustness::High).unwrap(), 0);
        assert_eq!(mitigation_credit(v, GroundMitigationType::M2, Robustness::High).unwrap(), -3);
    }

    #[test]
    fn test_version_mismatch_is_rejected() {
        assert!(matches!(
            mitigation_credit(SoraVersion::V2_5, GroundMitigationType::M1, Robustness::Low),
            Err(SoraError::VersionMismatch { .. })
        ));
        assert!(matches!(
            mitigation_credit(SoraVersion::V2_0, GroundMitigationType::M1A, Robustness::Low),
            Err(SoraError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn test_none_robustness_earns_nothing_except_m3() {
        for mitigation in GroundMitigationType::all() {
            for version in SoraVersion::all() {
                if !mitigation.defined_for(*version) {
                    continue;
                }
                let credit = mitigation_credit(*version, *mitigation, Robustness::None).unwrap();
                if *mitigation == GroundMitigationType::M3 {
                    assert_eq!(credit, 1);
                } else {
                    assert_eq!(credit, 0);
                }
            }
        }
    }

    #[test]
    fn test_wire_format() {
        let claim = GroundMitigation {
            mitigation_type: GroundMitigationType::M1A,
            robustness: Robustness::Medium,
        };
        let json = serde_json::to_string(&claim).unwrap();
        assert_eq!(json, r#"{"type":"m1a","robustness":"medium"}"#);
    }
}
