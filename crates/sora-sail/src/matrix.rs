//! # SAIL Determination Matrix
//!
//! The published SAIL table, encoded row-for-row. Rows are final GRC
//! 1–7, columns residual ARC a–d. Both SORA editions share the matrix
//! over this domain; they differ only in how values above GRC 7 resolve.

use serde::{Deserialize, Serialize};

use sora_core::{AirRiskClass, Sail, SoraVersion};

/// The SAIL matrix for final GRC 1–7 (rows) × residual ARC a–d (columns).
const SAIL_MATRIX: [[Sail; 4]; 7] = [
    [Sail::I, Sail::Ii, Sail::Iv, Sail::Vi],
    [Sail::I, Sail::Ii, Sail::Iv, Sail::Vi],
    [Sail::Ii, Sail::Ii, Sail::Iv, Sail::Vi],
    [Sail::Iii, Sail::Iii, Sail::Iv, Sail::Vi],
    [Sail::Iv, Sail::Iv, Sail::Iv, Sail::Vi],
    [Sail::V, Sail::V, Sail::V, Sail::Vi],
    [Sail::Vi, Sail::Vi, Sail::Vi, Sail::Vi],
];

/// The matrix, for reference-data endpoints.
pub fn sail_matrix() -> &'static [[Sail; 4]; 7] {
    &SAIL_MATRIX
}

/// How a SAIL determination terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SailOutcome {
    /// The matrix (or the 2.5 shortcut) produced a SAIL level.
    Assigned,
    /// SORA 2.0 Category C: GRC above 7 stops the specific category.
    CategoryC,
    /// The GRC is outside the version's defined range.
    OutOfScope,
}

/// The SAIL determination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SailResult {
    /// The SORA edition this was computed under.
    pub version: SoraVersion,
    /// Whether the operation remains inside the specific category.
    pub is_in_scope: bool,
    /// The assigned SAIL, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sail: Option<Sail>,
    /// How the determination terminated.
    pub outcome: SailOutcome,
    /// Explanatory notes.
    pub notes: Vec<String>,
}

/// Determine the SAIL for a final GRC and residual ARC.
///
/// Takes the raw GRC number so range handling stays inside this stage:
/// 2.0 resolves GRC 8–10 as Category C, 2.5 resolves GRC 8–10 as SAIL
/// VI (8 via the matrix's ceiling behaviour, 9–10 via the documented
/// shortcut), and anything else is out of scope.
pub fn determine_sail(
    version: SoraVersion,
    final_grc: u8,
    residual_arc: AirRiskClass,
) -> SailResult {
    let arc_column = match residual_arc {
        AirRiskClass::A => 0,
        AirRiskClass::B => 1,
        AirRiskClass::C => 2,
        AirRiskClass::D => 3,
    };

    match (version, final_grc) {
        (_, 1..=7) => {
            let sail = SAIL_MATRIX[usize::from(final_grc) - 1][arc_column];
            SailResult {
                version,
                is_in_scope: true,
                sail: Some(sail),
                outcome: SailOutcome::Assigned,
                notes: vec![format!(
                    "SAIL {sail} from final GRC {final_grc} and residual ARC-{residual_arc}"
                )],
            }
        }
        (SoraVersion::V2_0, 8..=10) => SailResult {
            version,
            is_in_scope: false,
            sail: None,
            outcome: SailOutcome::CategoryC,
            notes: vec![format!(
                "final GRC {final_grc} exceeds 7: the operation falls in Category C; no SAIL is assigned"
            )],
        },
        (SoraVersion::V2_5, 8) => SailResult {
            version,
            is_in_scope: true,
            sail: Some(Sail::Vi),
            outcome: SailOutcome::Assigned,
            notes: vec![format!(
                "SAIL VI from final GRC {final_grc} (any residual ARC)"
            )],
        },
        (SoraVersion::V2_5, 9..=10) => SailResult {
            version,
            is_in_scope: true,
            sail: Some(Sail::Vi),
            outcome: SailOutcome::Assigned,
            notes: vec![format!(
                "final GRC {final_grc} is 9 or above: unconditionally SAIL VI regardless of residual ARC"
            )],
        },
        (_, out_of_range) => SailResult {
            version,
            is_in_scope: false,
            sail: None,
            outcome: SailOutcome::OutOfScope,
            notes: vec![format!(
                "final GRC {out_of_range} is outside the range SORA {version} defines"
            )],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_matches_published_table() {
        use sora_core::Sail::*;
        let expected: [[Sail; 4]; 7] = [
            [I, Ii, Iv, Vi],
            [I, Ii, Iv, Vi],
            [Ii, Ii, Iv, Vi],
            [Iii, Iii, Iv, Vi],
            [Iv, Iv, Iv, Vi],
            [V, V, V, Vi],
            [Vi, Vi, Vi, Vi],
        ];
        assert_eq!(SAIL_MATRIX, expected);
    }

    #[test]
    fn test_grc2_arc_a_is_sail_i() {
        let result = determine_sail(SoraVersion::V2_0, 2, AirRiskClass::A);
        assert_eq!(result.sail, Some(Sail::I));
        assert!(result.is_in_scope);
    }

    #[test]
    fn test_grc7_arc_c_is_sail_vi() {
        let result = determine_sail(SoraVersion::V2_0, 7, AirRiskClass::C);
        assert_eq!(result.sail, Some(Sail::Vi));
    }

    #[test]
    fn test_grc8_v20_is_category_c() {
        // GRC above 7 under 2.0: SAIL null, Category C, for any ARC.
        for arc in AirRiskClass::all() {
            let result = determine_sail(SoraVersion::V2_0, 8, *arc);
            assert_eq!(result.outcome, SailOutcome::CategoryC);
            assert!(result.sail.is_none());
            assert!(!result.is_in_scope);
        }
    }

    #[test]
    fn test_v25_high_grc_shortcut_is_sail_vi() {
        for grc in [8, 9, 10] {
            for arc in AirRiskClass::all() {
                let result = determine_sail(SoraVersion::V2_5, grc, *arc);
                assert_eq!(result.sail, Some(Sail::Vi), "grc {grc}");
                assert!(result.is_in_scope);
            }
        }
    }

    #[test]
    fn test_out_of_range_grc_is_out_of_scope() {
        let result = determine_sail(SoraVersion::V2_0, 0, AirRiskClass::A);
        assert_eq!(result.outcome, SailOutcome::OutOfScope);
        let result = determine_sail(SoraVersion::V2_5, 11, AirRiskClass::A);
        assert_eq!(result.outcome, SailOutcome::OutOfScope);
    }

    #[test]
    fn test_matrix_totality_over_valid_domain() {
        // Every (GRC 1-7, ARC) pair yields a SAIL in both versions.
        for version in SoraVersion::all() {
            for grc in 1..=7u8 {
                for arc in AirRiskClass::all() {
                    let result = determine_sail(*version, grc, *arc);
                    assert!(result.sail.is_some(), "hole at GRC {grc} ARC {arc}");
                }
            }
        }
    }

    #[test]
    fn test_matrix_monotone_in_both_axes() {
        for row in 0..7 {
            for col in 0..4 {
                if row > 0 {
                    assert!(SAIL_MATRIX[row - 1][col] <= SAIL_MATRIX[row][col]);
                }
                if col > 0 {
                    assert!(SAIL_MATRIX[row][col - 1] <= SAIL_MATRIX[row][col]);
                }
            }
        }
    }
}
