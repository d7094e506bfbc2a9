//! # OSO Requirement Tables
//!
//! The Operational Safety Objective table, encoded row-for-row: each
//! objective carries a category, the parties its evidence depends on,
//! and a mandated robustness per SAIL column I–VI.
//!
//! SORA 2.0 defines objectives 1–24. SORA 2.5 consolidates overlapping
//! procedure/training objectives into their base rows and addresses the
//! remaining 17; the absorbed identifiers are not addressable under 2.5.

use serde::{Deserialize, Serialize};

use sora_core::{Robustness, Sail, SoraError, SoraVersion};

// ---------------------------------------------------------------------------
// Row vocabulary
// ---------------------------------------------------------------------------

/// The concern an objective belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OsoCategory {
    /// Operator organization and competence.
    Organizational,
    /// UAS design and qualification.
    Design,
    /// Technical integrity of the UAS in service.
    Technical,
    /// Operational procedures and their application.
    Operational,
    /// Remote crew competence and fitness.
    Personnel,
    /// External services supporting the operation.
    External,
}

/// Who an objective's evidence depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dependency {
    Operator,
    Designer,
    Training,
}

/// The robustness a SAIL column mandates for an objective.
///
/// `Optional` means the objective is recommended but not required at
/// that SAIL; it never produces a compliance gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredRobustness {
    Optional,
    Low,
    Medium,
    High,
}

impl RequiredRobustness {
    /// The robustness an implementation must reach, when one is required.
    pub fn mandated(&self) -> Option<Robustness> {
        match self {
            Self::Optional => None,
            Self::Low => Some(Robustness::Low),
            Self::Medium => Some(Robustness::Medium),
            Self::High => Some(Robustness::High),
        }
    }

    /// Returns the snake_case wire identifier for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Optional => "optional",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for RequiredRobustness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the OSO table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OsoRequirement {
    /// The OSO line number.
    pub id: u8,
    /// The published objective text, abbreviated.
    pub description: &'static str,
    /// Concern classification.
    pub category: OsoCategory,
    /// Parties the evidence depends on.
    pub dependencies: &'static [Dependency],
    /// Mandated robustness per SAIL column I–VI.
    pub robustness: [RequiredRobustness; 6],
}

impl OsoRequirement {
    /// The mandated robustness at a given SAIL.
    pub fn required_at(&self, sail: Sail) -> RequiredRobustness {
        let column = match sail {
            Sail::I => 0,
            Sail::Ii => 1,
            Sail::Iii => 2,
            Sail::Iv => 3,
            Sail::V => 4,
            Sail::Vi => 5,
        };
        self.robustness[column]
    }
}

// ---------------------------------------------------------------------------
// The table
// ---------------------------------------------------------------------------

use self::Dependency as Dep;
use self::OsoCategory as Cat;
use self::RequiredRobustness::{High as H, Low as L, Medium as M, Optional as O};

/// SORA 2.0 OSO table, objectives 1–24, robustness per SAIL I–VI.
const OSO_TABLE: [OsoRequirement; 24] = [
    OsoRequirement {
        id: 1,
        description: "ensure the operator is competent and/or proven",
        category: Cat::Organizational,
        dependencies: &[Dep::Operator],
        robustness: [O, L, M, H, H, H],
    },
    OsoRequirement {
        id: 2,
        description: "UAS manufactured by competent and/or proven entity",
        category: Cat::Design,
        dependencies: &[Dep::Designer],
        robustness: [O, O, L, M, H, H],
    },
    OsoRequirement {
        id: 3,
        description: "UAS maintained by competent and/or proven entity",
        category: Cat::Technical,
        dependencies: &[Dep::Operator],
        robustness: [L, L, M, M, H, H],
    },
    OsoRequirement {
        id: 4,
        description: "UAS developed to authority recognized design standards",
        category: Cat::Design,
        dependencies: &[Dep::Designer],
        robustness: [O, O, O, L, M, H],
    },
    OsoRequirement {
        id: 5,
        description: "UAS is designed considering system safety and reliability",
        category: Cat::Design,
        dependencies: &[Dep::Designer],
        robustness: [O, O, L, M, H, H],
    },
    OsoRequirement {
        id: 6,
        description: "C3 link performance is appropriate for the operation",
        category: Cat::Technical,
        dependencies: &[Dep::Operator, Dep::Designer],
        robustness: [O, L, L, M, H, H],
    },
    OsoRequirement {
        id: 7,
        description: "inspection of the UAS to ensure consistency with the ConOps",
        category: Cat::Operational,
        dependencies: &[Dep::Operator],
        robustness: [L, L, M, M, H, H],
    },
    OsoRequirement {
        id: 8,
        description: "operational procedures are defined, validated and adhered to",
        category: Cat::Operational,
        dependencies: &[Dep::Operator],
        robustness: [L, M, H, H, H, H],
    },
    OsoRequirement {
        id: 9,
        description: "remote crew trained and current and able to control the abnormal situation",
        category: Cat::Personnel,
        dependencies: &[Dep::Training],
        robustness: [L, L, M, M, H, H],
    },
    OsoRequirement {
        id: 10,
        description: "safe recovery from a technical issue",
        category: Cat::Technical,
        dependencies: &[Dep::Designer],
        robustness: [L, L, M, M, H, H],
    },
    OsoRequirement {
        id: 11,
        description: "procedures are in place to handle the deterioration of external systems",
        category: Cat::Operational,
        dependencies: &[Dep::Operator],
        robustness: [L, M, H, H, H, H],
    },
    OsoRequirement {
        id: 12,
        description: "the UAS is designed to manage the deterioration of external systems",
        category: Cat::Design,
        dependencies: &[Dep::Designer],
        robustness: [L, L, M, M, H, H],
    },
    OsoRequirement {
        id: 13,
        description: "external services supporting UAS operations are adequate",
        category: Cat::External,
        dependencies: &[Dep::Operator],
        robustness: [L, L, M, H, H, H],
    },
    OsoRequirement {
        id: 14,
        description: "operational procedures mitigate the risk of human error",
        category: Cat::Operational,
        dependencies: &[Dep::Operator],
        robustness: [L, M, H, H, H, H],
    },
    OsoRequirement {
        id: 15,
        description: "remote crew trained to mitigate the risk of human error",
        category: Cat::Personnel,
        dependencies: &[Dep::Training],
        robustness: [L, L, M, M, H, H],
    },
    OsoRequirement {
        id: 16,
        description: "multi-crew coordination",
        category: Cat::Personnel,
        dependencies: &[Dep::Operator, Dep::Training],
        robustness: [L, L, M, M, H, H],
    },
    OsoRequirement {
        id: 17,
        description: "remote crew is fit to operate",
        category: Cat::Personnel,
        dependencies: &[Dep::Operator],
        robustness: [L, L, M, M, H, H],
    },
    OsoRequirement {
        id: 18,
        description: "automatic protection of the flight envelope from human error",
        category: Cat::Design,
        dependencies: &[Dep::Designer],
        robustness: [O, O, L, M, H, H],
    },
    OsoRequirement {
        id: 19,
        description: "safe recovery from human error",
        category: Cat::Operational,
        dependencies: &[Dep::Operator, Dep::Designer],
        robustness: [O, O, L, M, M, H],
    },
    OsoRequirement {
        id: 20,
        description: "a human factors evaluation has been performed and the HMI found appropriate",
        category: Cat::Design,
        dependencies: &[Dep::Designer],
        robustness: [O, L, L, M, M, H],
    },
    OsoRequirement {
        id: 21,
        description: "operational procedures for adverse operating conditions",
        category: Cat::Operational,
        dependencies: &[Dep::Operator],
        robustness: [L, M, H, H, H, H],
    },
    OsoRequirement {
        id: 22,
        description: "remote crew trained to identify and avoid critical environmental conditions",
        category: Cat::Personnel,
        dependencies: &[Dep::Training],
        robustness: [L, L, M, M, M, H],
    },
    OsoRequirement {
        id: 23,
        description: "environmental conditions for safe operations are defined and measurable",
        category: Cat::Operational,
        dependencies: &[Dep::Operator],
        robustness: [L, L, M, M, H, H],
    },
    OsoRequirement {
        id: 24,
        description: "UAS designed and qualified for adverse environmental conditions",
        category: Cat::Design,
        dependencies: &[Dep::Designer],
        robustness: [O, O, M, H, H, H],
    },
];

/// The objectives SORA 2.5 addresses. Procedure and training objectives
/// absorbed into their base rows (11, 12, 14, 15, 19, 21, 22) are not
/// addressable under 2.5.
const V2_5_OSO_IDS: [u8; 17] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 13, 16, 17, 18, 20, 23, 24];

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

/// The OSO rows a version defines, in line-number order.
pub fn oso_requirements(version: SoraVersion) -> Vec<&'static OsoRequirement> {
    match version {
        SoraVersion::V2_0 => OSO_TABLE.iter().collect(),
        SoraVersion::V2_5 => OSO_TABLE
            .iter()
            .filter(|oso| V2_5_OSO_IDS.contains(&oso.id))
            .collect(),
    }
}

/// Look up one OSO row, version-checked.
pub fn oso_by_id(version: SoraVersion, id: u8) -> Result<&'static OsoRequirement, SoraError> {
    let row = OSO_TABLE
        .iter()
        .find(|oso| oso.id == id)
        .ok_or(SoraError::OutOfRange {
            field: "oso_id",
            value: i64::from(id),
            min: 1,
            max: 24,
        })?;
    if version == SoraVersion::V2_5 && !V2_5_OSO_IDS.contains(&id) {
        return Err(SoraError::VersionMismatch {
            subject: format!("OSO {id}"),
            version: version.as_str(),
        });
    }
    Ok(row)
}

/// How many objectives carry a real (non-optional) requirement at a SAIL.
pub fn required_oso_count(version: SoraVersion, sail: Sail) -> usize {
    oso_requirements(version)
        .iter()
        .filter(|oso| oso.required_at(sail) != RequiredRobustness::Optional)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_24_rows_in_line_order() {
        assert_eq!(OSO_TABLE.len(), 24);
        for (i, oso) in OSO_TABLE.iter().enumerate() {
            assert_eq!(usize::from(oso.id), i + 1);
        }
    }

    #[test]
    fn test_v25_subset_has_17_rows() {
        let rows = oso_requirements(SoraVersion::V2_5);
        assert_eq!(rows.len(), 17);
        assert!(rows.iter().all(|oso| V2_5_OSO_IDS.contains(&oso.id)));
    }

    #[test]
    fn test_absorbed_ids_rejected_under_v25() {
        for id in [11, 12, 14, 15, 19, 21, 22] {
            assert!(matches!(
                oso_by_id(SoraVersion::V2_5, id),
                Err(SoraError::VersionMismatch { .. })
            ));
            assert!(oso_by_id(SoraVersion::V2_0, id).is_ok());
        }
    }

    #[test]
    fn test_unknown_id_rejected() {
        assert!(oso_by_id(SoraVersion::V2_0, 0).is_err());
        assert!(oso_by_id(SoraVersion::V2_0, 25).is_err());
    }

    #[test]
    fn test_robustness_rows_monotone_in_sail() {
        // A higher SAIL never relaxes an objective.
        fn rank(r: RequiredRobustness) -> u8 {
            match r {
                RequiredRobustness::Optional => 0,
                RequiredRobustness::Low => 1,
                RequiredRobustness::Medium => 2,
                RequiredRobustness::High => 3,
            }
        }
        for oso in &OSO_TABLE {
            for pair in oso.robustness.windows(2) {
                assert!(
                    rank(pair[0]) <= rank(pair[1]),
                    "OSO {} relaxes with rising SAIL",
                    oso.id
                );
            }
        }
    }

    #[test]
    fn test_sail_vi_requires_everything() {
        // At SAIL VI every objective is mandated, in both versions.
        for version in SoraVersion::all() {
            let total = oso_requirements(*version).len();
            assert_eq!(required_oso_count(*version, Sail::Vi), total);
        }
    }

    #[test]
    fn test_required_count_monotone_in_sail() {
        for version in SoraVersion::all() {
            let counts: Vec<usize> = Sail::all()
                .iter()
                .map(|sail| required_oso_count(*version, *sail))
                .collect();
            for pair in counts.windows(2) {
                assert!(pair[0] <= pair[1]);
            }
        }
    }

    #[test]
    fn test_spot_check_rows_against_published_table() {
        let oso1 = oso_by_id(SoraVersion::V2_0, 1).unwrap();
        assert_eq!(oso1.required_at(Sail::I), RequiredRobustness::Optional);
        assert_eq!(oso1.required_at(Sail::Iii), RequiredRobustness::Medium);
        assert_eq!(oso1.required_at(Sail::Vi), RequiredRobustness::High);

        let oso8 = oso_by_id(SoraVersion::V2_0, 8).unwrap();
        assert_eq!(oso8.required_at(Sail::Ii), RequiredRobustness::Medium);
        assert_eq!(oso8.required_at(Sail::Iii), RequiredRobustness::High);

        let oso4 = oso_by_id(SoraVersion::V2_0, 4).unwrap();
        assert_eq!(oso4.required_at(Sail::Iii), RequiredRobustness::Optional);
        assert_eq!(oso4.required_at(Sail::Iv), RequiredRobustness::Low);
    }
}
