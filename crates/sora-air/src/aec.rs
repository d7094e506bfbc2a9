//! # AEC Selection & Static Attribute Table
//!
//! The Airspace Encounter Category is selected by a decision tree
//! evaluated in strict priority order; each AEC then carries a fixed
//! (density rating, initial ARC) pair from the Annex C table. The pair
//! is static data, not computed.
//!
//! ## Priority Order
//!
//! 1. Atypical/segregated claim → AEC 12.
//! 2. Above FL600 → AEC 11.
//! 3. Airport/heliport environment → AEC 1 (class B/C/D) or AEC 6
//!    (class E/F/G); class A at an aerodrome is not an expected
//!    combination and classifies conservatively as AEC 1.
//! 4. Above/below 500 ft AGL, crossed with transponder zones,
//!    controlled/uncontrolled, and urban/rural → AEC 2–5 / 7–10.

use sora_core::{Aec, AirRiskClass};

use crate::environment::{AirspaceClass, AirspaceControl, AirspaceEnvironment, LocationType};

/// FL600 expressed in metres. Operations above this ceiling sit in the
/// near-empty very-high-altitude band.
pub const FL600_CEILING_M: f64 = 18_288.0;

/// The 500 ft AGL boundary, metres.
pub const LOW_ALTITUDE_BOUNDARY_M: f64 = 152.4;

// ---------------------------------------------------------------------------
// Static attribute table
// ---------------------------------------------------------------------------

/// The fixed attributes of one Airspace Encounter Category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct AecAttributes {
    /// The category number, 1–12.
    pub aec: u8,
    /// Encounter density rating, 1 (near-empty) to 5 (dense).
    pub density_rating: u8,
    /// The initial ARC the category maps to.
    pub initial_arc: AirRiskClass,
    /// The Annex C row description.
    pub description: &'static str,
}

/// Annex C AEC table: (density rating, initial ARC) per category.
const AEC_TABLE: [AecAttributes; 12] = [
    AecAttributes {
        aec: 1,
        density_rating: 5,
        initial_arc: AirRiskClass::D,
        description: "airport/heliport environment in class B, C or D airspace",
    },
    AecAttributes {
        aec: 2,
        density_rating: 5,
        initial_arc: AirRiskClass::D,
        description: "above 500 ft AGL, below FL600, in a Mode-S veil or TMZ",
    },
    AecAttributes {
        aec: 3,
        density_rating: 5,
        initial_arc: AirRiskClass::D,
        description: "above 500 ft AGL, below FL600, in controlled airspace",
    },
    AecAttributes {
        aec: 4,
        density_rating: 4,
        initial_arc: AirRiskClass::D,
        description: "above 500 ft AGL, below FL600, uncontrolled over urban area",
    },
    AecAttributes {
        aec: 5,
        density_rating: 3,
        initial_arc: AirRiskClass::C,
        description: "above 500 ft AGL, below FL600, uncontrolled over rural area",
    },
    AecAttributes {
        aec: 6,
        density_rating: 4,
        initial_arc: AirRiskClass::C,
        description: "airport/heliport environment in class E, F or G airspace",
    },
    AecAttributes {
        aec: 7,
        density_rating: 3,
        initial_arc: AirRiskClass::C,
        description: "below 500 ft AGL in a Mode-S veil or TMZ",
    },
    AecAttributes {
        aec: 8,
        density_rating: 3,
        initial_arc: AirRiskClass::C,
        description: "below 500 ft AGL in controlled airspace",
    },
    AecAttributes {
        aec: 9,
        density_rating: 3,
        initial_arc: AirRiskClass::C,
        description: "below 500 ft AGL uncontrolled over urban area",
    },
    AecAttributes {
        aec: 10,
        density_rating: 2,
        initial_arc: AirRiskClass::B,
        description: "below 500 ft AGL uncontrolled over rural area",
    },
    AecAttributes {
        aec: 11,
        density_rating: 1,
        initial_arc: AirRiskClass::B,
        description: "above FL600",
    },
    AecAttributes {
        aec: 12,
        density_rating: 1,
        initial_arc: AirRiskClass::A,
        description: "atypical or segregated airspace",
    },
];

/// Read the static attributes for an AEC.
pub fn aec_attributes(aec: Aec) -> &'static AecAttributes {
    // Aec is range-validated at construction, so the index is in bounds.
    &AEC_TABLE[usize::from(aec.get()) - 1]
}

/// The full table, for reference-data endpoints.
pub fn aec_table() -> &'static [AecAttributes; 12] {
    &AEC_TABLE
}

// ---------------------------------------------------------------------------
// Decision tree
// ---------------------------------------------------------------------------

/// The outcome of AEC selection: the category plus any conservative
/// classification note produced on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AecSelection {
    pub aec: u8,
    pub notes: Vec<String>,
}

/// Select the AEC for an environment, in strict priority order.
pub(crate) fn select_aec(env: &AirspaceEnvironment) -> AecSelection {
    use crate::environment::Typicality;

    if env.typicality == Typicality::AtypicalSegregated {
        return AecSelection { aec: 12, notes: Vec::new() };
    }

    if env.ceiling_reference_m() > FL600_CEILING_M {
        return AecSelection { aec: 11, notes: Vec::new() };
    }

    if env.location_type.is_aerodrome() {
        return match env.airspace_class {
            AirspaceClass::B | AirspaceClass::C | AirspaceClass::D => {
                AecSelection { aec: 1, notes: Vec::new() }
            }
            AirspaceClass::E | AirspaceClass::F | AirspaceClass::G => {
                AecSelection { aec: 6, notes: Vec::new() }
            }
            AirspaceClass::A => {
                // Not a combination Annex C anticipates. Classify at the
                // densest aerodrome category rather than under-classify.
                tracing::warn!(
                    location = ?env.location_type,
                    "class A at an aerodrome is not an anticipated combination; classifying conservatively as AEC 1"
                );
                AecSelection {
                    aec: 1,
                    notes: vec![
                        "class A airspace at an aerodrome is not an anticipated combination; classified conservatively as AEC 1"
                            .to_string(),
                    ],
                }
            }
        };
    }

    let above_500ft = env.max_height_agl_m > LOW_ALTITUDE_BOUNDARY_M;
    let aec = if above_500ft {
        if env.is_transponder_zone() {
            2
        } else if env.control == AirspaceControl::Controlled {
            3
        } else if env.environment.is_urban() {
            4
        } else {
            5
        }
    } else if env.is_transponder_zone() {
        7
    } else if env.control == AirspaceControl::Controlled {
        8
    } else if env.environment.is_urban() {
        9
    } else {
        10
    };
    AecSelection { aec, notes: Vec::new() }
}
