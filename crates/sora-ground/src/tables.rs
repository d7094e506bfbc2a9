//! # Intrinsic GRC Tables
//!
//! Cell-for-cell encodings of the official iGRC tables. Grey cells
//! (operations the methodology does not cover) are `None`. These arrays
//! are the audit surface: each array literal reads in the same row/column
//! order as the published table.
//!
//! Built once into the binary and exposed only through read-only
//! accessors — no runtime table edits.

use sora_core::SoraError;

use crate::context::UaProfile;

// ---------------------------------------------------------------------------
// SORA 2.0 — scenario rows × dimension columns
// ---------------------------------------------------------------------------

/// Column upper bounds for SORA 2.0, in metres. The last column is open.
const V2_0_DIMENSION_BOUNDS_M: [f64; 3] = [1.0, 3.0, 8.0];

/// Reference kinetic energies per 2.0 column, in joules. The >8 m column
/// carries no reference energy.
const V2_0_REFERENCE_ENERGY_J: [f64; 3] = [700.0, 34_000.0, 1_084_000.0];

/// Human-readable 2.0 column labels.
pub const V2_0_COLUMN_LABELS: [&str; 4] = ["1 m", "3 m", "8 m", ">8 m"];

/// SORA 2.0 intrinsic GRC table.
///
/// Rows in [`OperationalScenario`](crate::context::OperationalScenario)
/// order: controlled ground area, VLOS sparse, BVLOS sparse, VLOS
/// populated, BVLOS populated, VLOS gathering, BVLOS gathering.
const IGRC_V2_0: [[Option<u8>; 4]; 7] = [
    [Some(1), Some(2), Some(3), Some(4)],
    [Some(2), Some(3), Some(4), Some(5)],
    [Some(3), Some(4), Some(5), Some(6)],
    [Some(4), Some(5), Some(6), Some(8)],
    [Some(5), Some(6), Some(8), Some(10)],
    [Some(7), None, None, None],
    [Some(8), None, None, None],
];

/// Minimum iGRC per 2.0 column — the floor the M1 mitigation can never
/// take the final GRC below. Equals the controlled-ground-area row.
pub const V2_0_COLUMN_MINIMUM_GRC: [u8; 4] = [1, 2, 3, 4];

// ---------------------------------------------------------------------------
// SORA 2.5 — density rows × joint dimension/speed columns
// ---------------------------------------------------------------------------

/// Joint (dimension m, speed m/s) caps per 2.5 column.
const V2_5_COLUMN_CAPS: [(f64, f64); 5] = [
    (1.0, 25.0),
    (3.0, 35.0),
    (8.0, 75.0),
    (20.0, 120.0),
    (40.0, 200.0),
];

/// Human-readable 2.5 column labels.
pub const V2_5_COLUMN_LABELS: [&str; 5] = [
    "1 m / 25 m/s",
    "3 m / 35 m/s",
    "8 m / 75 m/s",
    "20 m / 120 m/s",
    "40 m / 200 m/s",
];

/// SORA 2.5 intrinsic GRC table.
///
/// Rows in [`PopulationDensityBand`](crate::context::PopulationDensityBand)
/// order: controlled, <5, <50, <500, <5 000, <50 000, ≥50 000 people/km².
const IGRC_V2_5: [[Option<u8>; 5]; 7] = [
    [Some(1), Some(1), Some(2), Some(3), Some(3)],
    [Some(2), Some(3), Some(4), Some(5), Some(6)],
    [Some(3), Some(4), Some(5), Some(6), Some(7)],
    [Some(4), Some(5), Some(6), Some(7), Some(8)],
    [Some(5), Some(6), Some(7), Some(8), Some(9)],
    [Some(6), Some(7), Some(8), Some(9), Some(10)],
    [Some(7), Some(8), None, None, None],
];

// ---------------------------------------------------------------------------
// Column selection
// ---------------------------------------------------------------------------

/// A resolved UA column with the notes selection produced along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    /// Zero-based column index into the version's iGRC table.
    pub index: usize,
    /// Human-readable column label.
    pub label: &'static str,
    /// Column-minimum GRC (2.0 only — the M1 floor).
    pub minimum_grc: Option<u8>,
    /// Advisory notes (kinetic-energy cross-check, speed-forced shifts).
    pub notes: Vec<String>,
}

/// Select the SORA 2.0 dimension column for a UA.
///
/// The column is keyed on dimension alone. When the caller supplies an
/// expected kinetic energy that exceeds the selected column's reference
/// energy, a warning note is attached — the published columns pair each
/// dimension with a reference energy, and a heavy-but-small UA deserves
/// operator attention even though the table keys on dimension.
pub fn select_column_v20(profile: &UaProfile) -> ColumnSelection {
    let index = V2_0_DIMENSION_BOUNDS_M
        .iter()
        .position(|bound| profile.dimension_m <= *bound)
        .unwrap_or(3);

    let mut notes = Vec::new();
    if index < 3 {
        if let Some(ke) = profile.kinetic_energy_j {
            let reference = V2_0_REFERENCE_ENERGY_J[index];
            if ke > reference {
                notes.push(format!(
                    "kinetic energy {ke:.0} J exceeds the {reference:.0} J reference of the {} column",
                    V2_0_COLUMN_LABELS[index]
                ));
            }
        }
    }

    ColumnSelection {
        index,
        label: V2_0_COLUMN_LABELS[index],
        minimum_grc: Some(V2_0_COLUMN_MINIMUM_GRC[index]),
        notes,
    }
}

/// Select the SORA 2.5 joint dimension/speed column for a UA.
///
/// The column is the larger of the dimension-selected and speed-selected
/// indices. A speed-forced shift is recorded as a warning note rather
/// than a rejection; a UA beyond the 40 m / 200 m/s table edge is outside
/// every defined category and fails validation.
pub fn select_column_v25(profile: &UaProfile) -> Result<ColumnSelection, SoraError> {
    let dim_index = V2_5_COLUMN_CAPS
        .iter()
        .position(|(dim_cap, _)| profile.dimension_m <= *dim_cap)
        .ok_or_else(|| {
            SoraError::validation(
                "ua_dimension_m",
                format!(
                    "dimension {} m exceeds the 40 m table edge; outside all defined categories",
                    profile.dimension_m
                ),
            )
        })?;
    let speed_index = V2_5_COLUMN_CAPS
        .iter()
        .position(|(_, speed_cap)| profile.max_speed_mps <= *speed_cap)
        .ok_or_else(|| {
            SoraError::validation(
                "ua_speed_mps",
                format!(
                    "speed {} m/s exceeds the 200 m/s table edge; outside all defined categories",
                    profile.max_speed_mps
                ),
            )
        })?;

    let index = dim_index.max(speed_index);
    let mut notes = Vec::new();
    if speed_index > dim_index {
        notes.push(format!(
            "max speed {} m/s exceeds the {} m/s cap of the {} column; shifted to the {} column",
            profile.max_speed_mps,
            V2_5_COLUMN_CAPS[dim_index].1,
            V2_5_COLUMN_LABELS[dim_index],
            V2_5_COLUMN_LABELS[index],
        ));
    }

    Ok(ColumnSelection {
        index,
        label: V2_5_COLUMN_LABELS[index],
        minimum_grc: None,
        notes,
    })
}

// ---------------------------------------------------------------------------
// Cell accessors
// ---------------------------------------------------------------------------

/// Read a 2.0 iGRC cell. `None` is a grey (out-of-scope) cell.
pub fn igrc_cell_v20(row: usize, column: usize) -> Option<u8> {
    IGRC_V2_0.get(row).and_then(|r| r.get(column)).copied().flatten()
}

/// Read a 2.5 iGRC cell. `None` is a grey (out-of-scope) cell.
pub fn igrc_cell_v25(row: usize, column: usize) -> Option<u8> {
    IGRC_V2_5.get(row).and_then(|r| r.get(column)).copied().flatten()
}

/// The full 2.0 table, for reference-data endpoints.
pub fn igrc_table_v20() -> &'static [[Option<u8>; 4]; 7] {
    &IGRC_V2_0
}

/// The full 2.5 table, for reference-data endpoints.
pub fn igrc_table_v25() -> &'static [[Option<u8>; 5]; 7] {
    &IGRC_V2_5
}
