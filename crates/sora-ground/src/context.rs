//! # UA Profile & Ground Risk Context
//!
//! Input types for the ground risk engine. A [`UaProfile`] describes the
//! aircraft; a [`GroundRiskContext`] describes what it flies over. Both
//! are immutable per calculation call.
//!
//! SORA 2.0 keys the iGRC row on an enumerated operational scenario
//! ([`OperationalScenario`]); SORA 2.5 keys it on a population density
//! band ([`PopulationDensityBand`]), either given directly or derived
//! from a numeric density.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use sora_core::{SoraError, SoraVersion};

// ---------------------------------------------------------------------------
// UaProfile
// ---------------------------------------------------------------------------

/// Physical characteristics of the unmanned aircraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UaProfile {
    /// Maximum characteristic dimension in metres (wingspan, rotor
    /// diameter, or largest dimension).
    pub dimension_m: f64,
    /// Maximum speed in metres per second.
    pub max_speed_mps: f64,
    /// Maximum take-off mass in kilograms. Required for the 2.5
    /// micro-UAS exemption check; optional otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtom_kg: Option<f64>,
    /// Expected kinetic energy in joules, used only to cross-validate
    /// the dimension column under SORA 2.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kinetic_energy_j: Option<f64>,
}

impl UaProfile {
    /// Validate physical plausibility before any table lookup runs.
    pub fn validate(&self) -> Result<(), SoraError> {
        if !self.dimension_m.is_finite() || self.dimension_m <= 0.0 {
            return Err(SoraError::validation(
                "ua_dimension_m",
                format!("must be a positive finite number, got {}", self.dimension_m),
            ));
        }
        if !self.max_speed_mps.is_finite() || self.max_speed_mps <= 0.0 {
            return Err(SoraError::validation(
                "ua_speed_mps",
                format!("must be a positive finite number, got {}", self.max_speed_mps),
            ));
        }
        if let Some(mtom) = self.mtom_kg {
            if !mtom.is_finite() || mtom <= 0.0 {
                return Err(SoraError::validation(
                    "mtom_kg",
                    format!("must be a positive finite number, got {mtom}"),
                ));
            }
        }
        if let Some(ke) = self.kinetic_energy_j {
            if !ke.is_finite() || ke < 0.0 {
                return Err(SoraError::validation(
                    "kinetic_energy_j",
                    format!("must be a non-negative finite number, got {ke}"),
                ));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// OperationalScenario (SORA 2.0 rows)
// ---------------------------------------------------------------------------

/// SORA 2.0 operational scenario — the row key of the 2.0 iGRC table.
///
/// The controlled-ground-area row applies to both VLOS and BVLOS; the
/// remaining rows split by line-of-sight regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationalScenario {
    /// VLOS or BVLOS over a controlled ground area.
    ControlledGroundArea,
    /// VLOS over a sparsely populated environment.
    VlosSparselyPopulated,
    /// BVLOS over a sparsely populated environment.
    BvlosSparselyPopulated,
    /// VLOS over a populated environment.
    VlosPopulated,
    /// BVLOS over a populated environment.
    BvlosPopulated,
    /// VLOS over a gathering of people.
    VlosGathering,
    /// BVLOS over a gathering of people.
    BvlosGathering,
}

impl OperationalScenario {
    /// All scenarios in iGRC table row order.
    pub fn all() -> &'static [OperationalScenario] {
        &[
            Self::ControlledGroundArea,
            Self::VlosSparselyPopulated,
            Self::BvlosSparselyPopulated,
            Self::VlosPopulated,
            Self::BvlosPopulated,
            Self::VlosGathering,
            Self::BvlosGathering,
        ]
    }

    /// Row index into the 2.0 iGRC table.
    pub(crate) fn row_index(&self) -> usize {
        match self {
            Self::ControlledGroundArea => 0,
            Self::VlosSparselyPopulated => 1,
            Self::BvlosSparselyPopulated => 2,
            Self::VlosPopulated => 3,
            Self::BvlosPopulated => 4,
            Self::VlosGathering => 5,
            Self::BvlosGathering => 6,
        }
    }

    /// Returns the snake_case wire identifier for this scenario.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ControlledGroundArea => "controlled_ground_area",
            Self::VlosSparselyPopulated => "vlos_sparsely_populated",
            Self::BvlosSparselyPopulated => "bvlos_sparsely_populated",
            Self::VlosPopulated => "vlos_populated",
            Self::BvlosPopulated => "bvlos_populated",
            Self::VlosGathering => "vlos_gathering",
            Self::BvlosGathering => "bvlos_gathering",
        }
    }
}

impl std::fmt::Display for OperationalScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationalScenario {
    type Err = SoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|sc| sc.as_str() == s)
            .copied()
            .ok_or_else(|| SoraError::UnknownValue {
                field: "scenario",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// PopulationDensityBand (SORA 2.5 rows)
// ---------------------------------------------------------------------------

/// SORA 2.5 population density band — the row key of the 2.5 iGRC table.
///
/// Bands are keyed by people per square kilometre; the boundaries are
/// exclusive upper bounds (a density of exactly 5.0 falls in `Below50`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopulationDensityBand {
    /// Controlled ground area — no uninvolved people exposed.
    Controlled,
    /// Fewer than 5 people/km².
    Below5,
    /// Fewer than 50 people/km².
    Below50,
    /// Fewer than 500 people/km².
    Below500,
    /// Fewer than 5 000 people/km².
    Below5000,
    /// Fewer than 50 000 people/km².
    Below50000,
    /// 50 000 people/km² or more (assemblies of people).
    Above50000,
}

impl PopulationDensityBand {
    /// All bands in iGRC table row order.
    pub fn all() -> &'static [PopulationDensityBand] {
        &[
            Self::Controlled,
            Self::Below5,
            Self::Below50,
            Self::Below500,
            Self::Below5000,
            Self::Below50000,
            Self::Above50000,
        ]
    }

    /// Classify a numeric density into its band.
    ///
    /// A controlled ground area is a claim about the operation, not the
    /// density, so this never returns `Controlled` — callers set the
    /// controlled flag on the context instead.
    pub fn from_density(people_per_km2: f64) -> Result<Self, SoraError> {
        if !people_per_km2.is_finite() || people_per_km2 < 0.0 {
            return Err(SoraError::validation(
                "population_density",
                format!("must be a non-negative finite number, got {people_per_km2}"),
            ));
        }
        Ok(if people_per_km2 < 5.0 {
            Self::Below5
        } else if people_per_km2 < 50.0 {
            Self::Below50
        } else if people_per_km2 < 500.0 {
            Self::Below500
        } else if people_per_km2 < 5_000.0 {
            Self::Below5000
        } else if people_per_km2 < 50_000.0 {
            Self::Below50000
        } else {
            Self::Above50000
        })
    }

    /// Row index into the 2.5 iGRC table.
    pub(crate) fn row_index(&self) -> usize {
        match self {
            Self::Controlled => 0,
            Self::Below5 => 1,
            Self::Below50 => 2,
            Self::Below500 => 3,
            Self::Below5000 => 4,
            Self::Below50000 => 5,
            Self::Above50000 => 6,
        }
    }

    /// Returns the snake_case wire identifier for this band.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Controlled => "controlled",
            Self::Below5 => "below_5",
            Self::Below50 => "below_50",
            Self::Below500 => "below_500",
            Self::Below5000 => "below_5000",
            Self::Below50000 => "below_50000",
            Self::Above50000 => "above_50000",
        }
    }
}

impl std::fmt::Display for PopulationDensityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// GroundRiskContext
// ---------------------------------------------------------------------------

/// What the operation flies over, under which SORA edition.
///
/// Exactly one row selector must match the version: `scenario` for 2.0,
/// `density_band` or `population_density` (or the controlled flag) for
/// 2.5. [`GroundRiskContext::resolve_row`] enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundRiskContext {
    /// The SORA edition this calculation runs under.
    pub version: SoraVersion,
    /// SORA 2.0 operational scenario.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<OperationalScenario>,
    /// SORA 2.5 density band, given directly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_band: Option<PopulationDensityBand>,
    /// SORA 2.5 numeric density in people/km², classified into a band.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population_density: Option<f64>,
    /// Whether the operation stays over a controlled ground area.
    #[serde(default)]
    pub controlled_ground_area: bool,
}

/// The resolved iGRC row selector, version-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedRow {
    /// A SORA 2.0 scenario row.
    Scenario(OperationalScenario),
    /// A SORA 2.5 density band row.
    Density(PopulationDensityBand),
}

impl GroundRiskContext {
    /// Resolve the iGRC table row for this context.
    ///
    /// The controlled-ground-area flag takes precedence over any density
    /// or scenario input: a controlled ground area is the strongest
    /// exposure claim and maps to the table's first row in both editions.
    pub fn resolve_row(&self) -> Result<ResolvedRow, SoraError> {
        match self.version {
            SoraVersion::V2_0 => {
                if self.controlled_ground_area {
                    return Ok(ResolvedRow::Scenario(OperationalScenario::ControlledGroundArea));
                }
                let scenario = self.scenario.ok_or_else(|| {
                    SoraError::validation("scenario", "SORA 2.0 requires an operational scenario")
                })?;
                Ok(ResolvedRow::Scenario(scenario))
            }
            SoraVersion::V2_5 => {
                if self.controlled_ground_area {
                    return Ok(ResolvedRow::Density(PopulationDensityBand::Controlled));
                }
                if let Some(band) = self.density_band {
                    return Ok(ResolvedRow::Density(band));
                }
                if let Some(density) = self.population_density {
                    return Ok(ResolvedRow::Density(PopulationDensityBand::from_density(
                        density,
                    )?));
                }
                Err(SoraError::validation(
                    "population_density",
                    "SORA 2.5 requires a density band, a numeric density, or the controlled-ground-area flag",
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(dimension_m: f64, max_speed_mps: f64) -> UaProfile {
        UaProfile {
            dimension_m,
            max_speed_mps,
            mtom_kg: None,
            kinetic_energy_j: None,
        }
    }

    #[test]
    fn test_profile_rejects_nonpositive_dimension() {
        assert!(profile(0.0, 10.0).validate().is_err());
        assert!(profile(-1.0, 10.0).validate().is_err());
        assert!(profile(f64::NAN, 10.0).validate().is_err());
        assert!(profile(1.0, 10.0).validate().is_ok());
    }

    #[test]
    fn test_density_band_boundaries_are_exclusive_upper() {
        assert_eq!(
            PopulationDensityBand::from_density(4.99).unwrap(),
            PopulationDensityBand::Below5
        );
        assert_eq!(
            PopulationDensityBand::from_density(5.0).unwrap(),
            PopulationDensityBand::Below50
        );
        assert_eq!(
            PopulationDensityBand::from_density(49_999.0).unwrap(),
            PopulationDensityBand::Below50000
        );
        assert_eq!(
            PopulationDensityBand::from_density(50_000.0).unwrap(),
            PopulationDensityBand::Above50000
        );
    }

    #[test]
    fn test_density_band_rejects_negative() {
        assert!(PopulationDensityBand::from_density(-1.0).is_err());
        assert!(PopulationDensityBand::from_density(f64::INFINITY).is_err());
    }

    #[test]
    fn test_resolve_row_v20_requires_scenario() {
        let ctx = GroundRiskContext {
            version: SoraVersion::V2_0,
            scenario: None,
            density_band: None,
            population_density: None,
            controlled_ground_area: false,
        };
        assert!(ctx.resolve_row().is_err());
    }

    #[test]
    fn test_resolve_row_controlled_flag_wins() {
        let ctx = GroundRiskContext {
            version: SoraVersion::V2_5,
            scenario: None,
            density_band: Some(PopulationDensityBand::Below5000),
            population_density: None,
            controlled_ground_area: true,
        };
        assert_eq!(
            ctx.resolve_row().unwrap(),
            ResolvedRow::Density(PopulationDensityBand::Controlled)
        );
    }

    #[test]
    fn test_resolve_row_v25_numeric_density() {
        let ctx = GroundRiskContext {
            version: SoraVersion::V2_5,
            scenario: None,
            density_band: None,
            population_density: Some(120.0),
            controlled_ground_area: false,
        };
        assert_eq!(
            ctx.resolve_row().unwrap(),
            ResolvedRow::Density(PopulationDensityBand::Below500)
        );
    }

    #[test]
    fn test_scenario_roundtrip() {
        for scenario in OperationalScenario::all() {
            let parsed: OperationalScenario = scenario.as_str().parse().unwrap();
            assert_eq!(*scenario, parsed);
        }
    }
}
