//! # Airspace Environment Descriptors
//!
//! The input side of the air risk engine: where the operation flies,
//! how high, in what kind of airspace, over what kind of terrain.
//! All enums here are closed; the decision tree in [`crate::aec`]
//! matches them exhaustively.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use sora_core::SoraError;

/// ICAO airspace class A–G.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AirspaceClass {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl AirspaceClass {
    /// All classes in ICAO order.
    pub fn all() -> &'static [AirspaceClass] {
        &[Self::A, Self::B, Self::C, Self::D, Self::E, Self::F, Self::G]
    }

    /// Returns the lowercase wire identifier for this class.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
            Self::E => "e",
            Self::F => "f",
            Self::G => "g",
        }
    }
}

impl std::fmt::Display for AirspaceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AirspaceClass {
    type Err = SoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| SoraError::UnknownValue {
                field: "airspace_class",
                value: s.to_string(),
            })
    }
}

/// Whether the operation takes place in controlled airspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirspaceControl {
    /// ATC provides separation services.
    Controlled,
    /// No separation services.
    Uncontrolled,
}

/// Where the operation is anchored relative to aerodromes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    /// In an airport environment.
    Airport,
    /// In a heliport environment.
    Heliport,
    /// Away from any aerodrome.
    NonAirport,
}

impl LocationType {
    /// Whether this is an aerodrome environment (airport or heliport).
    pub fn is_aerodrome(&self) -> bool {
        matches!(self, Self::Airport | Self::Heliport)
    }
}

/// Ground environment under the operation, as seen by air traffic.
///
/// Only the urban/rural distinction feeds the AEC split; suburban
/// counts as urban and industrial as rural for encounter purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentType {
    Urban,
    Suburban,
    Rural,
    Industrial,
}

impl EnvironmentType {
    /// Collapse to the urban/rural split the AEC table actually keys on.
    pub fn is_urban(&self) -> bool {
        matches!(self, Self::Urban | Self::Suburban)
    }
}

/// Whether the airspace is typical, or atypical/segregated by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Typicality {
    /// Ordinary shared airspace.
    Typical,
    /// Atypical or segregated airspace (e.g. active restricted areas) —
    /// manned encounters are not expected by design.
    AtypicalSegregated,
}

/// The complete airspace environment of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirspaceEnvironment {
    /// Maximum operating height above ground level, metres.
    pub max_height_agl_m: f64,
    /// Maximum operating height above mean sea level, metres. Used for
    /// the FL600 ceiling check when present; AGL is the fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height_amsl_m: Option<f64>,
    /// ICAO airspace class at the operating altitude.
    pub airspace_class: AirspaceClass,
    /// Controlled or uncontrolled airspace.
    pub control: AirspaceControl,
    /// Operation inside a Mode-S veil.
    #[serde(default)]
    pub is_mode_s_veil: bool,
    /// Operation inside a Transponder Mandatory Zone.
    #[serde(default)]
    pub is_tmz: bool,
    /// Aerodrome proximity.
    pub location_type: LocationType,
    /// Ground environment under the operation.
    pub environment: EnvironmentType,
    /// Airspace typicality claim.
    pub typicality: Typicality,
}

impl AirspaceEnvironment {
    /// Validate altitude inputs before classification.
    pub fn validate(&self) -> Result<(), SoraError> {
        if !self.max_height_agl_m.is_finite() || self.max_height_agl_m < 0.0 {
            return Err(SoraError::validation(
                "max_height_agl_m",
                format!(
                    "must be a non-negative finite number, got {}",
                    self.max_height_agl_m
                ),
            ));
        }
        if let Some(amsl) = self.max_height_amsl_m {
            if !amsl.is_finite() {
                return Err(SoraError::validation(
                    "max_height_amsl_m",
                    format!("must be a finite number, got {amsl}"),
                ));
            }
        }
        Ok(())
    }

    /// The altitude the FL600 ceiling check runs against.
    pub(crate) fn ceiling_reference_m(&self) -> f64 {
        self.max_height_amsl_m.unwrap_or(self.max_height_agl_m)
    }

    /// Transponder-mandatory environment (Mode-S veil or TMZ).
    pub(crate) fn is_transponder_zone(&self) -> bool {
        self.is_mode_s_veil || self.is_tmz
    }
}
