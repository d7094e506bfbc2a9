//! # Risk Class Primitives
//!
//! The four class scales the pipeline moves through:
//!
//! ```text
//! GrcValue (1–10)  ─┐
//!                   ├─▶ Sail (I–VI)
//! AirRiskClass ─────┘
//!      ▲
//!      │
//! Aec (1–12)
//! ```
//!
//! Numeric classes use validated constructors; out-of-range values are
//! rejected at the boundary rather than clamped. The alphabetic scales
//! are closed enums with exhaustive matching.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SoraError;

// ---------------------------------------------------------------------------
// GrcValue
// ---------------------------------------------------------------------------

/// A Ground Risk Class value in the methodology's defined range 1–10.
///
/// Both intrinsic and final GRC values are carried as `GrcValue`. Engine
/// internals sum mitigation credits on signed integers and re-validate
/// through [`GrcValue::new`] at the end, so a `GrcValue` in a result is
/// always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrcValue(u8);

impl GrcValue {
    /// Lowest defined GRC.
    pub const MIN: u8 = 1;
    /// Highest defined GRC (2.5 table ceiling; 2.0 tops out at 10 as well
    /// via the BVLOS-over-populated row).
    pub const MAX: u8 = 10;

    /// Construct a validated GRC value.
    pub fn new(value: u8) -> Result<Self, SoraError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SoraError::OutOfRange {
                field: "grc",
                value: i64::from(value),
                min: i64::from(Self::MIN),
                max: i64::from(Self::MAX),
            })
        }
    }

    /// The raw class number.
    pub fn get(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for GrcValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// AirRiskClass
// ---------------------------------------------------------------------------

/// Air Risk Class — the a–d scale for mid-air-collision risk.
///
/// `A` is the least risky (atypical/segregated airspace), `D` the most.
/// Strategic mitigation steps the class down this scale and saturates
/// at `A`; nothing in the pipeline ever steps it up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AirRiskClass {
    /// ARC-a — atypical or segregated airspace.
    A,
    /// ARC-b — low encounter rate airspace.
    B,
    /// ARC-c — moderate encounter rate airspace.
    C,
    /// ARC-d — high encounter rate airspace (integrated, near aerodromes).
    D,
}

impl AirRiskClass {
    /// All classes in ascending risk order.
    pub fn all() -> &'static [AirRiskClass] {
        &[Self::A, Self::B, Self::C, Self::D]
    }

    /// Ordinal rank. Higher is more risky.
    fn rank(self) -> u8 {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    /// Step the class down (towards lower risk) by `steps`, saturating
    /// at ARC-a.
    pub fn step_down(self, steps: u8) -> AirRiskClass {
        match self.rank().saturating_sub(steps) {
            0 => Self::A,
            1 => Self::B,
            2 => Self::C,
            _ => Self::D,
        }
    }

    /// Number of reduction steps between `self` and `other`, zero if
    /// `other` is not below `self`.
    pub fn steps_above(self, other: AirRiskClass) -> u8 {
        self.rank().saturating_sub(other.rank())
    }

    /// Returns the lowercase wire identifier for this class.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
        }
    }
}

impl PartialOrd for AirRiskClass {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AirRiskClass {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl std::fmt::Display for AirRiskClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AirRiskClass {
    type Err = SoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            "c" => Ok(Self::C),
            "d" => Ok(Self::D),
            other => Err(SoraError::UnknownValue {
                field: "arc",
                value: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Aec
// ---------------------------------------------------------------------------

/// Airspace Encounter Category, 1–12.
///
/// Each AEC is a named airspace/altitude/location combination carrying a
/// fixed (density rating, initial ARC) pair in the Annex C table. The
/// pair lookup itself lives in the air risk engine; this type only
/// guarantees the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Aec(u8);

impl Aec {
    /// Construct a validated AEC.
    pub fn new(value: u8) -> Result<Self, SoraError> {
        if (1..=12).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SoraError::OutOfRange {
                field: "aec",
                value: i64::from(value),
                min: 1,
                max: 12,
            })
        }
    }

    /// The raw category number.
    pub fn get(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Aec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Sail
// ---------------------------------------------------------------------------

/// Specific Assurance and Integrity Level, I–VI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sail {
    #[serde(rename = "I")]
    I,
    #[serde(rename = "II")]
    Ii,
    #[serde(rename = "III")]
    Iii,
    #[serde(rename = "IV")]
    Iv,
    #[serde(rename = "V")]
    V,
    #[serde(rename = "VI")]
    Vi,
}

impl Sail {
    /// All levels in ascending order.
    pub fn all() -> &'static [Sail] {
        &[Self::I, Self::Ii, Self::Iii, Self::Iv, Self::V, Self::Vi]
    }

    /// Ordinal rank, 1–6.
    fn rank(self) -> u8 {
        match self {
            Self::I => 1,
            Self::Ii => 2,
            Self::Iii => 3,
            Self::Iv => 4,
            Self::V => 5,
            Self::Vi => 6,
        }
    }

    /// The roman-numeral form used on the wire and in reports.
    pub fn as_roman(&self) -> &'static str {
        match self {
            Self::I => "I",
            Self::Ii => "II",
            Self::Iii => "III",
            Self::Iv => "IV",
            Self::V => "V",
            Self::Vi => "VI",
        }
    }
}

impl PartialOrd for Sail {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sail {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl std::fmt::Display for Sail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_roman())
    }
}

impl FromStr for Sail {
    type Err = SoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "I" => Ok(Self::I),
            "II" => Ok(Self::Ii),
            "III" => Ok(Self::Iii),
            "IV" => Ok(Self::Iv),
            "V" => Ok(Self::V),
            "VI" => Ok(Self::Vi),
            other => Err(SoraError::UnknownValue {
                field: "sail",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grc_range() {
        assert!(GrcValue::new(0).is_err());
        assert!(GrcValue::new(1).is_ok());
        assert!(GrcValue::new(10).is_ok());
        assert!(GrcValue::new(11).is_err());
    }

    #[test]
    fn test_arc_step_down_saturates() {
        assert_eq!(AirRiskClass::D.step_down(1), AirRiskClass::C);
        assert_eq!(AirRiskClass::D.step_down(2), AirRiskClass::B);
        assert_eq!(AirRiskClass::B.step_down(5), AirRiskClass::A);
        assert_eq!(AirRiskClass::A.step_down(1), AirRiskClass::A);
    }

    #[test]
    fn test_arc_steps_above() {
        assert_eq!(AirRiskClass::D.steps_above(AirRiskClass::B), 2);
        assert_eq!(AirRiskClass::A.steps_above(AirRiskClass::D), 0);
    }

    #[test]
    fn test_arc_ordering() {
        assert!(AirRiskClass::A < AirRiskClass::B);
        assert!(AirRiskClass::C < AirRiskClass::D);
    }

    #[test]
    fn test_aec_range() {
        assert!(Aec::new(0).is_err());
        assert!(Aec::new(1).is_ok());
        assert!(Aec::new(12).is_ok());
        assert!(Aec::new(13).is_err());
    }

    #[test]
    fn test_sail_roman_roundtrip() {
        for sail in Sail::all() {
            let parsed: Sail = sail.as_roman().parse().unwrap();
            assert_eq!(*sail, parsed);
        }
    }

    #[test]
    fn test_sail_serde_wire_format() {
        assert_eq!(serde_json::to_string(&Sail::Iv).unwrap(), "\"IV\"");
        let parsed: Sail = serde_json::from_str("\"VI\"").unwrap();
        assert_eq!(parsed, Sail::Vi);
    }

    #[test]
    fn test_arc_serde_wire_format() {
        assert_eq!(serde_json::to_string(&AirRiskClass::C).unwrap(), "\"c\"");
    }

    #[test]
    fn test_sail_ordering() {
        assert!(Sail::I < Sail::Vi);
        assert!(Sail::Iii < Sail::Iv);
    }
}
