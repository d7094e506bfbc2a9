//! # Robustness Ordinal & TMPR Levels
//!
//! Robustness is the SORA measure of how trustworthy a mitigation or
//! safety objective implementation is. It forms a strict ordinal scale:
//!
//! ```text
//! None < Low < Medium < High
//! ```
//!
//! Compliance validation is an ordinal comparison: an implementation at
//! `Medium` satisfies a requirement at `Low` or `Medium`, never `High`.
//!
//! [`TmprLevel`] extends the scale with `VeryHigh` for the tactical
//! mitigation performance requirement, which SORA 2.5 pushes one level
//! above the 2.0 ceiling for ARC-d operations.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SoraError;

// ---------------------------------------------------------------------------
// Robustness
// ---------------------------------------------------------------------------

/// Robustness level of a mitigation or OSO implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Robustness {
    /// No claim made. Carries no credit and satisfies no requirement.
    None,
    /// Low robustness (declarative evidence).
    Low,
    /// Medium robustness (supporting evidence available on request).
    Medium,
    /// High robustness (evidence validated by a competent third party).
    High,
}

impl Robustness {
    /// All levels in ascending ordinal order.
    pub fn all() -> &'static [Robustness] {
        &[Self::None, Self::Low, Self::Medium, Self::High]
    }

    /// Ordinal rank. Higher is more robust.
    fn rank(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Whether this level satisfies a requirement at `required`.
    pub fn satisfies(self, required: Robustness) -> bool {
        self.rank() >= required.rank()
    }

    /// Returns the snake_case wire identifier for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl PartialOrd for Robustness {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Robustness {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl std::fmt::Display for Robustness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Robustness {
    type Err = SoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(SoraError::UnknownValue {
                field: "robustness",
                value: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// TmprLevel
// ---------------------------------------------------------------------------

/// Tactical Mitigation Performance Requirement level.
///
/// Derived deterministically from the residual ARC; `VeryHigh` exists
/// only under SORA 2.5 (residual ARC-d).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TmprLevel {
    /// No tactical mitigation required (ARC-a airspace).
    None,
    /// Low performance requirement.
    Low,
    /// Medium performance requirement.
    Medium,
    /// High performance requirement.
    High,
    /// Very high performance requirement (SORA 2.5, ARC-d only).
    VeryHigh,
}

impl TmprLevel {
    /// Returns the snake_case wire identifier for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }

    /// The robustness the TMPR evidence itself must be demonstrated at.
    ///
    /// Tracks the performance level except at the extremes: no tactical
    /// mitigation means no evidence, and `VeryHigh` performance is still
    /// demonstrated at `High` robustness (the robustness scale has no
    /// fifth level).
    pub fn required_robustness(&self) -> Robustness {
        match self {
            Self::None => Robustness::None,
            Self::Low => Robustness::Low,
            Self::Medium => Robustness::Medium,
            Self::High | Self::VeryHigh => Robustness::High,
        }
    }
}

impl std::fmt::Display for TmprLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
