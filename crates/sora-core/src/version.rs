//! # SORA Methodology Version
//!
//! The JARUS SORA methodology exists in two editions with materially
//! different tables: 2.0 (scenario-based ground risk, 24 OSOs) and 2.5
//! (quantitative population density, consolidated OSOs, micro-UAS rule).
//!
//! Every engine call takes an explicit [`SoraVersion`] and dispatches to
//! the matching table set. There is no default version — callers must
//! state which edition they are computing under.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SoraError;

/// The SORA methodology edition a calculation runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoraVersion {
    /// JARUS SORA v2.0 — scenario rows, M1/M2/M3 mitigations, Category C.
    #[serde(rename = "2.0")]
    V2_0,
    /// JARUS SORA v2.5 — density bands, M1A/M1B/M1C/M2, micro-UAS rule.
    #[serde(rename = "2.5")]
    V2_5,
}

impl SoraVersion {
    /// All supported versions in publication order.
    pub fn all() -> &'static [SoraVersion] {
        &[Self::V2_0, Self::V2_5]
    }

    /// Returns the wire identifier for this version.
    ///
    /// This must match the serde serialization format and the version
    /// strings accepted by the external calculation service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V2_0 => "2.0",
            Self::V2_5 => "2.5",
        }
    }
}

impl std::fmt::Display for SoraVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoraVersion {
    type Err = SoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2.0" => Ok(Self::V2_0),
            "2.5" => Ok(Self::V2_5),
            other => Err(SoraError::UnknownValue {
                field: "sora_version",
                value: other.to_string(),
            }),
        }
    }
}
