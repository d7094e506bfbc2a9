//! # Calculation Service Boundary
//!
//! Some deployments delegate the SAIL determination to an external
//! calculation service. The wire contract and the interpretation rules
//! live here, in the decision layer; the HTTP transport (retries,
//! backoff, base URLs) lives in `sora-calcsvc`.
//!
//! Interpretation rules:
//!
//! - `category == "C"` short-circuits: no SAIL, no OSO count.
//! - The OSO count a remote echoes back is trusted only for SORA 2.0.
//!   For 2.5 it is discarded and recomputed locally — the consolidated
//!   objective set is a local table the remote does not track.

use serde::{Deserialize, Serialize};

use sora_core::{AirRiskClass, Sail, SoraError, SoraVersion};
use sora_oso::required_oso_count;

/// Request body for the external SAIL computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SailComputationRequest {
    /// SORA version tag ("2.0" or "2.5").
    pub sora_version: String,
    /// The final GRC.
    pub grc_level: u8,
    /// The residual ARC ("a"–"d").
    pub arc_level: String,
}

impl SailComputationRequest {
    /// Build the wire request for a version, GRC and residual ARC.
    pub fn new(version: SoraVersion, final_grc: u8, residual_arc: AirRiskClass) -> Self {
        Self {
            sora_version: version.as_str().to_string(),
            grc_level: final_grc,
            arc_level: residual_arc.as_str().to_string(),
        }
    }
}

/// Response body from the external SAIL computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SailComputationResponse {
    /// The assigned SAIL as a roman numeral, absent for Category C.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sail_level: Option<String>,
    /// Terminal category ("C") when no SAIL applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// The remote's document reference for the determination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// OSO count the remote echoes back. Only meaningful for 2.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oso_count: Option<usize>,
}

/// An interpreted remote determination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteSailOutcome {
    /// A SAIL was assigned, with the OSO count to report.
    Assigned {
        sail: Sail,
        required_oso_count: usize,
    },
    /// Category C: no SAIL, no OSO count.
    CategoryC,
}

/// Interpret a remote response under the version's trust rules.
pub fn interpret_remote_sail(
    version: SoraVersion,
    response: &SailComputationResponse,
) -> Result<RemoteSailOutcome, SoraError> {
    if response.category.as_deref() == Some("C") {
        return Ok(RemoteSailOutcome::CategoryC);
    }

    let sail_level = response.sail_level.as_deref().ok_or_else(|| {
        SoraError::validation(
            "sail_level",
            "remote response carries neither a SAIL level nor a terminal category",
        )
    })?;
    let sail: Sail = sail_level.parse()?;

    let required_oso_count = match version {
        // 2.0: the remote's echo is authoritative when present.
        SoraVersion::V2_0 => response
            .oso_count
            .unwrap_or_else(|| required_oso_count(version, sail)),
        // 2.5: never trust the echo; the consolidated set is local.
        SoraVersion::V2_5 => {
            if response.oso_count.is_some() {
                tracing::debug!(
                    echoed = response.oso_count,
                    "discarding remote OSO count under SORA 2.5"
                );
            }
            required_oso_count(version, sail)
        }
    };

    Ok(RemoteSailOutcome::Assigned {
        sail,
        required_oso_count,
    })
}
