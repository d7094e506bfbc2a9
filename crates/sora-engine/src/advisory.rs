//! # Advisory Risk Overlay
//!
//! A heuristic 0–100 score and band summarizing the regulatory outputs
//! for dashboards and triage queues.
//!
//! This overlay is NOT part of the SORA methodology. It is derived from
//! the regulatory numbers after the fact and never feeds back into
//! GRC/ARC/SAIL/OSO determination — the orchestrator computes it last,
//! from an already-final result.

use serde::{Deserialize, Serialize};

use sora_core::{AirRiskClass, Sail};

/// Coarse banding of the advisory score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Moderate,
    Elevated,
    High,
}

/// The advisory overlay attached to complete results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryRisk {
    /// Heuristic score, 0–100.
    pub score: u8,
    /// Band the score falls in.
    pub band: RiskBand,
}

/// Score weights: ground risk carries half, air risk and assurance the
/// rest. A triage heuristic, not a regulatory rule.
const GRC_WEIGHT: u32 = 50;
const ARC_WEIGHT: u32 = 30;
const SAIL_WEIGHT: u32 = 20;

/// Compute the advisory overlay from final regulatory outputs.
pub fn advisory_risk(final_grc: u8, residual_arc: AirRiskClass, sail: Sail) -> AdvisoryRisk {
    let grc_part = u32::from(final_grc.min(10)) * GRC_WEIGHT / 10;
    let arc_part = match residual_arc {
        AirRiskClass::A => 0,
        AirRiskClass::B => ARC_WEIGHT / 3,
        AirRiskClass::C => ARC_WEIGHT * 2 / 3,
        AirRiskClass::D => ARC_WEIGHT,
    };
    let sail_part = match sail {
        Sail::I => 0,
        Sail::Ii => SAIL_WEIGHT / 5,
        Sail::Iii => SAIL_WEIGHT * 2 / 5,
        Sail::Iv => SAIL_WEIGHT * 3 / 5,
        Sail::V => SAIL_WEIGHT * 4 / 5,
        Sail::Vi => SAIL_WEIGHT,
    };
    let score = (grc_part + arc_part + sail_part).min(100) as u8;
    let band = if score < 25 {
        RiskBand::Low
    } else if score < 50 {
        RiskBand::Moderate
    } else if score < 75 {
        RiskBand::Elevated
    } else {
        RiskBand::High
    };
    AdvisoryRisk { score, band }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extremes() {
        let low = advisory_risk(1, AirRiskClass::A, Sail::I);
        assert_eq!(low.band, RiskBand::Low);
        let high = advisory_risk(10, AirRiskClass::D, Sail::Vi);
        assert_eq!(high.score, 100);
        assert_eq!(high.band, RiskBand::High);
    }

    #[test]
    fn test_score_monotone_in_each_input() {
        let base = advisory_risk(3, AirRiskClass::B, Sail::Ii).score;
        assert!(advisory_risk(5, AirRiskClass::B, Sail::Ii).score >= base);
        assert!(advisory_risk(3, AirRiskClass::C, Sail::Ii).score >= base);
        assert!(advisory_risk(3, AirRiskClass::B, Sail::Iv).score >= base);
    }
}
