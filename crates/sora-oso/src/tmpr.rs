//! # TMPR Lookup
//!
//! The Tactical Mitigation Performance Requirement is a direct map from
//! the residual ARC — no computation, pure lookup. SORA 2.5 raises each
//! non-trivial level one step relative to 2.0.

use serde::{Deserialize, Serialize};

use sora_core::{AirRiskClass, Robustness, SoraVersion, TmprLevel};

/// The tactical mitigation requirement for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmprResult {
    /// The SORA edition this was read under.
    pub version: SoraVersion,
    /// The residual ARC the level was derived from.
    pub residual_arc: AirRiskClass,
    /// Required tactical mitigation performance.
    pub level: TmprLevel,
    /// Robustness the TMPR evidence must be demonstrated at.
    pub robustness: Robustness,
}

/// Read the TMPR for a residual ARC.
pub fn tmpr_for(version: SoraVersion, residual_arc: AirRiskClass) -> TmprResult {
    let level = match (version, residual_arc) {
        (_, AirRiskClass::A) => TmprLevel::None,
        (SoraVersion::V2_0, AirRiskClass::B) => TmprLevel::Low,
        (SoraVersion::V2_0, AirRiskClass::C) => TmprLevel::Medium,
        (SoraVersion::V2_0, AirRiskClass::D) => TmprLevel::High,
        (SoraVersion::V2_5, AirRiskClass::B) => TmprLevel::Medium,
        (SoraVersion::V2_5, AirRiskClass::C) => TmprLevel::High,
        (SoraVersion::V2_5, AirRiskClass::D) => TmprLevel::VeryHigh,
    };
    TmprResult {
        version,
        residual_arc,
        level,
        robustness: level.required_robustness(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v20_map() {
        assert_eq!(tmpr_for(SoraVersion::V2_0, AirRiskClass::A).level, TmprLevel::None);
        assert_eq!(tmpr_for(SoraVersion::V2_0, AirRiskClass::B).level, TmprLevel::Low);
        assert_eq!(tmpr_for(SoraVersion::V2_0, AirRiskClass::C).level, TmprLevel::Medium);
        assert_eq!(tmpr_for(SoraVersion::V2_0, AirRiskClass::D).level, TmprLevel::High);
    }

    #[test]
    fn test_v25_map_is_one_step_higher() {
        assert_eq!(tmpr_for(SoraVersion::V2_5, AirRiskClass::A).level, TmprLevel::None);
        assert_eq!(tmpr_for(SoraVersion::V2_5, AirRiskClass::B).level, TmprLevel::Medium);
        assert_eq!(tmpr_for(SoraVersion::V2_5, AirRiskClass::C).level, TmprLevel::High);
        assert_eq!(tmpr_for(SoraVersion::V2_5, AirRiskClass::D).level, TmprLevel::VeryHigh);
    }

    #[test]
    fn test_robustness_tracks_level() {
        let result = tmpr_for(SoraVersion::V2_5, AirRiskClass::D);
        assert_eq!(result.robustness, Robustness::High);
        let result = tmpr_for(SoraVersion::V2_0, AirRiskClass::A);
        assert_eq!(result.robustness, Robustness::None);
    }
}
