//! # Complete Calculation Request
//!
//! The single request object the orchestrator consumes. Ground and air
//! inputs are carried in the engine crates' own types; the version tag
//! is stated once here and threaded into every stage.

use serde::{Deserialize, Serialize};

use sora_air::{AirspaceEnvironment, StrategicMitigations};
use sora_core::SoraVersion;
use sora_ground::{
    GroundMitigation, GroundRiskContext, OperationalScenario, PopulationDensityBand, UaProfile,
};
use sora_oso::OsoImplementation;

/// An end-to-end risk classification request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoraCompleteRequest {
    /// The SORA edition to compute under.
    pub sora_version: SoraVersion,
    /// The aircraft.
    pub ua: UaProfile,
    /// SORA 2.0 operational scenario.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<OperationalScenario>,
    /// SORA 2.5 density band, given directly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_band: Option<PopulationDensityBand>,
    /// SORA 2.5 numeric density in people/km².
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population_density: Option<f64>,
    /// Whether the operation stays over a controlled ground area.
    #[serde(default)]
    pub controlled_ground_area: bool,
    /// Claimed ground-risk mitigations.
    #[serde(default)]
    pub ground_mitigations: Vec<GroundMitigation>,
    /// The airspace environment.
    pub airspace: AirspaceEnvironment,
    /// Strategic air-risk mitigation claims.
    #[serde(default)]
    pub strategic_mitigations: StrategicMitigations,
    /// Operator-declared OSO implementations, validated against the
    /// requirement set when present.
    #[serde(default)]
    pub oso_implementations: Vec<OsoImplementation>,
}

impl SoraCompleteRequest {
    /// The ground risk context this request implies.
    pub fn ground_context(&self) -> GroundRiskContext {
        GroundRiskContext {
            version: self.sora_version,
            scenario: self.scenario,
            density_band: self.density_band,
            population_density: self.population_density,
            controlled_ground_area: self.controlled_ground_area,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sora_air::{AirspaceClass, AirspaceControl, EnvironmentType, LocationType, Typicality};

    #[test]
    fn test_minimal_request_deserializes_with_defaults() {
        let json = r#"{
            "sora_version": "2.5",
            "ua": {"dimension_m": 1.0, "max_speed_mps": 20.0},
            "population_density": 100.0,
            "airspace": {
                "max_height_agl_m": 100.0,
                "airspace_class": "g",
                "control": "uncontrolled",
                "location_type": "non_airport",
                "environment": "rural",
                "typicality": "typical"
            }
        }"#;
        let request: SoraCompleteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.sora_version, SoraVersion::V2_5);
        assert!(request.ground_mitigations.is_empty());
        assert!(request.oso_implementations.is_empty());
        assert_eq!(request.airspace.environment, EnvironmentType::Rural);
        assert_eq!(request.airspace.location_type, LocationType::NonAirport);
        assert_eq!(request.airspace.control, AirspaceControl::Uncontrolled);
        assert_eq!(request.airspace.airspace_class, AirspaceClass::G);
        assert_eq!(request.airspace.typicality, Typicality::Typical);
    }

    #[test]
    fn test_ground_context_carries_version() {
        let json = r#"{
            "sora_version": "2.0",
            "ua": {"dimension_m": 1.0, "max_speed_mps": 20.0},
            "scenario": "vlos_populated",
            "airspace": {
                "max_height_agl_m": 100.0,
                "airspace_class": "g",
                "control": "uncontrolled",
                "location_type": "non_airport",
                "environment": "urban",
                "typicality": "typical"
            }
        }"#;
        let request: SoraCompleteRequest = serde_json::from_str(json).unwrap();
        let context = request.ground_context();
        assert_eq!(context.version, SoraVersion::V2_0);
        assert_eq!(context.scenario, Some(OperationalScenario::VlosPopulated));
    }
}
