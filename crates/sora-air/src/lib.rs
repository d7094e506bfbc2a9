//! # sora-air — Air Risk Engine
//!
//! Maps airspace, altitude, and environment descriptors to an Airspace
//! Encounter Category (AEC 1–12) and an Initial Air Risk Class (ARC a–d),
//! then applies strategic mitigations to compute the Residual ARC.
//!
//! ## Pipeline Position
//!
//! ```text
//! AirspaceEnvironment
//!        │
//!        ▼ determine_initial_arc()     (decision tree + static AEC table)
//!    ArcResult (initial)
//!        │
//!        ▼ determine_residual_arc()    (override > atypical > max of paths)
//!    ArcResult (residual) ──▶ SAIL engine
//! ```
//!
//! ## No Double-Counting
//!
//! The density-rating reduction and the strategic-mitigation reduction
//! are competing justifications for the same claim (fewer encounters
//! than the airspace class implies). Only the larger single reduction
//! applies — they are never summed.
//!
//! ## Crate Policy
//!
//! - Pure functions over immutable inputs; no per-call state retained.
//! - Unrecognized environment combinations classify conservatively to
//!   the highest-risk applicable AEC with a warning note — under-
//!   classifying air risk is unacceptable, so there is no fatal path.

pub mod aec;
pub mod engine;
pub mod environment;
pub mod residual;

pub use aec::{aec_attributes, AecAttributes};
pub use engine::{determine_initial_arc, determine_residual_arc, ArcResult};
pub use environment::{
    AirspaceClass, AirspaceControl, AirspaceEnvironment, EnvironmentType, LocationType, Typicality,
};
pub use residual::{StrategicMitigationId, StrategicMitigations};
