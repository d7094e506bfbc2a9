//! # sora-oso — OSO/TMPR Engine
//!
//! Given a SAIL, looks up the required Operational Safety Objectives
//! with their per-objective mandated robustness, validates operator-
//! declared implementations against them, and derives the Tactical
//! Mitigation Performance Requirement from the residual ARC.
//!
//! ## Static Data
//!
//! The OSO requirement table is the largest single table in the stack:
//! 24 objectives × 6 SAIL columns for SORA 2.0, with 2.5 addressing the
//! consolidated 17-objective subset. It is encoded once in
//! [`requirements`] and exposed only through read-only accessors.
//!
//! ## Compliance Is an Outcome, Not an Error
//!
//! `validate_compliance` returns an itemized [`ComplianceResult`] —
//! missing objectives and under-robust implementations are legitimate
//! negative business results the caller must handle, never exceptions.

pub mod compliance;
pub mod requirements;
pub mod tmpr;

pub use compliance::{validate_compliance, ComplianceResult, OsoImplementation, RobustnessGap};
pub use requirements::{
    oso_requirements, required_oso_count, Dependency, OsoCategory, OsoRequirement,
    RequiredRobustness,
};
pub use tmpr::{tmpr_for, TmprResult};
