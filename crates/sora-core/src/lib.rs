//! # sora-core — Foundational Types for the SORA Stack
//!
//! This crate is the bedrock of the SORA Stack. It defines the regulatory
//! primitives shared by every engine crate: the methodology version tag,
//! the robustness ordinal, and the risk class types (GRC, ARC, AEC, SAIL).
//! Every other crate in the workspace depends on `sora-core`; it depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed enums for regulatory scales.** `AirRiskClass`, `Sail`,
//!    `Robustness`, `TmprLevel` — exhaustive `match` everywhere. Adding a
//!    level forces every consumer to handle it at compile time.
//!
//! 2. **Validated constructors for numeric classes.** `Aec::new()` and
//!    `GrcValue::new()` reject values outside the methodology's defined
//!    range. No bare integers cross a crate boundary.
//!
//! 3. **Version branching is data, not inheritance.** `SoraVersion` is a
//!    two-variant enum passed explicitly into every engine call; each
//!    engine dispatches to a version-specific table behind one public
//!    contract.
//!
//! 4. **Regulatory outcomes are values, not errors.** Out-of-scope,
//!    Category C, and compliance gaps are fields on result structs.
//!    `SoraError` covers only malformed input and domain violations.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sora-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod classes;
pub mod error;
pub mod robustness;
pub mod version;

// Re-export primary types for ergonomic imports.
pub use classes::{Aec, AirRiskClass, GrcValue, Sail};
pub use error::SoraError;
pub use robustness::{Robustness, TmprLevel};
pub use version::SoraVersion;
