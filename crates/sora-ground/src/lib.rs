//! # sora-ground — Ground Risk Engine
//!
//! Maps UA physical characteristics and population exposure to an
//! Intrinsic Ground Risk Class (iGRC) through the fixed SORA tables,
//! then applies ground-risk mitigations to produce a Final GRC.
//!
//! ## Pipeline Position
//!
//! ```text
//! UaProfile + GroundRiskContext
//!        │
//!        ▼ compute_intrinsic_grc()          (table lookup, micro-UAS rule)
//!   IntrinsicGrc
//!        │
//!        ▼ apply_mitigations()              (credit sum, floor clamps)
//!   GroundRiskResult ──▶ SAIL engine
//! ```
//!
//! ## Table Encoding
//!
//! The official iGRC tables are encoded cell-for-cell as static arrays in
//! [`tables`], grey (out-of-scope) cells as `None`. Mitigation credits are
//! one flat `(version, type, robustness)` lookup in [`mitigation`] — the
//! regulatory-table nature of the data stays explicit and auditable
//! against the source documents.
//!
//! ## Crate Policy
//!
//! - Pure functions over immutable inputs; no per-call state retained.
//! - Regulatory outcomes (grey cells, GRC over the acceptability limit)
//!   are flags on [`GroundRiskResult`], never panics or errors.
//! - No `unwrap()`/`expect()` outside tests.

pub mod context;
pub mod engine;
pub mod mitigation;
pub mod tables;

pub use context::{GroundRiskContext, OperationalScenario, PopulationDensityBand, UaProfile};
pub use engine::{compute_ground_risk, compute_intrinsic_grc, GroundRiskResult, IntrinsicGrc};
pub use mitigation::{AppliedMitigation, GroundMitigation, GroundMitigationType};
