//! # sora-engine — Risk Classification Orchestrator
//!
//! Composes the four engine crates into one end-to-end call:
//!
//! ```text
//! SoraCompleteRequest
//!   │
//!   ├─▶ sora-ground  compute_ground_risk()      final GRC
//!   ├─▶ sora-air     determine_initial_arc()
//!   │                determine_residual_arc()   residual ARC
//!   ├─▶ sora-sail    determine_sail()           SAIL / Category C
//!   └─▶ sora-oso     requirements + compliance  OSO set, TMPR
//!   │
//!   ▼
//! SoraCompleteResult (+ ReasonCode, advisory overlay)
//! ```
//!
//! Out-of-scope and Category C short-circuit the sequence — later
//! stages are skipped, never faked. The advisory risk overlay is
//! explicitly non-regulatory and never feeds back into GRC/ARC/SAIL/OSO.
//!
//! The orchestrator is a pure function: no clock, no randomness, no
//! I/O. Identical requests produce identical results; request ids and
//! timestamps belong to the serving layer.

pub mod advisory;
pub mod orchestrator;
pub mod reason;
pub mod remote;
pub mod request;

pub use advisory::{advisory_risk, AdvisoryRisk, RiskBand};
pub use orchestrator::{execute_complete, SoraCompleteResult};
pub use reason::ReasonCode;
pub use remote::{
    interpret_remote_sail, RemoteSailOutcome, SailComputationRequest, SailComputationResponse,
};
pub use request::SoraCompleteRequest;
