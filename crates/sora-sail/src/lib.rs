//! # sora-sail — SAIL Engine
//!
//! A read-only matrix stage: (final GRC × residual ARC) → SAIL I–VI.
//! No mitigation or clamping happens here.
//!
//! Three terminal shapes exist besides a plain SAIL level:
//!
//! - **Category C** (SORA 2.0): final GRC above 7 is a named regulatory
//!   outcome, not an error. SAIL is null and the OSO stage is skipped
//!   entirely by the orchestrator.
//! - **SAIL VI shortcut** (SORA 2.5): final GRC 9–10 is unconditionally
//!   SAIL VI regardless of ARC.
//! - **Out of scope**: a GRC outside the version's defined range.
//!
//! ## Crate Policy
//!
//! - Pure function over immutable inputs; the matrix is a `const`.
//! - Regulatory outcomes are enum values on [`SailResult`], never errors.

pub mod matrix;

pub use matrix::{determine_sail, sail_matrix, SailOutcome, SailResult};
