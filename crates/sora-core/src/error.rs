//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error type shared across the SORA Stack. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! Only malformed or out-of-domain input is an error. Regulatory
//! outcomes — out-of-scope operations, Category C, compliance gaps —
//! are first-class return values on result structs so the orchestrator
//! can inspect and short-circuit deterministically. A `SoraError`
//! reaching a caller always means the request itself was wrong.

use thiserror::Error;

/// Top-level error type for the SORA Stack.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SoraError {
    /// A field failed validation before any table lookup ran.
    #[error("validation error on {field}: {message}")]
    Validation {
        /// The offending request field.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// A numeric value fell outside the methodology's defined range.
    #[error("{field} value {value} outside defined range [{min}, {max}]")]
    OutOfRange {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: i64,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },

    /// An enumerated value was not recognized.
    #[error("unknown {field} value: {value:?}")]
    UnknownValue {
        /// The offending field.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A mitigation or OSO from one SORA version was used under the other.
    #[error("{subject} is not defined under SORA {version}")]
    VersionMismatch {
        /// What was misused (e.g. "mitigation M1A", "OSO 14").
        subject: String,
        /// The version the request ran under.
        version: &'static str,
    },
}

impl SoraError {
    /// Convenience constructor for field validation failures.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_field_and_bounds() {
        let err = SoraError::OutOfRange {
            field: "grc",
            value: 12,
            min: 1,
            max: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("grc"));
        assert!(msg.contains("12"));
        assert!(msg.contains("[1, 10]"));
    }

    #[test]
    fn test_validation_constructor() {
        let err = SoraError::validation("ua_dimension_m", "must be positive");
        assert!(err.to_string().contains("ua_dimension_m"));
        assert!(err.to_string().contains("must be positive"));
    }
}
