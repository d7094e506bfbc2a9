//! # Reason Codes
//!
//! Closed vocabulary for terminal and noteworthy pipeline outcomes, so
//! callers branch on a code instead of string-matching free-text notes.

use serde::{Deserialize, Serialize};

/// Why a calculation stopped early or resolved through a special path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    /// The (UA, exposure) pair landed in a grey iGRC cell.
    ScopeGreyCell,
    /// The final GRC left the methodology's representable range.
    ScopeHighGrc,
    /// SORA 2.5 high-GRC path: the operation resolved through the
    /// unconditional SAIL VI shortcut.
    ScopeSailVi,
    /// SORA 2.0 Category C: GRC above 7, SAIL and OSO not computed.
    CategoryC,
}

impl ReasonCode {
    /// Returns the wire identifier for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ScopeGreyCell => "SCOPE_GREY_CELL",
            Self::ScopeHighGrc => "SCOPE_HIGH_GRC",
            Self::ScopeSailVi => "SCOPE_SAIL_VI",
            Self::CategoryC => "CATEGORY_C",
        }
    }

    /// Whether this code marks a terminal outcome (later stages skipped).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::ScopeGreyCell | Self::ScopeHighGrc | Self::CategoryC)
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&ReasonCode::ScopeHighGrc).unwrap(),
            "\"SCOPE_HIGH_GRC\""
        );
        assert_eq!(
            serde_json::to_string(&ReasonCode::CategoryC).unwrap(),
            "\"CATEGORY_C\""
        );
    }

    #[test]
    fn test_sail_vi_shortcut_is_not_terminal() {
        assert!(!ReasonCode::ScopeSailVi.is_terminal());
        assert!(ReasonCode::CategoryC.is_terminal());
        assert!(ReasonCode::ScopeGreyCell.is_terminal());
    }
}
