//! Error types for sil-pta
//!
//! Only inputs the engine cannot reason about are fatal: malformed source
//! and identifiers read before any binding. Shape clashes found during
//! unification are `Conflict`s and travel inside the analysis outcome.

use crate::config::ConfigError;
use crate::shared::models::Location;
use thiserror::Error;

/// Main error type for sil-pta operations
#[derive(Debug, Error)]
pub enum SilError {
    /// Malformed source text
    #[error("Syntax error at {at}: expected {expected}, found {found}")]
    Syntax {
        at: Location,
        expected: String,
        found: String,
    },

    /// Identifier read before any binding reaches it
    #[error("Unbound variable '{name}' at {at}")]
    UnboundVariable { name: String, at: Location },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Report serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SilError {
    /// Create a syntax error
    pub fn syntax(at: Location, expected: impl Into<String>, found: impl Into<String>) -> Self {
        SilError::Syntax {
            at,
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an unbound-variable error
    pub fn unbound(name: impl Into<String>, at: Location) -> Self {
        SilError::UnboundVariable {
            name: name.into(),
            at,
        }
    }

    /// Source position, for errors that carry one
    pub fn location(&self) -> Option<Location> {
        match self {
            SilError::Syntax { at, .. } | SilError::UnboundVariable { at, .. } => Some(*at),
            SilError::Io(_) | SilError::Config(_) | SilError::Serialization(_) => None,
        }
    }
}

/// Result type alias for sil-pta operations
pub type Result<T> = std::result::Result<T, SilError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_message() {
        let err = SilError::syntax(Location::new(3, 7), "';'", "'}'");
        assert_eq!(
            err.to_string(),
            "Syntax error at 3:7: expected ';', found '}'"
        );
        assert_eq!(err.location(), Some(Location::new(3, 7)));
    }

    #[test]
    fn test_unbound_error_message() {
        let err = SilError::unbound("q", Location::new(1, 6));
        assert_eq!(err.to_string(), "Unbound variable 'q' at 1:6");
    }
}
