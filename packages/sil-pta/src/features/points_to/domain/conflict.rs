//! Non-fatal unification conflicts
//!
//! Recorded by the store whenever two payloads cannot be joined. The run
//! carries on under the configured policy and the conflicts are returned
//! with the outcome.

use super::type_term::{EcrId, TermShape};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conflict {
    /// Two different non-`Unknown` shapes met in one class
    #[error("type conflict at {ecr} {{{}}}: {left} vs {right}", .names.join(", "))]
    TypeConflict {
        ecr: EcrId,
        names: Vec<String>,
        left: TermShape,
        right: TermShape,
    },

    /// Function shapes with different parameter counts
    #[error(
        "arity mismatch at {ecr} {{{}}}: expected {expected} parameters, found {found}",
        .names.join(", ")
    )]
    ArityMismatch {
        ecr: EcrId,
        names: Vec<String>,
        expected: usize,
        found: usize,
    },
}

impl Conflict {
    pub fn ecr(&self) -> EcrId {
        match self {
            Conflict::TypeConflict { ecr, .. } | Conflict::ArityMismatch { ecr, .. } => *ecr,
        }
    }

    /// Variable names of the class at the time of the clash
    pub fn names(&self) -> &[String] {
        match self {
            Conflict::TypeConflict { names, .. } | Conflict::ArityMismatch { names, .. } => names,
        }
    }

    pub fn involves(&self, name: &str) -> bool {
        self.names().iter().any(|n| n == name)
    }
}
