//! Type terms carried by equivalence classes
//!
//! A term describes what the locations of a class hold: nothing known yet,
//! a non-pointer value, a pointer to another class, or a function.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of an ECR record in the store arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EcrId(pub u32);

impl EcrId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EcrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Payload of an equivalence class
///
/// `Ref` and `Lambda` point at other classes by handle, so cycles through
/// the store are legal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TypeTerm {
    #[default]
    Unknown,
    Base,
    Ref(EcrId),
    Lambda { params: Vec<EcrId>, ret: EcrId },
}

impl TypeTerm {
    pub fn shape(&self) -> TermShape {
        match self {
            TypeTerm::Unknown => TermShape::Unknown,
            TypeTerm::Base => TermShape::Base,
            TypeTerm::Ref(_) => TermShape::Ref,
            TypeTerm::Lambda { .. } => TermShape::Lambda,
        }
    }

    /// Classes this term refers to, in parameter order then return
    pub fn targets(&self) -> Vec<EcrId> {
        match self {
            TypeTerm::Unknown | TypeTerm::Base => Vec::new(),
            TypeTerm::Ref(target) => vec![*target],
            TypeTerm::Lambda { params, ret } => {
                let mut targets = params.clone();
                targets.push(*ret);
                targets
            }
        }
    }
}

/// Payload-free tag of a [`TypeTerm`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermShape {
    Unknown,
    Base,
    Ref,
    Lambda,
}

impl TermShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            TermShape::Unknown => "unknown",
            TermShape::Base => "base",
            TermShape::Ref => "ref",
            TermShape::Lambda => "lambda",
        }
    }
}

impl fmt::Display for TermShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
