//! Final variable typing

use super::type_term::{EcrId, TermShape};
use serde::Serialize;

/// Type of one program variable after unification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableTyping {
    /// Qualified name (`x` or `f.x`)
    pub variable: String,
    pub ecr: EcrId,
    pub shape: TermShape,
    pub conflicted: bool,
    /// Recursive rendering, e.g. `#0:ref(#1:base)`
    pub rendered: String,
}

/// Typing of every program variable, sorted by qualified name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypingReport {
    pub variables: Vec<VariableTyping>,
}

impl TypingReport {
    pub fn new(mut variables: Vec<VariableTyping>) -> Self {
        variables.sort_by(|a, b| a.variable.cmp(&b.variable));
        Self { variables }
    }

    pub fn get(&self, variable: &str) -> Option<&VariableTyping> {
        self.variables
            .binary_search_by(|typing| typing.variable.as_str().cmp(variable))
            .ok()
            .map(|idx| &self.variables[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariableTyping> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typing(name: &str, id: u32) -> VariableTyping {
        VariableTyping {
            variable: name.to_string(),
            ecr: EcrId(id),
            shape: TermShape::Base,
            conflicted: false,
            rendered: format!("#{}:base", id),
        }
    }

    #[test]
    fn test_report_is_sorted_and_searchable() {
        let report = TypingReport::new(vec![typing("z", 0), typing("f.a", 1), typing("b", 2)]);
        let names: Vec<&str> = report.iter().map(|t| t.variable.as_str()).collect();
        assert_eq!(names, vec!["b", "f.a", "z"]);
        assert_eq!(report.get("f.a").map(|t| t.ecr), Some(EcrId(1)));
        assert!(report.get("missing").is_none());
        assert_eq!(report.len(), 3);
    }
}
