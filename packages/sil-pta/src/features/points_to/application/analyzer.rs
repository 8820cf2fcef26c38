//! High-Level Points-to Analyzer
//!
//! Runs the whole pipeline for one SIL program: parse, unify, then build the
//! shape graph and typing report from the finished store. Each call owns a
//! fresh store, so analyses never share state.
//!
//! # Usage
//! ```rust
//! use sil_pta::config::AnalysisConfig;
//! use sil_pta::features::points_to::PointsToAnalyzer;
//!
//! let analyzer = PointsToAnalyzer::new(AnalysisConfig::default());
//! let outcome = analyzer.analyze_source("x := alloc(); y := x;").unwrap();
//!
//! assert!(outcome.may_alias("x", "y"));
//! assert!(outcome.conflicts.is_empty());
//! ```

use crate::config::AnalysisConfig;
use crate::errors::Result;
use crate::features::parsing::application::ParseFileUseCase;
use crate::features::parsing::domain::Program;
use crate::features::parsing::infrastructure::SilFrontEnd;
use crate::features::points_to::domain::{
    AnalysisStats, Conflict, EcrId, ShapeGraph, TypingReport,
};
use crate::features::points_to::infrastructure::{ShapeGraphBuilder, SteensgaardSolver};
use crate::features::points_to::ports::{ShapeGraphRenderer, TypingReporter};
use rustc_hash::FxHashMap;
use std::path::Path;
use tracing::info;

/// Everything one analysis run produces
#[derive(Debug)]
pub struct AnalysisOutcome {
    /// Typing of every program variable, sorted by qualified name
    pub typing: TypingReport,

    /// Storage shape graph
    pub graph: ShapeGraph,

    /// Non-fatal conflicts in the order they were found
    pub conflicts: Vec<Conflict>,

    /// Statistics
    pub stats: AnalysisStats,

    /// Qualified variable name → final representative
    classes: FxHashMap<String, EcrId>,
}

impl AnalysisOutcome {
    /// Final representative of a variable (`x` or `f.x`)
    pub fn class_of(&self, variable: &str) -> Option<EcrId> {
        self.classes.get(variable).copied()
    }

    /// Whether two variables share an equivalence class
    ///
    /// Unknown names never alias anything.
    pub fn may_alias(&self, a: &str, b: &str) -> bool {
        match (self.class_of(a), self.class_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// All variables in the class of `variable`, sorted
    pub fn aliases_of(&self, variable: &str) -> Vec<&str> {
        let Some(class) = self.class_of(variable) else {
            return Vec::new();
        };
        self.typing
            .iter()
            .filter(|t| t.ecr == class)
            .map(|t| t.variable.as_str())
            .collect()
    }

    pub fn is_conflicted(&self, variable: &str) -> bool {
        self.typing
            .get(variable)
            .map_or(false, |typing| typing.conflicted)
    }

    pub fn report(&self, reporter: &dyn TypingReporter) -> Result<String> {
        reporter.report(&self.typing, &self.conflicts, &self.stats)
    }

    pub fn render(&self, renderer: &dyn ShapeGraphRenderer) -> String {
        renderer.render(&self.graph)
    }
}

/// High-level points-to analyzer
pub struct PointsToAnalyzer {
    config: AnalysisConfig,
    parse_use_case: ParseFileUseCase<SilFrontEnd>,
}

impl Default for PointsToAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl PointsToAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        let front_end = SilFrontEnd::new(config.parse.clone());
        Self {
            config,
            parse_use_case: ParseFileUseCase::new(front_end),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Parse and analyze SIL source text
    pub fn analyze_source(&self, source: &str) -> Result<AnalysisOutcome> {
        let program = self.parse_use_case.execute(source)?;
        Ok(self.analyze_program(&program))
    }

    /// Read, parse and analyze a SIL file
    pub fn analyze_path(&self, path: impl AsRef<Path>) -> Result<AnalysisOutcome> {
        let program = self.parse_use_case.execute_path(path)?;
        Ok(self.analyze_program(&program))
    }

    /// Analyze an already parsed program
    pub fn analyze_program(&self, program: &Program) -> AnalysisOutcome {
        info!(
            statements = program.statement_count(),
            config = %self.config.describe(),
            "starting points-to analysis"
        );

        let result = SteensgaardSolver::new(&self.config.unification).solve(program);

        let builder = ShapeGraphBuilder::new(&result.store, &result.variables)
            .with_max_depth(self.config.report.max_render_depth);
        let typing = builder.typing_report();
        let graph = builder.build_graph();

        let classes = typing
            .iter()
            .map(|t| (t.variable.clone(), t.ecr))
            .collect();

        AnalysisOutcome {
            typing,
            graph,
            conflicts: result.store.conflicts().to_vec(),
            stats: result.stats,
            classes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConflictPolicy;
    use crate::errors::SilError;
    use crate::features::points_to::infrastructure::{DotRenderer, TextReporter};

    #[test]
    fn test_alias_queries() {
        let outcome = PointsToAnalyzer::default()
            .analyze_source("x := alloc(); y := x; z := alloc();")
            .unwrap();

        assert!(outcome.may_alias("x", "y"));
        assert!(outcome.may_alias("x", "x"));
        assert!(!outcome.may_alias("x", "z"));
        assert!(!outcome.may_alias("x", "nope"));
        assert_eq!(outcome.aliases_of("y"), vec!["x", "y"]);
        assert!(outcome.aliases_of("nope").is_empty());
    }

    #[test]
    fn test_outcome_carries_graph_and_stats() {
        let outcome = PointsToAnalyzer::default()
            .analyze_source("p := &x; q := &y; r := &p; s := &q; r := s;")
            .unwrap();

        assert!(outcome.may_alias("p", "q"));
        assert!(outcome.may_alias("x", "y"));
        assert_eq!(outcome.stats.statements_processed, 5);
        assert_eq!(outcome.typing.len(), 6);
        assert!(outcome.graph.node_count() >= 3);

        let dot = outcome.render(&DotRenderer);
        assert!(dot.contains("digraph"));
        let text = outcome.report(&TextReporter).unwrap();
        assert!(text.contains("statements: 5"));
    }

    #[test]
    fn test_policy_comes_from_config() {
        let analyzer = PointsToAnalyzer::new(
            AnalysisConfig::default().with_conflict_policy(ConflictPolicy::KeepFirst),
        );
        let outcome = analyzer
            .analyze_source("x := 5; y := alloc(); x := y;")
            .unwrap();
        assert_eq!(outcome.conflicts.len(), 1);
        assert!(!outcome.is_conflicted("x"));
    }

    #[test]
    fn test_parse_config_is_applied() {
        let analyzer =
            PointsToAnalyzer::new(AnalysisConfig::default().with_implicit_address_decl(false));
        let err = analyzer.analyze_source("p := &x;").unwrap_err();
        assert!(matches!(err, SilError::UnboundVariable { .. }));
    }

    #[test]
    fn test_runs_do_not_share_state() {
        let analyzer = PointsToAnalyzer::default();
        let first = analyzer.analyze_source("x := alloc(); y := x;").unwrap();
        let second = analyzer.analyze_source("x := alloc(); y := alloc();").unwrap();
        assert!(first.may_alias("x", "y"));
        assert!(!second.may_alias("x", "y"));
    }
}
