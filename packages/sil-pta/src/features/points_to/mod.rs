//! # Steensgaard Points-to Analysis for SIL
//!
//! Flow-insensitive, context-insensitive, unification-based pointer analysis:
//! - **EcrStore**: union-find arena of equivalence classes carrying type terms
//! - **SteensgaardSolver**: applies one unification rule per statement
//! - **ShapeGraphBuilder**: storage shape graph and per-variable typing
//!
//! ## Academic References
//! - Steensgaard, B. "Points-to Analysis in Almost Linear Time" (POPL 1996)
//! - Tarjan, R. E. "Efficiency of a Good But Not Linear Set Union Algorithm" (1975)
//!
//! ## Usage
//! ```rust
//! use sil_pta::features::points_to::PointsToAnalyzer;
//!
//! let outcome = PointsToAnalyzer::default()
//!     .analyze_source("x := alloc(); y := &x; z := *y;")
//!     .unwrap();
//! assert!(outcome.may_alias("z", "x"));
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports for public API
pub use application::{AnalysisOutcome, PointsToAnalyzer};
pub use domain::{
    AnalysisStats, Conflict, EcrId, ShapeEdge, ShapeGraph, ShapeNode, TermShape, TypeTerm,
    TypingReport, VariableTyping,
};
pub use ports::{ReportFormat, ReporterFactory, ShapeGraphRenderer, TypingReporter};
// Re-export infrastructure (internal use - prefer application layer)
#[doc(hidden)]
pub use infrastructure::steensgaard_solver::SteensgaardSolver;
#[doc(hidden)]
pub use infrastructure::union_find::EcrStore;
pub use infrastructure::{DotRenderer, JsonReporter, TextReporter};
