//! Domain models for Points-to Analysis
//!
//! Core abstractions independent of the solver:
//! - TypeTerm / EcrId: what an equivalence class holds
//! - Conflict: non-fatal unification clashes
//! - ShapeGraph: storage shape graph over surviving representatives
//! - TypingReport: final per-variable typing
//! - AnalysisStats: counters of one run

pub mod analysis_stats;
pub mod conflict;
pub mod shape_graph;
pub mod type_term;
pub mod typing_report;

pub use analysis_stats::AnalysisStats;
pub use conflict::Conflict;
pub use shape_graph::{ShapeEdge, ShapeGraph, ShapeNode};
pub use type_term::{EcrId, TermShape, TypeTerm};
pub use typing_report::{TypingReport, VariableTyping};
