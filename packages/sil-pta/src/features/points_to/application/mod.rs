//! Application layer for Points-to Analysis
//!
//! - **PointsToAnalyzer**: parse + unify + build, one fresh store per run
//! - **AnalysisOutcome**: typing, shape graph, conflicts and alias queries

pub mod analyzer;

pub use analyzer::{AnalysisOutcome, PointsToAnalyzer};
