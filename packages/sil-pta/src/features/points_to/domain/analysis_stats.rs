//! Run statistics

use serde::Serialize;

/// Statistics for one analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisStats {
    pub statements_processed: usize,
    pub union_operations: usize,
    pub find_operations: usize,
    /// ECR records created, including fresh cells
    pub ecr_count: usize,
    pub equivalence_classes: usize,
    pub conflicts: usize,
    pub duration_ms: f64,
}
