/*
 * sil-pta - Steensgaard points-to analysis for SIL
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Location, Span) and the scope stack
 * - features/    : Vertical slices (parsing → points_to)
 * - config/      : Versioned YAML analysis configuration
 * - errors       : Fatal error type
 *
 * Pipeline:
 * - SIL text → tokens → scope-resolved AST
 * - AST → unification over an ECR store → shape graph + typing report
 */

// Crate-level lint configuration
#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules (parsing, points_to)
pub mod features;

/// Analysis configuration
pub mod config;

/// Error types
pub mod errors;

pub use config::{AnalysisConfig, ConflictPolicy};
pub use errors::{Result, SilError};
pub use features::parsing::{Parser, Program, SilFrontEnd, Variable};
pub use features::points_to::{AnalysisOutcome, Conflict, PointsToAnalyzer};
