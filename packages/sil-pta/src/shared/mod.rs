//! Shared module - Common types and utilities
//!
//! Types shared by the parsing and points-to features.

pub mod models;
pub mod utils;

// Re-exports for convenience
pub use models::*;
pub use utils::scope_stack::ScopeStack;
