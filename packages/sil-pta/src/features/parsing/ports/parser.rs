//! Parser port (interface)
//!
//! Defines the contract for turning SIL source text into a resolved AST.

use crate::errors::Result;
use crate::features::parsing::domain::Program;

/// Parser trait - abstraction over the SIL front end
pub trait Parser: Send + Sync {
    /// Parse source text into a scope-resolved program
    fn parse(&self, source: &str) -> Result<Program>;

    /// Check if this parser handles files with the given extension
    fn supports_extension(&self, ext: &str) -> bool;

    /// Get supported language name
    fn language_name(&self) -> &'static str;
}
