//! Parsing Feature
//!
//! Turns SIL source text into a scope-resolved AST.
//!
//! ## Structure
//! - `domain/` - Token, Program, Statement, Variable models
//! - `ports/` - Parser trait
//! - `application/` - ParseFileUseCase
//! - `infrastructure/` - SilScanner, SilParser, SilFrontEnd

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use application::ParseFileUseCase;
pub use domain::{Program, Scope, Statement, StatementKind, Variable};
pub use infrastructure::SilFrontEnd;
pub use ports::Parser;
