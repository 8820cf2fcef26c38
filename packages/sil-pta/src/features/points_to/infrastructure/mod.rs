//! Infrastructure layer for Points-to Analysis
//!
//! - **EcrStore**: union-find arena of equivalence classes
//! - **SteensgaardSolver**: unification engine over the SIL AST
//! - **ShapeGraphBuilder**: read-only shape graph and typing report
//! - **DotRenderer**, **TextReporter**, **JsonReporter**: port adapters

pub mod dot_renderer;
pub mod reporters;
pub mod shape_graph_builder;
pub mod steensgaard_solver;
pub mod union_find;

pub use dot_renderer::DotRenderer;
pub use reporters::{JsonReporter, TextReporter};
pub use shape_graph_builder::ShapeGraphBuilder;
pub use steensgaard_solver::{SteensgaardResult, SteensgaardSolver};
pub use union_find::{EcrStore, StoreStats};
