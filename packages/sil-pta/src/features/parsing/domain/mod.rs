//! Parsing domain models: tokens and the SIL AST

pub mod ast;
pub mod token;

pub use ast::{
    CompareOp, Condition, Expression, FunctionDef, Literal, OpKind, Program, Scope, Statement,
    StatementKind, Variable,
};
pub use token::{Token, TokenKind};
