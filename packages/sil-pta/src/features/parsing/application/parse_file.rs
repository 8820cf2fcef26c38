//! Parse file use case

use crate::errors::Result;
use crate::features::parsing::domain::Program;
use crate::features::parsing::ports::Parser;
use std::path::Path;

/// Parse file use case
pub struct ParseFileUseCase<P: Parser> {
    parser: P,
}

impl<P: Parser> ParseFileUseCase<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    /// Execute the parse operation on in-memory source
    pub fn execute(&self, source: &str) -> Result<Program> {
        self.parser.parse(source)
    }

    /// Read `path` and parse it
    pub fn execute_path(&self, path: impl AsRef<Path>) -> Result<Program> {
        let source = std::fs::read_to_string(path.as_ref())?;
        self.parser.parse(&source)
    }
}
