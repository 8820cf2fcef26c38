//! Parsing infrastructure: scanner, parser and the front end tying them together

pub mod lexer;
pub mod parser;

pub use lexer::{tokenize, SilScanner};
pub use parser::SilParser;

use crate::config::ParseConfig;
use crate::errors::Result;
use crate::features::parsing::domain::Program;
use crate::features::parsing::ports::Parser;
use tracing::debug;

/// Scanner + parser behind the [`Parser`] port
#[derive(Debug, Clone, Default)]
pub struct SilFrontEnd {
    config: ParseConfig,
}

impl SilFrontEnd {
    pub fn new(config: ParseConfig) -> Self {
        Self { config }
    }
}

impl Parser for SilFrontEnd {
    fn parse(&self, source: &str) -> Result<Program> {
        let tokens = tokenize(source)?;
        debug!(tokens = tokens.len(), "scanned SIL source");
        let program = SilParser::new(tokens, self.config.clone()).parse()?;
        debug!(
            statements = program.statement_count(),
            "parsed SIL program"
        );
        Ok(program)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case("sil")
    }

    fn language_name(&self) -> &'static str {
        "sil"
    }
}
