//! Ports (Interfaces) for Points-to Analysis
//!
//! Presentation seams around the analysis core:
//! - **ShapeGraphRenderer**: turns the storage shape graph into a picture format
//! - **TypingReporter**: turns the typing report, conflicts and statistics into text
//! - **ReporterFactory**: runtime selection by [`ReportFormat`]

use crate::config::{ConfigError, ConfigResult};
use crate::errors::Result;
use crate::features::points_to::domain::{AnalysisStats, Conflict, ShapeGraph, TypingReport};
use crate::features::points_to::infrastructure::{JsonReporter, TextReporter};
use std::fmt;

/// Shape graph renderer trait
pub trait ShapeGraphRenderer: Send + Sync {
    /// Render the whole graph as one document
    fn render(&self, graph: &ShapeGraph) -> String;

    /// Short name of the output format (`dot`, ...)
    fn format_name(&self) -> &'static str;
}

/// Typing reporter trait
pub trait TypingReporter: Send + Sync {
    fn report(
        &self,
        typing: &TypingReport,
        conflicts: &[Conflict],
        stats: &AnalysisStats,
    ) -> Result<String>;
}

/// Output format of a typing report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    const NAMES: [&'static str; 2] = ["text", "json"];

    pub fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::unknown_value_with_suggestion(
                "format",
                s,
                &Self::NAMES,
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Factory for creating reporters
pub struct ReporterFactory;

impl ReporterFactory {
    /// Create reporter as trait object (runtime polymorphism)
    pub fn create_boxed(format: ReportFormat) -> Box<dyn TypingReporter> {
        match format {
            ReportFormat::Text => Box::new(TextReporter),
            ReportFormat::Json => Box::new(JsonReporter::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_format_parsing() {
        assert_eq!(ReportFormat::from_str("JSON").unwrap(), ReportFormat::Json);
        assert_eq!(ReportFormat::from_str("text").unwrap(), ReportFormat::Text);

        let err = ReportFormat::from_str("jsno").unwrap_err();
        assert!(err.to_string().contains("json"));
    }

    #[test]
    fn test_factory_produces_requested_format() {
        let reporter = ReporterFactory::create_boxed(ReportFormat::Json);
        let out = reporter
            .report(&TypingReport::default(), &[], &AnalysisStats::default())
            .unwrap();
        assert!(out.trim_start().starts_with('{'));
    }
}
