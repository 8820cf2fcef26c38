//! Analysis configuration
//!
//! Two sections: `parse` (scope-binding knobs for the SIL front end) and
//! `unification` (how the engine reacts to shape clashes).

use super::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the engine does with a class whose two payloads cannot be joined
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Term becomes `Unknown` with a conflict marker; the class absorbs
    /// everything joined with it afterwards.
    #[default]
    Downgrade,

    /// Keep the first side's term and skip the structural merge.
    #[value(alias = "keep_first")]
    KeepFirst,
}

impl ConflictPolicy {
    const NAMES: [&'static str; 2] = ["downgrade", "keep_first"];

    /// Parse policy from string (`keep-first` is accepted as well)
    pub fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "downgrade" => Ok(Self::Downgrade),
            "keep_first" => Ok(Self::KeepFirst),
            _ => Err(ConfigError::unknown_value_with_suggestion(
                "conflict_policy",
                s,
                &Self::NAMES,
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Downgrade => "downgrade",
            Self::KeepFirst => "keep_first",
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Front-end options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ParseConfig {
    /// `x := &y` declares `y` when nothing binds it yet
    pub implicit_address_decl: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            implicit_address_decl: true,
        }
    }
}

/// Unification engine options
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct UnificationConfig {
    pub conflict_policy: ConflictPolicy,

    /// Log every statement and the class sizes it touched at `debug` level
    pub trace_statements: bool,
}

/// Default nesting limit of rendered type terms
pub const DEFAULT_MAX_RENDER_DEPTH: usize = 64;

/// Typing report options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ReportConfig {
    /// Terms nested deeper than this render as `#id:..`
    pub max_render_depth: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_render_depth: DEFAULT_MAX_RENDER_DEPTH,
        }
    }
}

/// Complete analysis configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AnalysisConfig {
    pub parse: ParseConfig,
    pub unification: UnificationConfig,
    pub report: ReportConfig,
}

impl AnalysisConfig {
    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.unification.conflict_policy = policy;
        self
    }

    pub fn with_implicit_address_decl(mut self, enabled: bool) -> Self {
        self.parse.implicit_address_decl = enabled;
        self
    }

    pub fn with_trace_statements(mut self, enabled: bool) -> Self {
        self.unification.trace_statements = enabled;
        self
    }

    pub fn with_max_render_depth(mut self, depth: usize) -> Self {
        self.report.max_render_depth = depth;
        self
    }

    /// One-line human-readable summary
    pub fn describe(&self) -> String {
        format!(
            "conflict_policy={}, implicit_address_decl={}, trace_statements={}, max_render_depth={}",
            self.unification.conflict_policy,
            self.parse.implicit_address_decl,
            self.unification.trace_statements,
            self.report.max_render_depth
        )
    }
}
