//! Configuration system
//!
//! Defaults work without any file. A versioned YAML file (`version: 1`) can
//! override them, and `SIL_PTA_*` environment variables override that.
//!
//! # Examples
//!
//! ```rust,ignore
//! use sil_pta::config::{AnalysisConfig, ConflictPolicy};
//!
//! let config = AnalysisConfig::default().with_conflict_policy(ConflictPolicy::KeepFirst);
//! let config = AnalysisConfig::from_yaml("analysis.yaml")?.apply_env()?;
//! ```

pub mod analysis_config;
pub mod error;
pub mod io;

// Re-exports
pub use analysis_config::{
    AnalysisConfig, ConflictPolicy, ParseConfig, ReportConfig, UnificationConfig,
    DEFAULT_MAX_RENDER_DEPTH,
};
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigExportV1, ENV_CONFLICT_POLICY, ENV_IMPLICIT_ADDRESS_DECL};
