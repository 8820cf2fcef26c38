//! Configuration I/O (YAML/Env loading)
//!
//! YAML schema v1:
//!
//! ```yaml
//! version: 1
//! parse:
//!   implicit_address_decl: true
//! unification:
//!   conflict_policy: downgrade   # or keep_first
//!   trace_statements: false
//! report:
//!   max_render_depth: 64
//! ```

use super::analysis_config::{
    AnalysisConfig, ConflictPolicy, ParseConfig, ReportConfig, UnificationConfig,
};
use super::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment override for the conflict policy
pub const ENV_CONFLICT_POLICY: &str = "SIL_PTA_CONFLICT_POLICY";

/// Environment override for implicit `&y` declarations
pub const ENV_IMPLICIT_ADDRESS_DECL: &str = "SIL_PTA_IMPLICIT_ADDRESS_DECL";

const SUPPORTED_VERSIONS: [u32; 1] = [1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse: Option<ParseConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unification: Option<UnificationConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportConfig>,
}

impl AnalysisConfig {
    /// Load from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        match export.version {
            None => return Err(ConfigError::MissingVersion),
            Some(found) if !SUPPORTED_VERSIONS.contains(&found) => {
                return Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: SUPPORTED_VERSIONS.to_vec(),
                })
            }
            Some(_) => {}
        }

        Ok(Self {
            parse: export.parse.unwrap_or_default(),
            unification: export.unification.unwrap_or_default(),
            report: export.report.unwrap_or_default(),
        })
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            parse: Some(self.parse.clone()),
            unification: Some(self.unification.clone()),
            report: Some(self.report.clone()),
        };
        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }

    /// Apply `SIL_PTA_*` overrides from the process environment
    pub fn apply_env(self) -> ConfigResult<Self> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from any key lookup (the environment in production)
    pub fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ConfigResult<Self> {
        if let Some(value) = lookup(ENV_CONFLICT_POLICY) {
            self.unification.conflict_policy = ConflictPolicy::from_str(&value)?;
        }
        if let Some(value) = lookup(ENV_IMPLICIT_ADDRESS_DECL) {
            self.parse.implicit_address_decl = match value.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        var: ENV_IMPLICIT_ADDRESS_DECL.to_string(),
                        value,
                        reason: "expected a boolean".to_string(),
                    })
                }
            };
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_roundtrip() {
        let config = AnalysisConfig::default().with_conflict_policy(ConflictPolicy::KeepFirst);

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("conflict_policy: keep_first"));

        let recovered = AnalysisConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(recovered, config);
    }

    #[test]
    fn test_yaml_loading() {
        let yaml_content = r#"
version: 1
unification:
  conflict_policy: keep_first
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml_content.as_bytes()).unwrap();

        let config = AnalysisConfig::from_yaml(file.path()).unwrap();
        assert_eq!(config.unification.conflict_policy, ConflictPolicy::KeepFirst);
        assert!(config.parse.implicit_address_decl);
    }

    #[test]
    fn test_missing_version() {
        let err = AnalysisConfig::from_yaml_str("parse:\n  implicit_address_decl: false\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingVersion));
    }

    #[test]
    fn test_unsupported_version() {
        let err = AnalysisConfig::from_yaml_str("version: 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedVersion { found: 2, .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = AnalysisConfig::from_yaml_str("version: 1\nunification:\n  depth: 3\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_overrides() {
        let config = AnalysisConfig::default()
            .apply_overrides(|var| match var {
                ENV_CONFLICT_POLICY => Some("keep-first".to_string()),
                ENV_IMPLICIT_ADDRESS_DECL => Some("off".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.unification.conflict_policy, ConflictPolicy::KeepFirst);
        assert!(!config.parse.implicit_address_decl);

        let err = AnalysisConfig::default()
            .apply_overrides(|var| {
                (var == ENV_IMPLICIT_ADDRESS_DECL).then(|| "maybe".to_string())
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
    }
}
