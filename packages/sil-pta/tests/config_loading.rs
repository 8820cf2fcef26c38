//! Configuration files and overrides driving the analyzer

use sil_pta::config::{AnalysisConfig, ConfigError, ConflictPolicy};
use sil_pta::features::points_to::{PointsToAnalyzer, TermShape};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_yaml(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_yaml_file_drives_analysis() {
    let file = write_yaml(
        r#"
version: 1
parse:
  implicit_address_decl: true
unification:
  conflict_policy: keep_first
"#,
    );
    let config = AnalysisConfig::from_yaml(file.path()).unwrap();
    assert_eq!(config.unification.conflict_policy, ConflictPolicy::KeepFirst);

    let outcome = PointsToAnalyzer::new(config)
        .analyze_source("x := 5; y := alloc(); x := y;")
        .unwrap();
    assert_eq!(outcome.typing.get("x").unwrap().shape, TermShape::Base);
}

#[test]
fn test_missing_version_rejected() {
    let err = AnalysisConfig::from_yaml_str("unification:\n  conflict_policy: downgrade\n")
        .unwrap_err();
    assert!(matches!(err, ConfigError::MissingVersion));
}

#[test]
fn test_unknown_section_rejected() {
    let err = AnalysisConfig::from_yaml_str("version: 1\nanalysis:\n  foo: 1\n").unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
}

#[test]
fn test_overrides_win_over_file() {
    let file = write_yaml("version: 1\nunification:\n  conflict_policy: keep_first\n");
    let config = AnalysisConfig::from_yaml(file.path())
        .unwrap()
        .apply_overrides(|var| match var {
            "SIL_PTA_CONFLICT_POLICY" => Some("downgrade".to_string()),
            "SIL_PTA_IMPLICIT_ADDRESS_DECL" => Some("off".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(config.unification.conflict_policy, ConflictPolicy::Downgrade);
    assert!(!config.parse.implicit_address_decl);
}

#[test]
fn test_bad_policy_suggests_name() {
    let err = ConflictPolicy::from_str("keep_frist").unwrap_err();
    assert!(err.to_string().contains("keep_first"));
}

#[test]
fn test_written_config_reloads() {
    let config = AnalysisConfig::default()
        .with_conflict_policy(ConflictPolicy::KeepFirst)
        .with_implicit_address_decl(false);
    let file = write_yaml(&config.to_yaml().unwrap());

    assert_eq!(AnalysisConfig::from_yaml(file.path()).unwrap(), config);
}

#[test]
fn test_report_section_limits_rendering() {
    let file = write_yaml("version: 1\nreport:\n  max_render_depth: 1\n");
    let config = AnalysisConfig::from_yaml(file.path()).unwrap();
    assert_eq!(config.report.max_render_depth, 1);

    let outcome = PointsToAnalyzer::new(config)
        .analyze_source("p := &x; r := &p;")
        .unwrap();
    let r = outcome.typing.get("r").unwrap();
    let p = outcome.typing.get("p").unwrap();
    assert_eq!(r.rendered, format!("{}:ref({}:..)", r.ecr, p.ecr));
}
