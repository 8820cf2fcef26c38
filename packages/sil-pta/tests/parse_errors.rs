//! Fatal front-end errors surface through the analyzer unchanged

use sil_pta::config::AnalysisConfig;
use sil_pta::errors::SilError;
use sil_pta::features::points_to::PointsToAnalyzer;
use sil_pta::shared::models::Location;

fn analyze_err(source: &str) -> SilError {
    PointsToAnalyzer::default()
        .analyze_source(source)
        .expect_err("source should be rejected")
}

#[test]
fn test_unbound_read_reports_location() {
    let err = analyze_err("x := alloc();\ny := z;");
    match &err {
        SilError::UnboundVariable { name, at } => {
            assert_eq!(name, "z");
            assert_eq!(*at, Location::new(2, 6));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.location(), Some(Location::new(2, 6)));
}

#[test]
fn test_missing_semicolon() {
    let err = analyze_err("x := alloc()\ny := x;");
    match err {
        SilError::Syntax { expected, .. } => assert_eq!(expected, "';'"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unknown_character() {
    assert!(matches!(analyze_err("x := @;"), SilError::Syntax { .. }));
}

#[test]
fn test_unterminated_block() {
    assert!(matches!(
        analyze_err("while (1 < 2) do { skip;"),
        SilError::Syntax { .. }
    ));
}

#[test]
fn test_function_locals_do_not_leak() {
    assert!(matches!(
        analyze_err("f := fun(p) -> r { t := p; r := t; }; y := t;"),
        SilError::UnboundVariable { .. }
    ));
}

#[test]
fn test_nested_function_rejected() {
    assert!(matches!(
        analyze_err("f := fun(a) -> r { g := fun(b) -> s { s := b; }; r := a; };"),
        SilError::Syntax { .. }
    ));
}

#[test]
fn test_strict_address_of() {
    let config = AnalysisConfig::default().with_implicit_address_decl(false);
    let err = PointsToAnalyzer::new(config)
        .analyze_source("p := &x;")
        .unwrap_err();
    assert!(matches!(err, SilError::UnboundVariable { ref name, .. } if name == "x"));

    assert!(PointsToAnalyzer::default().analyze_source("p := &x;").is_ok());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = PointsToAnalyzer::default()
        .analyze_path("/no/such/program.sil")
        .unwrap_err();
    assert!(matches!(err, SilError::Io(_)));
    assert_eq!(err.location(), None);
}

#[test]
fn test_error_display_names_position() {
    let err = analyze_err("x := y;");
    assert_eq!(err.to_string(), "Unbound variable 'y' at 1:6");
}
