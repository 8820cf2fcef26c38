//! Custom assertions for points-to outcomes

use sil_pta::features::points_to::AnalysisOutcome;

/// Assert that every listed variable shares one equivalence class
pub fn assert_same_class(outcome: &AnalysisOutcome, variables: &[&str]) {
    let classes: Vec<_> = variables
        .iter()
        .map(|v| {
            outcome
                .class_of(v)
                .unwrap_or_else(|| panic!("variable '{v}' has no class"))
        })
        .collect();
    assert!(
        classes.windows(2).all(|w| w[0] == w[1]),
        "Expected {variables:?} in one class, got {classes:?}"
    );
}

/// Assert that two variables are in different classes
pub fn assert_distinct(outcome: &AnalysisOutcome, a: &str, b: &str) {
    assert!(
        !outcome.may_alias(a, b),
        "Expected '{a}' and '{b}' in different classes, both in {:?}",
        outcome.class_of(a)
    );
}

/// Assert the analysis finished without recording conflicts
pub fn assert_no_conflicts(outcome: &AnalysisOutcome) {
    assert!(
        outcome.conflicts.is_empty(),
        "Expected no conflicts, got: {:?}",
        outcome.conflicts
    );
}

/// Assert every variable in the program has a rendered typing
pub fn assert_total_typing(outcome: &AnalysisOutcome, variables: &[&str]) {
    for v in variables {
        let typing = outcome
            .typing
            .get(v)
            .unwrap_or_else(|| panic!("variable '{v}' missing from typing report"));
        assert!(!typing.rendered.is_empty(), "empty rendering for '{v}'");
    }
    assert_eq!(outcome.typing.len(), variables.len());
}
