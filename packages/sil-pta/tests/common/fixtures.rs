//! SIL program fixtures

use sil_pta::config::AnalysisConfig;
use sil_pta::features::points_to::{AnalysisOutcome, PointsToAnalyzer};

/// `n` independent pointer pairs, then one store that merges pair `i` into pair `i + 1`
pub fn fixture_pointer_chain(n: usize) -> String {
    let mut source = String::new();
    for i in 0..n {
        source.push_str(&format!("p{i} := &x{i};\n"));
        source.push_str(&format!("r{i} := &p{i};\n"));
    }
    for i in 1..n {
        source.push_str(&format!("r{} := r{i};\n", i - 1));
    }
    source
}

/// `var p0;` then `p{i} := &p{i-1}` up to `p{n-1}`
pub fn fixture_address_chain(n: usize) -> String {
    let mut source = String::from("var p0;\n");
    for i in 1..n {
        source.push_str(&format!("p{i} := &p{};\n", i - 1));
    }
    source
}

/// `n` allocations, each in its own variable
pub fn fixture_n_allocs(n: usize) -> String {
    (0..n).map(|i| format!("a{i} := alloc();\n")).collect()
}

/// Identity function `id` called with `n` distinct arguments
pub fn fixture_identity_calls(n: usize) -> String {
    let mut source = String::from("id := fun(p) -> r { r := p; };\n");
    for i in 0..n {
        source.push_str(&format!("a{i} := alloc();\nb{i} := id(a{i});\n"));
    }
    source
}

/// Analyze with the default configuration, panicking on fatal errors
pub fn analyze(source: &str) -> AnalysisOutcome {
    PointsToAnalyzer::default()
        .analyze_source(source)
        .unwrap_or_else(|err| panic!("analysis failed: {err}\nsource:\n{source}"))
}

/// Analyze with an explicit configuration
pub fn analyze_with(config: AnalysisConfig, source: &str) -> AnalysisOutcome {
    PointsToAnalyzer::new(config)
        .analyze_source(source)
        .unwrap_or_else(|err| panic!("analysis failed: {err}\nsource:\n{source}"))
}
