//! Property-based tests for the ECR store and the analysis
//!
//! Invariants that should hold for ALL inputs:
//! - Idempotence: find(find(x)) == find(x)
//! - Partition: store connectivity matches a naive reference partition
//! - Monotonicity: later unions and statements never split a class

use proptest::prelude::*;
use sil_pta::config::ConflictPolicy;
use sil_pta::features::points_to::{EcrId, EcrStore, PointsToAnalyzer, TypeTerm};

const POOL: usize = 6;

/// Naive reference partition: one label per element, relabel on union
fn reference_partition(n: usize, unions: &[(usize, usize)]) -> Vec<usize> {
    let mut label: Vec<usize> = (0..n).collect();
    for &(a, b) in unions {
        let (from, to) = (label[b], label[a]);
        for l in label.iter_mut() {
            if *l == from {
                *l = to;
            }
        }
    }
    label
}

fn unions_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2usize..40).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..60)))
}

fn statement_strategy() -> impl Strategy<Value = String> {
    (0..POOL, 0..POOL, 0..6u8).prop_map(|(i, j, kind)| match kind {
        0 => format!("v{i} := v{j};"),
        1 => format!("v{i} := &v{j};"),
        2 => format!("v{i} := *v{j};"),
        3 => format!("*v{i} := v{j};"),
        4 => format!("v{i} := alloc();"),
        _ => format!("v{i} := {j};"),
    })
}

fn program(statements: &[String]) -> String {
    let vars: Vec<String> = (0..POOL).map(|i| format!("v{i}")).collect();
    format!("var {};\n{}", vars.join(", "), statements.join("\n"))
}

proptest! {
    #[test]
    fn prop_find_is_idempotent((n, unions) in unions_strategy()) {
        let mut store = EcrStore::new(ConflictPolicy::Downgrade);
        let ids: Vec<EcrId> = (0..n).map(|_| store.make_set(TypeTerm::Unknown)).collect();
        for &(a, b) in &unions {
            store.union(ids[a], ids[b]);
        }

        for &id in &ids {
            let root = store.find(id);
            prop_assert_eq!(store.find(root), root);
            prop_assert_eq!(store.find_readonly(id), root);
        }
    }

    #[test]
    fn prop_partition_matches_reference((n, unions) in unions_strategy()) {
        let mut store = EcrStore::new(ConflictPolicy::Downgrade);
        let ids: Vec<EcrId> = (0..n).map(|_| store.make_set(TypeTerm::Unknown)).collect();
        for &(a, b) in &unions {
            store.union(ids[a], ids[b]);
        }
        let label = reference_partition(n, &unions);

        for a in 0..n {
            for b in 0..n {
                prop_assert_eq!(
                    store.connected_readonly(ids[a], ids[b]),
                    label[a] == label[b]
                );
            }
        }

        let mut distinct = label.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(store.count(), distinct.len());
        prop_assert_eq!(store.roots().len(), distinct.len());
        prop_assert!(store.conflicts().is_empty());
    }

    #[test]
    fn prop_unions_are_monotone((n, unions) in unions_strategy()) {
        let mut store = EcrStore::new(ConflictPolicy::Downgrade);
        let ids: Vec<EcrId> = (0..n).map(|_| store.make_set(TypeTerm::Unknown)).collect();

        let mut joined: Vec<(usize, usize)> = Vec::new();
        for &(a, b) in &unions {
            store.union(ids[a], ids[b]);
            joined.push((a, b));
            for &(x, y) in &joined {
                prop_assert!(store.connected_readonly(ids[x], ids[y]));
            }
        }
    }

    #[test]
    fn prop_analysis_typing_is_total_and_aliasing_is_an_equivalence(
        statements in prop::collection::vec(statement_strategy(), 0..25)
    ) {
        let source = program(&statements);
        let outcome = PointsToAnalyzer::default().analyze_source(&source).unwrap();

        prop_assert_eq!(outcome.typing.len(), POOL);
        for i in 0..POOL {
            let a = format!("v{i}");
            prop_assert!(outcome.typing.get(&a).is_some());
            prop_assert!(outcome.may_alias(&a, &a));
            for j in 0..POOL {
                let b = format!("v{j}");
                prop_assert_eq!(outcome.may_alias(&a, &b), outcome.may_alias(&b, &a));
                for k in 0..POOL {
                    let c = format!("v{k}");
                    if outcome.may_alias(&a, &b) && outcome.may_alias(&b, &c) {
                        prop_assert!(outcome.may_alias(&a, &c));
                    }
                }
            }
        }
    }

    #[test]
    fn prop_more_statements_never_split_classes(
        statements in prop::collection::vec(statement_strategy(), 1..25)
    ) {
        let analyzer = PointsToAnalyzer::default();
        let half = statements.len() / 2;
        let prefix = analyzer.analyze_source(&program(&statements[..half])).unwrap();
        let full = analyzer.analyze_source(&program(&statements)).unwrap();

        for i in 0..POOL {
            for j in 0..POOL {
                let (a, b) = (format!("v{i}"), format!("v{j}"));
                if prefix.may_alias(&a, &b) {
                    prop_assert!(full.may_alias(&a, &b));
                }
            }
        }
    }
}
