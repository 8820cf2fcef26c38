//! Steensgaard's Points-to Analysis
//!
//! Unification-based pointer analysis with O(n·α(n)) complexity.
//!
//! # Algorithm Overview
//! Every assignment merges equivalence classes instead of adding subset
//! edges:
//! - `x := y` means `x` and `y` share one class
//! - a class holding a `Ref` forces the classes it points to to merge too
//!
//! One pass over the statements in source order reaches the fixed point,
//! since every rule is a monotone merge. Function bodies and branches are
//! visited once, conditions are ignored.
//!
//! # References
//! - Steensgaard, B. "Points-to Analysis in Almost Linear Time" (POPL 1996)

use super::union_find::EcrStore;
use crate::config::UnificationConfig;
use crate::features::parsing::domain::{Expression, Program, Statement, StatementKind, Variable};
use crate::features::points_to::domain::{AnalysisStats, Conflict, EcrId, TypeTerm};
use rustc_hash::FxHashMap;
use std::time::Instant;
use tracing::{debug, info};

/// Steensgaard's analysis result
#[derive(Debug)]
pub struct SteensgaardResult {
    /// The finished store, read-only from here on
    pub store: EcrStore,

    /// Variable → its first ECR (use `store.find_readonly` for the class)
    pub variables: FxHashMap<Variable, EcrId>,

    /// Analysis statistics
    pub stats: AnalysisStats,
}

/// Steensgaard's unification engine
///
/// # Example
/// ```rust
/// use sil_pta::config::UnificationConfig;
/// use sil_pta::features::parsing::{Parser, SilFrontEnd, Variable};
/// use sil_pta::features::points_to::infrastructure::SteensgaardSolver;
///
/// let program = SilFrontEnd::default().parse("x := alloc(); y := x;").unwrap();
/// let result = SteensgaardSolver::new(&UnificationConfig::default()).solve(&program);
///
/// let x = result.variables[&Variable::global("x")];
/// let y = result.variables[&Variable::global("y")];
/// assert!(result.store.connected_readonly(x, y));
/// ```
pub struct SteensgaardSolver {
    store: EcrStore,

    /// Variable → ECR created on first sight
    variables: FxHashMap<Variable, EcrId>,

    trace_statements: bool,

    statements_processed: usize,
}

impl SteensgaardSolver {
    pub fn new(config: &UnificationConfig) -> Self {
        Self {
            store: EcrStore::new(config.conflict_policy),
            variables: FxHashMap::default(),
            trace_statements: config.trace_statements,
            statements_processed: 0,
        }
    }

    /// Unify every statement of `program` and hand back the finished store
    pub fn solve(mut self, program: &Program) -> SteensgaardResult {
        let start = Instant::now();

        for stmt in &program.statements {
            self.process_statement(stmt);
        }

        let store_stats = self.store.stats();
        let stats = AnalysisStats {
            statements_processed: self.statements_processed,
            union_operations: store_stats.union_operations,
            find_operations: store_stats.find_operations,
            ecr_count: self.store.len(),
            equivalence_classes: self.store.count(),
            conflicts: self.store.conflicts().len(),
            duration_ms: start.elapsed().as_secs_f64() * 1000.0,
        };

        info!(
            statements = stats.statements_processed,
            variables = self.variables.len(),
            classes = stats.equivalence_classes,
            conflicts = stats.conflicts,
            policy = %self.store.policy(),
            "steensgaard analysis finished"
        );

        SteensgaardResult {
            store: self.store,
            variables: self.variables,
            stats,
        }
    }

    /// Apply the unification rule of `stmt`, then of its nested statements
    pub fn process_statement(&mut self, stmt: &Statement) {
        for var in stmt.variables() {
            self.ecr_of(var);
        }

        match &stmt.kind {
            StatementKind::Declare(_)
            | StatementKind::Skip
            | StatementKind::If { .. }
            | StatementKind::While { .. } => {}

            StatementKind::Copy { lhs, rhs } => {
                let x = self.ecr_of(lhs);
                let y = self.ecr_of(rhs);
                self.store.union(x, y);
            }

            StatementKind::AddressOf { lhs, target } => self.address_of(lhs, target),

            StatementKind::Load { lhs, pointer } => {
                let cell = self.pointee(pointer);
                let x = self.ecr_of(lhs);
                self.store.union(x, cell);
            }

            StatementKind::Store { pointer, value } => {
                let cell = self.pointee(pointer);
                let v = self.operand_ecr(value);
                self.store.union(v, cell);
            }

            StatementKind::Alloc { lhs, .. } => {
                let cell = self.store.make_set(TypeTerm::Unknown);
                self.store
                    .add_alloc_site(cell, format!("alloc@{}", stmt.span.start()));
                let fresh = self.store.make_set(TypeTerm::Ref(cell));
                let x = self.ecr_of(lhs);
                self.store.union(x, fresh);
            }

            StatementKind::Constant { lhs, .. } => {
                let base = self.store.make_set(TypeTerm::Base);
                let x = self.ecr_of(lhs);
                self.store.union(x, base);
            }

            StatementKind::Op { lhs, operands, .. } => {
                let x = self.ecr_of(lhs);
                for operand in operands.iter().filter_map(Expression::as_variable) {
                    let y = self.ecr_of(operand);
                    self.store.union(x, y);
                }
            }

            StatementKind::FunctionDef(def) => {
                let params = def.params.iter().map(|p| self.ecr_of(p)).collect();
                let ret = self.ecr_of(&def.ret);
                let lambda = self.store.make_set(TypeTerm::Lambda { params, ret });
                let f = self.ecr_of(&def.name);
                self.store.union(f, lambda);
            }

            StatementKind::Call {
                result,
                callee,
                args,
            } => self.call(result.as_ref(), callee, args),
        }

        self.statements_processed += 1;
        if self.trace_statements {
            debug!(
                at = %stmt.span.start(),
                kind = stmt.kind.label(),
                classes = self.store.count(),
                conflicts = self.store.conflicts().len(),
                "unified statement"
            );
        }

        for child in stmt.children() {
            self.process_statement(child);
        }
    }

    /// ECR of `var`, created with an `Unknown` term on first sight
    pub fn ecr_of(&mut self, var: &Variable) -> EcrId {
        if let Some(&id) = self.variables.get(var) {
            return id;
        }
        let id = self.store.make_set(TypeTerm::Unknown);
        self.store.add_name(id, var.qualified_name());
        self.variables.insert(var.clone(), id);
        id
    }

    /// Literals get a fresh `Base` class
    fn operand_ecr(&mut self, operand: &Expression) -> EcrId {
        match operand {
            Expression::Variable(var) => self.ecr_of(var),
            Expression::Literal(_) => self.store.make_set(TypeTerm::Base),
        }
    }

    // x := &y
    fn address_of(&mut self, lhs: &Variable, target: &Variable) {
        let x = self.ecr_of(lhs);
        let y = self.ecr_of(target);

        let root = self.store.find(x);
        if !self.store.is_conflicted(root) && *self.store.term(root) == TypeTerm::Unknown {
            self.store.set_term(root, TypeTerm::Ref(y));
            return;
        }

        let cell = self.pointee_of(root);
        self.store.union(cell, y);
    }

    fn pointee(&mut self, pointer: &Variable) -> EcrId {
        let p = self.ecr_of(pointer);
        self.pointee_of(p)
    }

    /// Target class of a pointer class, materializing `Ref(fresh)` if needed
    ///
    /// A conflicted class is its own target.
    fn pointee_of(&mut self, ecr: EcrId) -> EcrId {
        let root = self.store.find(ecr);
        if self.store.is_conflicted(root) {
            return root;
        }

        match self.store.term(root).clone() {
            TypeTerm::Ref(cell) => cell,
            TypeTerm::Unknown => {
                let cell = self.store.make_set(TypeTerm::Unknown);
                self.store.set_term(root, TypeTerm::Ref(cell));
                cell
            }
            TypeTerm::Base | TypeTerm::Lambda { .. } => {
                let cell = self.store.make_set(TypeTerm::Unknown);
                let wanted = self.store.make_set(TypeTerm::Ref(cell));
                let merged = self.store.union(root, wanted);
                if self.store.is_conflicted(merged) {
                    return merged;
                }
                match self.store.term(merged) {
                    TypeTerm::Ref(target) => *target,
                    _ => cell,
                }
            }
        }
    }

    /// Parameter and return classes of a callee, materializing a `Lambda`
    /// of the given arity if needed
    fn signature_of(&mut self, ecr: EcrId, arity: usize) -> (Vec<EcrId>, EcrId) {
        let root = self.store.find(ecr);
        if self.store.is_conflicted(root) {
            return (vec![root; arity], root);
        }

        match self.store.term(root).clone() {
            TypeTerm::Lambda { params, ret } => (params, ret),
            TypeTerm::Unknown => {
                let (params, ret) = self.fresh_signature(arity);
                self.store.set_term(
                    root,
                    TypeTerm::Lambda {
                        params: params.clone(),
                        ret,
                    },
                );
                (params, ret)
            }
            TypeTerm::Base | TypeTerm::Ref(_) => {
                let (params, ret) = self.fresh_signature(arity);
                let wanted = self.store.make_set(TypeTerm::Lambda {
                    params: params.clone(),
                    ret,
                });
                let merged = self.store.union(root, wanted);
                if self.store.is_conflicted(merged) {
                    return (vec![merged; arity], merged);
                }
                match self.store.term(merged) {
                    TypeTerm::Lambda { params, ret } => (params.clone(), *ret),
                    _ => (params, ret),
                }
            }
        }
    }

    fn fresh_signature(&mut self, arity: usize) -> (Vec<EcrId>, EcrId) {
        let params = (0..arity)
            .map(|_| self.store.make_set(TypeTerm::Unknown))
            .collect();
        let ret = self.store.make_set(TypeTerm::Unknown);
        (params, ret)
    }

    // [z :=] f(a1, .., an)
    fn call(&mut self, result: Option<&Variable>, callee: &Variable, args: &[Expression]) {
        let f = self.ecr_of(callee);
        let (params, ret) = self.signature_of(f, args.len());

        if params.len() != args.len() {
            let root = self.store.find(f);
            let names = self.store.class_names(&[root]);
            self.store.record_conflict(Conflict::ArityMismatch {
                ecr: root,
                names,
                expected: params.len(),
                found: args.len(),
            });
        }

        for (arg, param) in args.iter().zip(params) {
            let a = self.operand_ecr(arg);
            self.store.union(a, param);
        }

        if let Some(result) = result {
            let z = self.ecr_of(result);
            self.store.union(z, ret);
        }
    }
}
