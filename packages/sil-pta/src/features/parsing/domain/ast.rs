//! SIL abstract syntax
//!
//! Every identifier is resolved to a [`Variable`] carrying its scope while
//! parsing, so later passes never deal with raw names. Nothing here is
//! mutated after the parser returns.

use crate::shared::models::Span;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Where a variable lives
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scope {
    Global,
    /// Local to the named top-level function
    Local(String),
}

/// A scope-resolved program variable
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub scope: Scope,
}

impl Variable {
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: Scope::Global,
        }
    }

    pub fn local(function: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: Scope::Local(function.into()),
        }
    }

    /// `x` for globals, `f.x` for locals of `f`
    pub fn qualified_name(&self) -> String {
        match &self.scope {
            Scope::Global => self.name.clone(),
            Scope::Local(function) => format!("{}.{}", function, self.name),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

/// Numeric literal, kept as written
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal(pub String);

/// Operand of a statement: a variable or a literal, never a nested tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expression {
    Variable(Variable),
    Literal(Literal),
}

impl Expression {
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Expression::Variable(var) => Some(var),
            Expression::Literal(_) => None,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Variable(var) => write!(f, "{}", var),
            Expression::Literal(lit) => f.write_str(&lit.0),
        }
    }
}

/// Primitive operators of `x := op(...)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    Add,
    Negate,
    Multiply,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OpKind::Add => "add",
            OpKind::Negate => "negate",
            OpKind::Multiply => "multiply",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    Lt,
    LtEq,
    Eq,
    NotEq,
}

/// Branch/loop condition; checked for syntax and scope, ignored by the analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    Compare {
        op: CompareOp,
        left: Expression,
        right: Expression,
    },
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
    Not(Box<Condition>),
}

/// `name := fun(params) -> ret { body }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: Variable,
    pub params: Vec<Variable>,
    pub ret: Variable,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementKind {
    /// `var x, y;`
    Declare(Vec<Variable>),
    /// `x := y;`
    Copy { lhs: Variable, rhs: Variable },
    /// `x := &y;`
    AddressOf { lhs: Variable, target: Variable },
    /// `x := *y;`
    Load { lhs: Variable, pointer: Variable },
    /// `*x := y;`
    Store { pointer: Variable, value: Expression },
    /// `x := alloc();` / `x := allocate(n);`
    Alloc {
        lhs: Variable,
        size: Option<Expression>,
    },
    /// `x := 5;`
    Constant { lhs: Variable, value: Literal },
    /// `x := add(y, 1);`
    Op {
        lhs: Variable,
        op: OpKind,
        operands: Vec<Expression>,
    },
    FunctionDef(FunctionDef),
    /// `z := f(a, b);` or `f(a, b);`
    Call {
        result: Option<Variable>,
        callee: Variable,
        args: Vec<Expression>,
    },
    If {
        condition: Condition,
        then_branch: Vec<Statement>,
        else_branch: Vec<Statement>,
    },
    While {
        condition: Condition,
        body: Vec<Statement>,
    },
    Skip,
}

impl StatementKind {
    /// Short name used in logs
    pub fn label(&self) -> &'static str {
        match self {
            StatementKind::Declare(_) => "declare",
            StatementKind::Copy { .. } => "copy",
            StatementKind::AddressOf { .. } => "address_of",
            StatementKind::Load { .. } => "load",
            StatementKind::Store { .. } => "store",
            StatementKind::Alloc { .. } => "alloc",
            StatementKind::Constant { .. } => "constant",
            StatementKind::Op { .. } => "op",
            StatementKind::FunctionDef(_) => "function_def",
            StatementKind::Call { .. } => "call",
            StatementKind::If { .. } => "if",
            StatementKind::While { .. } => "while",
            StatementKind::Skip => "skip",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

impl Statement {
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Statements nested directly inside this one
    pub fn children(&self) -> impl Iterator<Item = &Statement> {
        let (first, second): (&[Statement], &[Statement]) = match &self.kind {
            StatementKind::FunctionDef(def) => (&def.body, &[]),
            StatementKind::If {
                then_branch,
                else_branch,
                ..
            } => (then_branch, else_branch),
            StatementKind::While { body, .. } => (body, &[]),
            _ => (&[], &[]),
        };
        first.iter().chain(second.iter())
    }

    /// Variables this statement itself names (not those of nested statements)
    pub fn variables(&self) -> Vec<&Variable> {
        match &self.kind {
            StatementKind::Declare(vars) => vars.iter().collect(),
            StatementKind::Copy { lhs, rhs } => vec![lhs, rhs],
            StatementKind::AddressOf { lhs, target } => vec![lhs, target],
            StatementKind::Load { lhs, pointer } => vec![lhs, pointer],
            StatementKind::Store { pointer, value } => {
                let mut vars = vec![pointer];
                vars.extend(value.as_variable());
                vars
            }
            StatementKind::Alloc { lhs, size } => {
                let mut vars = vec![lhs];
                vars.extend(size.as_ref().and_then(Expression::as_variable));
                vars
            }
            StatementKind::Constant { lhs, .. } => vec![lhs],
            StatementKind::Op { lhs, operands, .. } => {
                let mut vars = vec![lhs];
                vars.extend(operands.iter().filter_map(Expression::as_variable));
                vars
            }
            StatementKind::FunctionDef(def) => {
                let mut vars = vec![&def.name];
                vars.extend(def.params.iter());
                vars.push(&def.ret);
                vars
            }
            StatementKind::Call {
                result,
                callee,
                args,
            } => {
                let mut vars: Vec<&Variable> = result.iter().collect();
                vars.push(callee);
                vars.extend(args.iter().filter_map(Expression::as_variable));
                vars
            }
            StatementKind::If { condition, .. } | StatementKind::While { condition, .. } => {
                let mut vars = Vec::new();
                collect_condition_vars(condition, &mut vars);
                vars
            }
            StatementKind::Skip => Vec::new(),
        }
    }
}

fn collect_condition_vars<'a>(condition: &'a Condition, out: &mut Vec<&'a Variable>) {
    match condition {
        Condition::Compare { left, right, .. } => {
            out.extend(left.as_variable());
            out.extend(right.as_variable());
        }
        Condition::And(a, b) | Condition::Or(a, b) => {
            collect_condition_vars(a, out);
            collect_condition_vars(b, out);
        }
        Condition::Not(inner) => collect_condition_vars(inner, out),
    }
}

/// A parsed SIL program
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// Visit every statement, outer before inner, in source order
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Statement)) {
        fn go<'a>(stmt: &'a Statement, visit: &mut impl FnMut(&'a Statement)) {
            visit(stmt);
            for child in stmt.children() {
                go(child, visit);
            }
        }
        for stmt in &self.statements {
            go(stmt, visit);
        }
    }

    /// Every variable named anywhere in the program
    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut vars = BTreeSet::new();
        self.walk(&mut |stmt| {
            vars.extend(stmt.variables().into_iter().cloned());
        });
        vars
    }

    /// Total statement count including nested bodies
    pub fn statement_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_| count += 1);
        count
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.statements.iter().filter_map(|stmt| match &stmt.kind {
            StatementKind::FunctionDef(def) => Some(def),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stmt(kind: StatementKind) -> Statement {
        Statement::new(kind, Span::zero())
    }

    #[test]
    fn test_qualified_names() {
        assert_eq!(Variable::global("x").qualified_name(), "x");
        assert_eq!(Variable::local("f", "p").to_string(), "f.p");
    }

    #[test]
    fn test_walk_reaches_nested_bodies() {
        let inner = stmt(StatementKind::Copy {
            lhs: Variable::local("f", "r"),
            rhs: Variable::local("f", "p"),
        });
        let program = Program::new(vec![
            stmt(StatementKind::FunctionDef(FunctionDef {
                name: Variable::global("f"),
                params: vec![Variable::local("f", "p")],
                ret: Variable::local("f", "r"),
                body: vec![inner],
            })),
            stmt(StatementKind::Skip),
        ]);

        assert_eq!(program.statement_count(), 3);
        let names: Vec<String> = program
            .variables()
            .iter()
            .map(Variable::qualified_name)
            .collect();
        assert_eq!(names, vec!["f", "f.p", "f.r"]);
        assert_eq!(program.functions().count(), 1);
    }

    #[test]
    fn test_condition_variables_are_collected() {
        let program = Program::new(vec![stmt(StatementKind::While {
            condition: Condition::Not(Box::new(Condition::Compare {
                op: CompareOp::Lt,
                left: Expression::Variable(Variable::global("i")),
                right: Expression::Literal(Literal("10".into())),
            })),
            body: vec![stmt(StatementKind::Skip)],
        })]);
        assert!(program.variables().contains(&Variable::global("i")));
    }
}
