//! Recursive-descent parser for SIL with inline scope resolution
//!
//! Identifiers are resolved against a [`ScopeStack`] as soon as they are
//! read, so the produced AST only holds [`Variable`]s. Function bodies get
//! their own frame; `if`/`while` bodies do not.

use crate::config::ParseConfig;
use crate::errors::{Result, SilError};
use crate::features::parsing::domain::{
    CompareOp, Condition, Expression, FunctionDef, Literal, OpKind, Program, Scope, Statement,
    StatementKind, Token, TokenKind, Variable,
};
use crate::shared::models::Span;
use crate::shared::ScopeStack;

/// Parser over a token vector produced by the scanner
pub struct SilParser {
    tokens: Vec<Token>,
    current: usize,
    scopes: ScopeStack,
    config: ParseConfig,
    /// `{ .. }` blocks currently open; functions are only legal at 0
    block_depth: usize,
}

/// Right-hand side of `x := ...`, resolved before `x` is bound
enum Rhs {
    Copy(Variable),
    Constant(Literal),
    AddressOf(Variable),
    Load(Variable),
    Alloc(Option<Expression>),
    Op(OpKind, Vec<Expression>),
    Call(Variable, Vec<Expression>),
}

impl SilParser {
    pub fn new(tokens: Vec<Token>, config: ParseConfig) -> Self {
        SilParser {
            tokens,
            current: 0,
            scopes: ScopeStack::new(),
            config,
            block_depth: 0,
        }
    }

    /// Parses the whole token stream into a program
    pub fn parse(mut self) -> Result<Program> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(Program::new(statements))
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        let start = self.peek().clone();

        let kind = match &start.kind {
            TokenKind::Var => self.parse_declaration()?,
            TokenKind::Star => self.parse_store()?,
            TokenKind::Skip => {
                self.advance();
                StatementKind::Skip
            }
            TokenKind::If => self.parse_if()?,
            TokenKind::While => self.parse_while()?,
            TokenKind::Identifier(_) => {
                if matches!(self.peek_next().kind, TokenKind::LeftParen) {
                    self.parse_bare_call()?
                } else {
                    self.parse_assignment()?
                }
            }
            _ => return Err(self.error_at(&start, "a statement")),
        };

        self.consume(TokenKind::Semicolon, "';'")?;

        let end = self.previous().end_location();
        let span = Span::point(start.location()).to(Span::point(end));
        Ok(Statement::new(kind, span))
    }

    // `var x, y`
    fn parse_declaration(&mut self) -> Result<StatementKind> {
        self.advance();
        let mut vars = Vec::new();
        loop {
            let (name, _) = self.consume_identifier()?;
            self.scopes.bind(&name);
            vars.push(self.variable_in_frame(&name, self.scopes.depth()));
            if !self.match_kind(&TokenKind::Comma) {
                break;
            }
        }
        Ok(StatementKind::Declare(vars))
    }

    // `*x := e`
    fn parse_store(&mut self) -> Result<StatementKind> {
        self.advance();
        let pointer = self.parse_bound_variable()?;
        self.consume_assign()?;
        let value = self.parse_expression()?;
        Ok(StatementKind::Store { pointer, value })
    }

    // `f(args)`
    fn parse_bare_call(&mut self) -> Result<StatementKind> {
        let callee = self.parse_bound_variable()?;
        let args = self.parse_arguments()?;
        Ok(StatementKind::Call {
            result: None,
            callee,
            args,
        })
    }

    // `x := rhs`
    fn parse_assignment(&mut self) -> Result<StatementKind> {
        let (name, name_token) = self.consume_identifier()?;
        self.consume_assign()?;

        if self.check(&TokenKind::Fun) {
            return self.parse_function(name, &name_token);
        }

        let rhs = self.parse_rhs()?;
        let lhs = self.bind_target(&name);

        let kind = match rhs {
            Rhs::Copy(rhs) => StatementKind::Copy { lhs, rhs },
            Rhs::Constant(value) => StatementKind::Constant { lhs, value },
            Rhs::AddressOf(target) => StatementKind::AddressOf { lhs, target },
            Rhs::Load(pointer) => StatementKind::Load { lhs, pointer },
            Rhs::Alloc(size) => StatementKind::Alloc { lhs, size },
            Rhs::Op(op, operands) => StatementKind::Op { lhs, op, operands },
            Rhs::Call(callee, args) => StatementKind::Call {
                result: Some(lhs),
                callee,
                args,
            },
        };
        Ok(kind)
    }

    fn parse_rhs(&mut self) -> Result<Rhs> {
        let token = self.peek().clone();
        match &token.kind {
            TokenKind::Identifier(_) => {
                if matches!(self.peek_next().kind, TokenKind::LeftParen) {
                    let callee = self.parse_bound_variable()?;
                    let args = self.parse_arguments()?;
                    Ok(Rhs::Call(callee, args))
                } else {
                    Ok(Rhs::Copy(self.parse_bound_variable()?))
                }
            }
            TokenKind::Number(text) => {
                self.advance();
                Ok(Rhs::Constant(Literal(text.clone())))
            }
            TokenKind::Ampersand => {
                self.advance();
                Ok(Rhs::AddressOf(self.parse_address_target()?))
            }
            TokenKind::Star => {
                self.advance();
                Ok(Rhs::Load(self.parse_bound_variable()?))
            }
            TokenKind::Alloc => {
                self.advance();
                self.consume(TokenKind::LeftParen, "'('")?;
                let size = if self.check(&TokenKind::RightParen) {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                self.consume(TokenKind::RightParen, "')'")?;
                Ok(Rhs::Alloc(size))
            }
            TokenKind::Op(op) => {
                let op = *op;
                self.advance();
                self.consume(TokenKind::LeftParen, "'('")?;
                let mut operands = vec![self.parse_expression()?];
                while self.match_kind(&TokenKind::Comma) {
                    operands.push(self.parse_expression()?);
                }
                self.consume(TokenKind::RightParen, "')'")?;
                Ok(Rhs::Op(op, operands))
            }
            _ => Err(self.error_at(&token, "an expression")),
        }
    }

    // `name := fun(p1, ..) -> r { body }`
    fn parse_function(&mut self, name: String, name_token: &Token) -> Result<StatementKind> {
        let fun_token = self.advance();
        if self.block_depth > 0 {
            return Err(SilError::syntax(
                fun_token.location(),
                "a statement",
                "nested function definition",
            ));
        }
        if self.scopes.lookup(&name).is_none() {
            self.scopes.bind_global(&name);
        }
        let fn_var = self.resolve(&name, name_token)?;

        self.scopes.push(name.clone());
        let result = self.parse_function_signature_and_body(fn_var);
        self.scopes.pop();
        result.map(StatementKind::FunctionDef)
    }

    fn parse_function_signature_and_body(&mut self, name: Variable) -> Result<FunctionDef> {
        self.consume(TokenKind::LeftParen, "'('")?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                let (param, token) = self.consume_identifier()?;
                if self.scopes.is_bound_here(&param) {
                    return Err(SilError::syntax(
                        token.location(),
                        "a distinct parameter name",
                        format!("duplicate parameter '{}'", param),
                    ));
                }
                self.scopes.bind(&param);
                params.push(self.variable_in_frame(&param, self.scopes.depth()));
                if !self.match_kind(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "')'")?;
        self.consume(TokenKind::Arrow, "'->'")?;

        let parenthesized = self.match_kind(&TokenKind::LeftParen);
        let (ret_name, _) = self.consume_identifier()?;
        if parenthesized {
            self.consume(TokenKind::RightParen, "')'")?;
        }
        self.scopes.bind(&ret_name);
        let ret = self.variable_in_frame(&ret_name, self.scopes.depth());

        let body = self.parse_block()?;
        Ok(FunctionDef {
            name,
            params,
            ret,
            body,
        })
    }

    fn parse_if(&mut self) -> Result<StatementKind> {
        self.advance();
        self.consume(TokenKind::LeftParen, "'('")?;
        let condition = self.parse_condition()?;
        self.consume(TokenKind::RightParen, "')'")?;
        self.consume(TokenKind::Then, "'then'")?;
        let then_branch = self.parse_block()?;
        self.consume(TokenKind::Else, "'else'")?;
        let else_branch = self.parse_block()?;
        Ok(StatementKind::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_while(&mut self) -> Result<StatementKind> {
        self.advance();
        self.consume(TokenKind::LeftParen, "'('")?;
        let condition = self.parse_condition()?;
        self.consume(TokenKind::RightParen, "')'")?;
        self.match_kind(&TokenKind::Do);
        let body = self.parse_block()?;
        Ok(StatementKind::While { condition, body })
    }

    fn parse_block(&mut self) -> Result<Vec<Statement>> {
        self.consume(TokenKind::LeftBrace, "'{'")?;
        self.block_depth += 1;
        let statements = self.parse_block_statements();
        self.block_depth -= 1;
        let statements = statements?;
        self.consume(TokenKind::RightBrace, "'}'")?;
        Ok(statements)
    }

    fn parse_block_statements(&mut self) -> Result<Vec<Statement>> {
        let mut statements = Vec::new();
        while !self.check(&TokenKind::RightBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    // cond := and ('or' and)*
    fn parse_condition(&mut self) -> Result<Condition> {
        let mut left = self.parse_and_condition()?;
        while self.match_kind(&TokenKind::Or) {
            let right = self.parse_and_condition()?;
            left = Condition::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and_condition(&mut self) -> Result<Condition> {
        let mut left = self.parse_unary_condition()?;
        while self.match_kind(&TokenKind::And) {
            let right = self.parse_unary_condition()?;
            left = Condition::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary_condition(&mut self) -> Result<Condition> {
        if self.match_kind(&TokenKind::Not) {
            return Ok(Condition::Not(Box::new(self.parse_unary_condition()?)));
        }
        if self.match_kind(&TokenKind::LeftParen) {
            let inner = self.parse_condition()?;
            self.consume(TokenKind::RightParen, "')'")?;
            return Ok(inner);
        }

        let left = self.parse_expression()?;
        let token = self.advance();
        let op = match token.kind {
            TokenKind::Lt => CompareOp::Lt,
            TokenKind::LtEq => CompareOp::LtEq,
            TokenKind::Eq | TokenKind::EqEq => CompareOp::Eq,
            TokenKind::NotEq => CompareOp::NotEq,
            _ => return Err(self.error_at(&token, "a comparison operator")),
        };
        let right = self.parse_expression()?;
        Ok(Condition::Compare { op, left, right })
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expression>> {
        self.consume(TokenKind::LeftParen, "'('")?;
        let mut args = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_kind(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "')'")?;
        Ok(args)
    }

    fn parse_expression(&mut self) -> Result<Expression> {
        let token = self.peek().clone();
        match &token.kind {
            TokenKind::Identifier(_) => Ok(Expression::Variable(self.parse_bound_variable()?)),
            TokenKind::Number(text) => {
                self.advance();
                Ok(Expression::Literal(Literal(text.clone())))
            }
            _ => Err(self.error_at(&token, "an identifier or number")),
        }
    }

    /// Identifier that must already be bound
    fn parse_bound_variable(&mut self) -> Result<Variable> {
        let (name, token) = self.consume_identifier()?;
        self.resolve(&name, &token)
    }

    /// Target of `&y`; may declare `y` on the fly
    fn parse_address_target(&mut self) -> Result<Variable> {
        let (name, token) = self.consume_identifier()?;
        if self.scopes.lookup(&name).is_none() && self.config.implicit_address_decl {
            self.scopes.bind(&name);
        }
        self.resolve(&name, &token)
    }

    // ───────────────────────────────────────────────────────────────
    // Scope helpers
    // ───────────────────────────────────────────────────────────────

    fn resolve(&self, name: &str, token: &Token) -> Result<Variable> {
        match self.scopes.lookup(name) {
            Some(frame) => Ok(self.variable_in_frame(name, frame)),
            None => Err(SilError::unbound(name, token.location())),
        }
    }

    /// Variable named by an assignment target, binding it if nothing does yet
    fn bind_target(&mut self, name: &str) -> Variable {
        let frame = match self.scopes.lookup(name) {
            Some(frame) => frame,
            None => {
                self.scopes.bind(name);
                self.scopes.depth()
            }
        };
        self.variable_in_frame(name, frame)
    }

    fn variable_in_frame(&self, name: &str, frame: usize) -> Variable {
        let scope = match self.scopes.frame_name(frame) {
            Some(function) if frame > 0 => Scope::Local(function.to_string()),
            _ => Scope::Global,
        };
        Variable {
            name: name.to_string(),
            scope,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Token helpers
    // ───────────────────────────────────────────────────────────────

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn peek_next(&self) -> &Token {
        &self.tokens[(self.current + 1).min(self.tokens.len() - 1)]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn match_kind(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: TokenKind, expected: &str) -> Result<Token> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at(self.peek(), expected))
        }
    }

    /// `:=`, or `=` used as an assignment
    fn consume_assign(&mut self) -> Result<()> {
        if self.match_kind(&TokenKind::Assign) || self.match_kind(&TokenKind::Eq) {
            Ok(())
        } else {
            Err(self.error_at(self.peek(), "':='"))
        }
    }

    fn consume_identifier(&mut self) -> Result<(String, Token)> {
        let token = self.peek().clone();
        match &token.kind {
            TokenKind::Identifier(name) => {
                self.advance();
                Ok((name.clone(), token))
            }
            _ => Err(self.error_at(&token, "an identifier")),
        }
    }

    fn error_at(&self, token: &Token, expected: &str) -> SilError {
        SilError::syntax(token.location(), expected, token.describe())
    }
}
