//! SIL tokens

use super::ast::OpKind;
use crate::shared::models::Location;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Original text of the token
    pub lexeme: String,
    /// Line number where token appears (1-indexed)
    pub line: u32,
    /// Column number where token starts (1-indexed)
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, column: u32) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    pub fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    /// Location one past the last character of the token
    pub fn end_location(&self) -> Location {
        Location::new(self.line, self.column + self.lexeme.chars().count() as u32)
    }

    /// Quoted description used in syntax errors
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", self.lexeme),
        }
    }
}

/// All token types in SIL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    Identifier(String),
    /// Integer or decimal literal, kept as written
    Number(String),

    // Punctuation
    /// `:=`
    Assign,
    Semicolon,
    Comma,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Ampersand,
    Star,
    /// `->`
    Arrow,

    // Comparisons (conditions only)
    Lt,
    LtEq,
    /// `=`, also accepted as assignment in statement position
    Eq,
    EqEq,
    NotEq,

    // Keywords
    Var,
    Fun,
    /// `alloc` or `allocate`
    Alloc,
    /// `add`, `negate`, `multiply` and the short forms
    Op(OpKind),
    Skip,
    If,
    Then,
    Else,
    While,
    Do,
    And,
    Or,
    Not,

    Eof,
}

impl TokenKind {
    /// Keyword lookup for a scanned word
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "var" => TokenKind::Var,
            "fun" => TokenKind::Fun,
            "alloc" | "allocate" => TokenKind::Alloc,
            "add" => TokenKind::Op(OpKind::Add),
            "negate" | "neg" => TokenKind::Op(OpKind::Negate),
            "multiply" | "mul" => TokenKind::Op(OpKind::Multiply),
            "skip" => TokenKind::Skip,
            "if" => TokenKind::If,
            "then" => TokenKind::Then,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "do" => TokenKind::Do,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier(name) => write!(f, "identifier '{}'", name),
            TokenKind::Number(text) => write!(f, "number '{}'", text),
            TokenKind::Assign => f.write_str("':='"),
            TokenKind::Semicolon => f.write_str("';'"),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::LeftParen => f.write_str("'('"),
            TokenKind::RightParen => f.write_str("')'"),
            TokenKind::LeftBrace => f.write_str("'{'"),
            TokenKind::RightBrace => f.write_str("'}'"),
            TokenKind::Ampersand => f.write_str("'&'"),
            TokenKind::Star => f.write_str("'*'"),
            TokenKind::Arrow => f.write_str("'->'"),
            TokenKind::Lt => f.write_str("'<'"),
            TokenKind::LtEq => f.write_str("'<='"),
            TokenKind::Eq => f.write_str("'='"),
            TokenKind::EqEq => f.write_str("'=='"),
            TokenKind::NotEq => f.write_str("'!='"),
            TokenKind::Var => f.write_str("'var'"),
            TokenKind::Fun => f.write_str("'fun'"),
            TokenKind::Alloc => f.write_str("'alloc'"),
            TokenKind::Op(op) => write!(f, "'{}'", op),
            TokenKind::Skip => f.write_str("'skip'"),
            TokenKind::If => f.write_str("'if'"),
            TokenKind::Then => f.write_str("'then'"),
            TokenKind::Else => f.write_str("'else'"),
            TokenKind::While => f.write_str("'while'"),
            TokenKind::Do => f.write_str("'do'"),
            TokenKind::And => f.write_str("'and'"),
            TokenKind::Or => f.write_str("'or'"),
            TokenKind::Not => f.write_str("'not'"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}
