//! Token definitions for minic

use std::fmt;

use crate::utils::Span;
use serde::Serialize;

/// A token produced by the lexer.
///
/// Tokens borrow their lexeme from the source buffer, so they are cheap to
/// copy and can never outlive the source they were scanned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// Source text of the token. For [`TokenKind::Error`] this is the
    /// diagnostic message instead.
    pub lexeme: &'src str,
    pub span: Span,
    /// 1-based line the token starts on
    pub line: u32,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, lexeme: &'src str, span: Span, line: u32) -> Self {
        Self { kind, lexeme, span, line }
    }

    pub fn eof(span: Span, line: u32) -> Self {
        Self { kind: TokenKind::Eof, lexeme: "", span, line }
    }
}

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // ============ Delimiters ============
    /// (
    LeftParen,
    /// )
    RightParen,
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// ;
    Semicolon,

    // ============ Operators ============
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// !
    Bang,
    /// !=
    BangEqual,
    /// =
    Equal,
    /// ==
    EqualEqual,
    /// >
    Greater,
    /// >=
    GreaterEqual,
    /// <
    Less,
    /// <=
    LessEqual,

    // ============ Identifiers and Literals ============
    Identifier,
    /// Decimal integer literal
    Integer,

    // ============ Keywords ============
    /// if
    If,
    /// int
    Int,
    /// else
    Else,
    /// print
    Print,
    /// while
    While,

    // ============ Special ============
    /// Unrecognized character
    Error,
    /// End of input
    Eof,
}

impl TokenKind {
    /// Try to convert an identifier to a keyword
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "if" => Some(TokenKind::If),
            "int" => Some(TokenKind::Int),
            "else" => Some(TokenKind::Else),
            "print" => Some(TokenKind::Print),
            "while" => Some(TokenKind::While),
            _ => None,
        }
    }

    /// Upper-case name used by the token dump
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Integer => "INTEGER",
            TokenKind::If => "IF",
            TokenKind::Int => "INT",
            TokenKind::Else => "ELSE",
            TokenKind::Print => "PRINT",
            TokenKind::While => "WHILE",
            TokenKind::Error => "ERROR",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
