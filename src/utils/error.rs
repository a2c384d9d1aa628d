//! Error handling for minic

use std::fmt;

use crate::utils::Span;
use serde::Serialize;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Where a syntax error points in the token stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Location {
    /// The error was found at end of input
    End,
    /// The error was found at a token with this lexeme
    Lexeme(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::End => write!(f, " at end"),
            Location::Lexeme(lexeme) => write!(f, " at '{}'", lexeme),
        }
    }
}

/// Front end error
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum Error {
    // ==================== Lexer Errors ====================

    #[error("[line {line}] Error: {message}")]
    Lexical {
        message: &'static str,
        line: u32,
        span: Span,
    },

    // ==================== Parser Errors ====================

    #[error("[line {line}] Error{location}: {message}")]
    Syntax {
        message: String,
        location: Location,
        line: u32,
        span: Span,
    },

    #[error("[line {line}] Error at '{lexeme}': Integer literal out of range")]
    IntegerOverflow {
        lexeme: String,
        line: u32,
        span: Span,
    },

    /// Statements or expressions nested past the parser's depth limit
    #[error("[line {line}] Error{location}: Nesting deeper than {limit} levels")]
    NestingTooDeep {
        limit: usize,
        location: Location,
        line: u32,
        span: Span,
    },
}

impl Error {
    /// Get the span associated with this error
    pub fn span(&self) -> Span {
        match self {
            Self::Lexical { span, .. }
            | Self::Syntax { span, .. }
            | Self::IntegerOverflow { span, .. }
            | Self::NestingTooDeep { span, .. } => *span,
        }
    }

    /// Get the source line the error was reported on
    pub fn line(&self) -> u32 {
        match self {
            Self::Lexical { line, .. }
            | Self::Syntax { line, .. }
            | Self::IntegerOverflow { line, .. }
            | Self::NestingTooDeep { line, .. } => *line,
        }
    }

    /// Render the diagnostic followed by the offending source line and a
    /// caret marker under the error span.
    pub fn render(&self, source: &str) -> String {
        let span = self.span();
        let start = span.start.min(source.len());
        let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = source[start..].find('\n').map_or(source.len(), |i| start + i);

        let text = source[line_start..line_end].trim_end_matches('\r');
        // Keep tabs so the marker lines up with the echoed line
        let pad: String = source[line_start..start]
            .chars()
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        let width = source[start..span.end.clamp(start, line_end)]
            .chars()
            .count()
            .max(1);

        format!(
            "{}\n{:>4} | {}\n     | {}{}",
            self,
            self.line(),
            text,
            pad,
            "^".repeat(width)
        )
    }
}
