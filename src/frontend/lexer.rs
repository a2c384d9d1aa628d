//! Lexer for minic
//!
//! Converts source code into a lazy stream of tokens. Scanning works on raw
//! bytes; every token borrows its lexeme from the source.

use crate::frontend::token::{Token, TokenKind};
use crate::utils::Span;

/// Lexeme carried by error tokens in place of the offending text
pub const UNEXPECTED_CHARACTER: &str = "unexpected character";

/// The lexer state
pub struct Lexer<'src> {
    source: &'src str,
    /// Current position in source
    pos: usize,
    /// Start position of current token
    start: usize,
    /// Line of the current position, 1-based
    line: u32,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            start: 0,
            line: 1,
        }
    }

    /// Get the current byte without advancing. NUL marks end of input.
    fn peek(&self) -> u8 {
        self.source.as_bytes().get(self.pos).copied().unwrap_or(b'\0')
    }

    /// Get the byte after the current one without advancing
    fn peek_next(&self) -> u8 {
        if self.is_at_end() {
            return b'\0';
        }
        self.source.as_bytes().get(self.pos + 1).copied().unwrap_or(b'\0')
    }

    /// Advance to the next byte. Never moves past end of input.
    fn advance(&mut self) -> u8 {
        let c = self.peek();
        if c != b'\0' {
            self.pos += 1;
        }
        c
    }

    /// Check if we've reached the end of input
    fn is_at_end(&self) -> bool {
        self.peek() == b'\0'
    }

    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Create a token with the current span
    fn make_token(&self, kind: TokenKind) -> Token<'src> {
        Token::new(kind, &self.source[self.start..self.pos], self.make_span(), self.line)
    }

    /// Pick `double` if the next byte is `=`, consuming it
    fn make_two_char(&mut self, double: TokenKind, single: TokenKind) -> Token<'src> {
        if self.peek() == b'=' {
            self.advance();
            self.make_token(double)
        } else {
            self.make_token(single)
        }
    }

    fn error_token(&mut self) -> Token<'src> {
        // Consume the whole character so later slices stay on char boundaries
        let width = self.source[self.start..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.pos = self.start + width;
        Token::new(TokenKind::Error, UNEXPECTED_CHARACTER, self.make_span(), self.line)
    }

    /// Skip whitespace and comments
    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                b' ' | b'\t' | b'\r' => {
                    self.advance();
                }
                b'\n' => {
                    self.line += 1;
                    self.advance();
                }
                // Line comment, the newline is left for the next iteration
                b'/' if self.peek_next() == b'/' => {
                    while !matches!(self.peek(), b'\n' | b'\0') {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token<'src> {
        while self.peek().is_ascii_alphanumeric() || self.peek() == b'_' {
            self.advance();
        }

        let text = &self.source[self.start..self.pos];
        let kind = TokenKind::keyword_from_str(text).unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }

    /// Read a decimal integer literal. The value is parsed by the parser.
    fn read_number(&mut self) -> Token<'src> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        self.make_token(TokenKind::Integer)
    }

    /// Get the next token. Returns `Eof` forever once input is exhausted.
    pub fn next_token(&mut self) -> Token<'src> {
        self.skip_whitespace();
        self.start = self.pos;

        let c = self.advance();

        if c.is_ascii_digit() {
            return self.read_number();
        }
        if c.is_ascii_alphabetic() || c == b'_' {
            return self.read_identifier();
        }

        let token = match c {
            b'(' => self.make_token(TokenKind::LeftParen),
            b')' => self.make_token(TokenKind::RightParen),
            b'{' => self.make_token(TokenKind::LeftBrace),
            b'}' => self.make_token(TokenKind::RightBrace),
            b';' => self.make_token(TokenKind::Semicolon),
            b'+' => self.make_token(TokenKind::Plus),
            b'-' => self.make_token(TokenKind::Minus),
            b'*' => self.make_token(TokenKind::Star),
            b'/' => self.make_token(TokenKind::Slash),
            b'!' => self.make_two_char(TokenKind::BangEqual, TokenKind::Bang),
            b'=' => self.make_two_char(TokenKind::EqualEqual, TokenKind::Equal),
            b'>' => self.make_two_char(TokenKind::GreaterEqual, TokenKind::Greater),
            b'<' => self.make_two_char(TokenKind::LessEqual, TokenKind::Less),
            b'\0' => Token::eof(self.make_span(), self.line),
            _ => self.error_token(),
        };

        log::trace!("token {} {:?} at line {}", token.kind, token.lexeme, token.line);
        token
    }

    /// Tokenize the entire source and return all tokens up to and including `Eof`
    pub fn tokenize(&mut self) -> Vec<Token<'src>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}
