//! Parser for minic
//!
//! Recursive descent parser. Tokens are pulled from the lexer on demand with
//! one token of buffered lookahead. The first error, lexical or syntactic,
//! ends the parse; statements completed before it are kept.

use crate::frontend::ast::*;
use crate::frontend::lexer::Lexer;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Location, Result, Span};
use serde::Serialize;

/// Deepest statement or expression nesting accepted before giving up
pub const MAX_NESTING_DEPTH: usize = 100;

/// Result of parsing a whole program
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseOutcome<'src> {
    /// Statements parsed before the first error (all of them on success)
    pub program: Program<'src>,
    /// The first error encountered, if any
    pub error: Option<Error>,
}

impl<'src> ParseOutcome<'src> {
    pub fn success(&self) -> bool {
        self.error.is_none()
    }

    /// Discard the partial program on failure
    pub fn into_result(self) -> Result<Program<'src>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.program),
        }
    }
}

/// Parse `source` into a program
pub fn parse(source: &str) -> ParseOutcome<'_> {
    Parser::new(Lexer::new(source)).parse_program()
}

/// The parser
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token<'src>,
    previous: Token<'src>,
    /// Token after `current`, filled by `peek_next`
    lookahead: Option<Token<'src>>,
    /// First error reported; later reports are dropped
    error: Option<Error>,
    /// Current statement/expression nesting, bounded by `MAX_NESTING_DEPTH`
    depth: usize,
}

impl<'src> Parser<'src> {
    /// Create a new parser from a lexer
    pub fn new(lexer: Lexer<'src>) -> Self {
        let placeholder = Token::eof(Span::default(), 1);
        let mut parser = Self {
            lexer,
            current: placeholder,
            previous: placeholder,
            lookahead: None,
            error: None,
            depth: 0,
        };
        parser.advance();
        parser
    }

    // ==================== Helper Methods ====================

    /// Record `err` unless an earlier error was already recorded
    fn report(&mut self, err: Error) {
        if self.error.is_none() {
            log::debug!("parse error: {}", err);
            self.error = Some(err);
        } else {
            log::trace!("suppressed parse error: {}", err);
        }
    }

    /// Pull the next non-error token, reporting any error tokens skipped
    fn scan(&mut self) -> Token<'src> {
        loop {
            let token = self.lexer.next_token();
            if token.kind != TokenKind::Error {
                return token;
            }
            self.report(Error::Lexical {
                message: crate::frontend::lexer::UNEXPECTED_CHARACTER,
                line: token.line,
                span: token.span,
            });
        }
    }

    fn advance(&mut self) -> Token<'src> {
        self.previous = self.current;
        self.current = match self.lookahead.take() {
            Some(token) => token,
            None => self.scan(),
        };
        self.previous
    }

    /// Kind of the token after `current`, without consuming anything
    fn peek_next(&mut self) -> TokenKind {
        match self.lookahead {
            Some(token) => token.kind,
            None => {
                let token = self.scan();
                self.lookahead = Some(token);
                token.kind
            }
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token if it is any of `kinds`
    fn consume_any(&mut self, kinds: &[TokenKind]) -> Option<Token<'src>> {
        if kinds.contains(&self.current.kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token<'src>> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(Self::error_at(&self.current, message))
        }
    }

    fn location_of(token: &Token<'src>) -> Location {
        match token.kind {
            TokenKind::Eof => Location::End,
            _ => Location::Lexeme(token.lexeme.to_string()),
        }
    }

    fn error_at(token: &Token<'src>, message: &str) -> Error {
        Error::Syntax {
            message: message.to_string(),
            location: Self::location_of(token),
            line: token.line,
            span: token.span,
        }
    }

    /// Run `parse` one nesting level deeper, failing at the current token
    /// once the depth limit is reached
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                location: Self::location_of(&self.current),
                line: self.current.line,
                span: self.current.span,
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // ==================== Parsing Methods ====================

    /// Parse a complete program
    pub fn parse_program(&mut self) -> ParseOutcome<'src> {
        let mut statements = Vec::new();

        while self.error.is_none() && !self.is_at_end() {
            match self.declaration() {
                Ok(stmt) => {
                    log::debug!("parsed declaration: {}", stmt);
                    statements.push(stmt);
                }
                Err(err) => self.report(err),
            }
        }

        ParseOutcome {
            program: Program { statements },
            error: self.error.take(),
        }
    }

    fn declaration(&mut self) -> Result<Stmt<'src>> {
        if self.consume(TokenKind::Int) {
            self.var_declaration()
        } else {
            self.statement()
        }
    }

    fn var_declaration(&mut self) -> Result<Stmt<'src>> {
        let name = self.expect(TokenKind::Identifier, "Expected a valid identifier")?;

        let initializer = if self.consume(TokenKind::Equal) {
            Some(self.expression()?)
        } else {
            None
        };

        self.expect(TokenKind::Semicolon, "Expected a ; at the end of the declaration")?;
        Ok(Stmt::VarDecl { name, initializer })
    }

    fn statement(&mut self) -> Result<Stmt<'src>> {
        if self.consume(TokenKind::While) {
            self.while_statement()
        } else if self.consume(TokenKind::Print) {
            self.print_statement()
        } else if self.consume(TokenKind::If) {
            self.if_statement()
        } else {
            self.expression_statement()
        }
    }

    fn if_statement(&mut self) -> Result<Stmt<'src>> {
        self.expect(TokenKind::LeftParen, "Expected opening parenthesis")?;
        let condition = self.expression()?;
        self.expect(TokenKind::RightParen, "Expected closing parenthesis")?;

        let then_branch = Box::new(self.nested(Self::statement)?);
        let else_branch = if self.consume(TokenKind::Else) {
            Some(Box::new(self.nested(Self::statement)?))
        } else {
            None
        };

        Ok(Stmt::If { condition, then_branch, else_branch })
    }

    fn while_statement(&mut self) -> Result<Stmt<'src>> {
        self.expect(TokenKind::LeftParen, "Expected opening parenthesis")?;
        let condition = self.expression()?;
        self.expect(TokenKind::RightParen, "Expected closing parenthesis")?;

        let body = Box::new(self.nested(Self::statement)?);
        Ok(Stmt::While { condition, body })
    }

    fn print_statement(&mut self) -> Result<Stmt<'src>> {
        let expr = self.expression()?;
        self.expect(TokenKind::Semicolon, "Expected a ; at the end of the statement")?;
        Ok(Stmt::Print(expr))
    }

    fn expression_statement(&mut self) -> Result<Stmt<'src>> {
        let expr = self.expression()?;
        self.expect(TokenKind::Semicolon, "Expected a ; at the end of the expression statement")?;
        Ok(Stmt::Expression(expr))
    }

    fn expression(&mut self) -> Result<Expr<'src>> {
        self.nested(Self::assignment)
    }

    fn assignment(&mut self) -> Result<Expr<'src>> {
        if self.check(TokenKind::Identifier) && self.peek_next() == TokenKind::Equal {
            let name = self.advance();
            self.advance(); // '='
            let value = self.nested(Self::assignment)?;
            return Ok(Expr::assign(name, value));
        }

        self.equality()
    }

    /// Left-associative binary level: `operand (op operand)*`
    fn binary_level(
        &mut self,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> Result<Expr<'src>>,
    ) -> Result<Expr<'src>> {
        let mut expr = operand(self)?;
        while let Some(op) = self.consume_any(operators) {
            let right = operand(self)?;
            expr = Expr::binary(expr, op, right);
        }
        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr<'src>> {
        self.binary_level(&[TokenKind::BangEqual, TokenKind::EqualEqual], Self::comparison)
    }

    fn comparison(&mut self) -> Result<Expr<'src>> {
        self.binary_level(
            &[
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
            ],
            Self::term,
        )
    }

    fn term(&mut self) -> Result<Expr<'src>> {
        self.binary_level(&[TokenKind::Minus, TokenKind::Plus], Self::factor)
    }

    fn factor(&mut self) -> Result<Expr<'src>> {
        self.binary_level(&[TokenKind::Slash, TokenKind::Star], Self::unary)
    }

    fn unary(&mut self) -> Result<Expr<'src>> {
        if let Some(op) = self.consume_any(&[TokenKind::Minus, TokenKind::Plus]) {
            let right = self.nested(Self::unary)?;
            return Ok(Expr::unary(op, right));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr<'src>> {
        match self.current.kind {
            TokenKind::Integer => {
                let token = self.advance();
                let value = token.lexeme.parse::<i64>().map_err(|_| Error::IntegerOverflow {
                    lexeme: token.lexeme.to_string(),
                    line: token.line,
                    span: token.span,
                })?;
                Ok(Expr::Literal { value })
            }
            TokenKind::Identifier => Ok(Expr::Variable { name: self.advance() }),
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.expression()?;
                self.expect(TokenKind::RightParen, "Expected a closing parenthesis")?;
                Ok(Expr::grouping(inner))
            }
            _ => Err(Self::error_at(&self.current, "Expected an expression")),
        }
    }
}
