//! Abstract Syntax Tree definitions for minic
//!
//! Every node owns its children, either by value or through a `Box`, so a
//! parsed program is a strict tree. Identifier and operator tokens borrow
//! their text from the source buffer.

use std::fmt;

use crate::frontend::token::Token;
use serde::Serialize;

/// A complete program: the ordered top-level statements
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Program<'src> {
    pub statements: Vec<Stmt<'src>>,
}

impl<'src> Program<'src> {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt<'src> {
    /// Expression evaluated for its effect: `expr;`
    Expression(Expr<'src>),
    /// `print expr;`
    Print(Expr<'src>),
    /// `int name;` or `int name = expr;`
    VarDecl {
        name: Token<'src>,
        initializer: Option<Expr<'src>>,
    },
    /// `if (cond) stmt` with an optional `else stmt`
    If {
        condition: Expr<'src>,
        then_branch: Box<Stmt<'src>>,
        else_branch: Option<Box<Stmt<'src>>>,
    },
    /// `while (cond) stmt`
    While {
        condition: Expr<'src>,
        body: Box<Stmt<'src>>,
    },
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr<'src> {
    /// Integer constant
    Literal { value: i64 },
    /// Name reference
    Variable { name: Token<'src> },
    /// Parenthesized sub-expression
    Grouping(Box<Expr<'src>>),
    /// Prefix `+` or `-`
    Unary {
        op: Token<'src>,
        right: Box<Expr<'src>>,
    },
    Binary {
        left: Box<Expr<'src>>,
        op: Token<'src>,
        right: Box<Expr<'src>>,
    },
    /// `name = value`
    Assign {
        name: Token<'src>,
        value: Box<Expr<'src>>,
    },
}

impl<'src> Expr<'src> {
    pub fn unary(op: Token<'src>, right: Expr<'src>) -> Self {
        Expr::Unary { op, right: Box::new(right) }
    }

    pub fn binary(left: Expr<'src>, op: Token<'src>, right: Expr<'src>) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn assign(name: Token<'src>, value: Expr<'src>) -> Self {
        Expr::Assign { name, value: Box::new(value) }
    }

    pub fn grouping(inner: Expr<'src>) -> Self {
        Expr::Grouping(Box::new(inner))
    }
}

// Compact prefix form, e.g. `(+ 1 (* 2 3))`

impl fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal { value } => write!(f, "{}", value),
            Expr::Variable { name } => write!(f, "{}", name.lexeme),
            Expr::Grouping(inner) => write!(f, "(group {})", inner),
            Expr::Unary { op, right } => write!(f, "({} {})", op.lexeme, right),
            Expr::Binary { left, op, right } => write!(f, "({} {} {})", op.lexeme, left, right),
            Expr::Assign { name, value } => write!(f, "(= {} {})", name.lexeme, value),
        }
    }
}

impl fmt::Display for Stmt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Expression(expr) => write!(f, "(expr {})", expr),
            Stmt::Print(expr) => write!(f, "(print {})", expr),
            Stmt::VarDecl { name, initializer: Some(init) } => {
                write!(f, "(var {} {})", name.lexeme, init)
            }
            Stmt::VarDecl { name, initializer: None } => write!(f, "(var {})", name.lexeme),
            Stmt::If { condition, then_branch, else_branch } => {
                write!(f, "(if {} {}", condition, then_branch)?;
                if let Some(else_branch) = else_branch {
                    write!(f, " {}", else_branch)?;
                }
                write!(f, ")")
            }
            Stmt::While { condition, body } => write!(f, "(while {} {})", condition, body),
        }
    }
}

impl fmt::Display for Program<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::token::TokenKind;
    use crate::utils::Span;
    use pretty_assertions::assert_eq;

    fn token(kind: TokenKind, lexeme: &str) -> Token<'_> {
        Token::new(kind, lexeme, Span::default(), 1)
    }

    #[test]
    fn test_expr_display() {
        let expr = Expr::assign(
            token(TokenKind::Identifier, "x"),
            Expr::binary(
                Expr::unary(token(TokenKind::Minus, "-"), Expr::Literal { value: 1 }),
                token(TokenKind::Star, "*"),
                Expr::grouping(Expr::Variable { name: token(TokenKind::Identifier, "y") }),
            ),
        );
        assert_eq!(expr.to_string(), "(= x (* (- 1) (group y)))");
    }

    #[test]
    fn test_stmt_display() {
        let stmt = Stmt::While {
            condition: Expr::Variable { name: token(TokenKind::Identifier, "n") },
            body: Box::new(Stmt::If {
                condition: Expr::Literal { value: 0 },
                then_branch: Box::new(Stmt::Print(Expr::Literal { value: 1 })),
                else_branch: Some(Box::new(Stmt::VarDecl {
                    name: token(TokenKind::Identifier, "k"),
                    initializer: None,
                })),
            }),
        };
        assert_eq!(stmt.to_string(), "(while n (if 0 (print 1) (var k)))");
    }

    #[test]
    fn test_program_display_one_statement_per_line() {
        let program = Program {
            statements: vec![
                Stmt::Expression(Expr::Literal { value: 1 }),
                Stmt::Print(Expr::Literal { value: 2 }),
            ],
        };
        assert_eq!(program.to_string(), "(expr 1)\n(print 2)");
        assert!(Program::default().is_empty());
    }
}
