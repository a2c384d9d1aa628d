//! AST Printer - render a parsed program as an indented tree
//!
//! Also provides the token dump used by `minic tokens`.

use std::fmt;

use crate::frontend::ast::*;
use crate::frontend::lexer::Lexer;

const HEADER: &str = "--- Abstract Syntax Tree ---";
const FOOTER: &str = "--------------------------";

/// Tree printer for a program. Rendering happens through `Display`.
pub struct AstPrinter<'a, 'src> {
    program: &'a Program<'src>,
}

impl<'a, 'src> AstPrinter<'a, 'src> {
    pub fn new(program: &'a Program<'src>) -> Self {
        Self { program }
    }

    fn branch(is_last: bool) -> &'static str {
        if is_last { "`- " } else { "|- " }
    }

    fn child_prefix(prefix: &str, is_last: bool) -> String {
        format!("{}{}", prefix, if is_last { "   " } else { "|  " })
    }

    fn write_stmt(
        f: &mut fmt::Formatter<'_>,
        stmt: &Stmt<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        write!(f, "{}{}", prefix, Self::branch(is_last))?;
        let inner = Self::child_prefix(prefix, is_last);

        match stmt {
            Stmt::Expression(expr) => {
                writeln!(f, "ExpressionStmt")?;
                Self::write_expr(f, expr, &inner, true)
            }
            Stmt::Print(expr) => {
                writeln!(f, "PrintStmt")?;
                Self::write_expr(f, expr, &inner, true)
            }
            Stmt::VarDecl { name, initializer } => {
                writeln!(f, "VarDecl: {}", name.lexeme)?;
                match initializer {
                    Some(init) => Self::write_expr(f, init, &inner, true),
                    None => Ok(()),
                }
            }
            Stmt::If { condition, then_branch, else_branch } => {
                writeln!(f, "IfStmt")?;
                Self::write_expr(f, condition, &inner, false)?;
                Self::write_stmt(f, then_branch, &inner, else_branch.is_none())?;
                match else_branch {
                    Some(else_branch) => Self::write_stmt(f, else_branch, &inner, true),
                    None => Ok(()),
                }
            }
            Stmt::While { condition, body } => {
                writeln!(f, "WhileStmt")?;
                Self::write_expr(f, condition, &inner, false)?;
                Self::write_stmt(f, body, &inner, true)
            }
        }
    }

    fn write_expr(
        f: &mut fmt::Formatter<'_>,
        expr: &Expr<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        write!(f, "{}{}", prefix, Self::branch(is_last))?;
        let inner = Self::child_prefix(prefix, is_last);

        match expr {
            Expr::Assign { name, value } => {
                writeln!(f, "Assign: {}", name.lexeme)?;
                Self::write_expr(f, value, &inner, true)
            }
            Expr::Binary { left, op, right } => {
                writeln!(f, "BinaryExpr: {}", op.lexeme)?;
                Self::write_expr(f, left, &inner, false)?;
                Self::write_expr(f, right, &inner, true)
            }
            Expr::Grouping(inner_expr) => {
                writeln!(f, "Grouping")?;
                Self::write_expr(f, inner_expr, &inner, true)
            }
            Expr::Literal { value } => writeln!(f, "Literal: {}", value),
            Expr::Unary { op, right } => {
                writeln!(f, "UnaryExpr: {}", op.lexeme)?;
                Self::write_expr(f, right, &inner, true)
            }
            Expr::Variable { name } => writeln!(f, "Variable: {}", name.lexeme),
        }
    }
}

impl fmt::Display for AstPrinter<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", HEADER)?;
        if self.program.is_empty() {
            writeln!(f, " (No statements)")?;
        } else {
            let count = self.program.statements.len();
            for (i, stmt) in self.program.statements.iter().enumerate() {
                Self::write_stmt(f, stmt, "", i + 1 == count)?;
            }
        }
        writeln!(f, "{}", FOOTER)
    }
}

/// Render a program as an indented tree
pub fn print_ast(program: &Program<'_>) -> String {
    AstPrinter::new(program).to_string()
}

/// Render the token stream of `source`, one token per line, up to `Eof`
pub fn dump_tokens(source: &str) -> String {
    let mut output = String::new();
    let mut line = 0;

    for token in Lexer::new(source).tokenize() {
        if token.line != line {
            output.push_str(&format!("{:>4} ", token.line));
            line = token.line;
        } else {
            output.push_str("   | ");
        }
        output.push_str(&format!("{:<13} '{}'\n", token.kind, token.lexeme));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::parser::parse;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = include_str!("../../demos/sample.mc");

    #[test]
    fn test_empty_program() {
        let outcome = parse("// nothing\n");
        assert_eq!(
            print_ast(&outcome.program),
            "--- Abstract Syntax Tree ---\n (No statements)\n--------------------------\n"
        );
    }

    #[test]
    fn test_sample_program() {
        let outcome = parse(SAMPLE);
        assert!(outcome.success());

        let expected = "\
--- Abstract Syntax Tree ---
|- VarDecl: sum
|  `- BinaryExpr: +
|     |- Literal: 10
|     `- Literal: 25
`- IfStmt
   |- BinaryExpr: >
   |  |- Variable: sum
   |  `- Literal: 30
   |- PrintStmt
   |  `- Variable: sum
   `- PrintStmt
      `- Literal: 0
--------------------------
";
        assert_eq!(print_ast(&outcome.program), expected);
    }

    #[test]
    fn test_every_expression_variant() {
        let outcome = parse("while (n) x = -(n / 2); int k;");
        let expected = "\
--- Abstract Syntax Tree ---
|- WhileStmt
|  |- Variable: n
|  `- ExpressionStmt
|     `- Assign: x
|        `- UnaryExpr: -
|           `- Grouping
|              `- BinaryExpr: /
|                 |- Variable: n
|                 `- Literal: 2
`- VarDecl: k
--------------------------
";
        assert_eq!(print_ast(&outcome.program), expected);
    }

    #[test]
    fn test_if_without_else() {
        let outcome = parse("if (a) print a;");
        let expected = "\
--- Abstract Syntax Tree ---
`- IfStmt
   |- Variable: a
   `- PrintStmt
      `- Variable: a
--------------------------
";
        assert_eq!(print_ast(&outcome.program), expected);
    }

    #[test]
    fn test_partial_program_after_error() {
        let outcome = parse("print 1; print");
        assert!(!outcome.success());
        assert_eq!(
            print_ast(&outcome.program),
            "--- Abstract Syntax Tree ---\n`- PrintStmt\n   `- Literal: 1\n--------------------------\n"
        );
    }

    #[test]
    fn test_dump_tokens() {
        let dump = dump_tokens("int a = 1;\nprint a;");
        let expected = "   1 INT           'int'
   | IDENTIFIER    'a'
   | EQUAL         '='
   | INTEGER       '1'
   | SEMICOLON     ';'
   2 PRINT         'print'
   | IDENTIFIER    'a'
   | SEMICOLON     ';'
   | EOF           ''
";
        assert_eq!(dump, expected);
    }

    #[test]
    fn test_dump_tokens_shows_error_message() {
        let dump = dump_tokens("@");
        assert_eq!(dump, "   1 ERROR         'unexpected character'\n   | EOF           ''\n");
    }
}
