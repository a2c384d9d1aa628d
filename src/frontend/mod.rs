//! Frontend module - Lexer, Parser, AST and AST printer

pub mod token;
pub mod lexer;
pub mod ast;
pub mod parser;
pub mod printer;
