//! Minic
//!
//! Front end for a minimal imperative language: tokenizer, recursive-descent
//! parser and AST.

pub mod frontend;
pub mod utils;

pub use frontend::parser::{parse, ParseOutcome};
pub use utils::{Error, Result};
