//! Minic command line driver
//!
//! Parses a source file and prints its AST, its token stream, or a JSON dump.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use minic::frontend::printer::{dump_tokens, print_ast};

/// Minic front end
#[derive(Parser, Debug)]
#[command(name = "minic")]
#[command(version = "0.1.0")]
#[command(about = "Tokenizer and parser for a minimal imperative language")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input source file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print the parse outcome as JSON instead of a tree
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a source file and print its AST
    Parse {
        /// Input source file
        input: PathBuf,

        /// Print the parse outcome as JSON instead of a tree
        #[arg(long)]
        json: bool,
    },
    /// Print the token stream of a source file
    Tokens {
        /// Input source file
        input: PathBuf,
    },
    /// Check a source file for syntax errors
    Check {
        /// Input source file
        input: PathBuf,
    },
    /// Print version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Parse { input, json }) => parse_file(input, *json),
        Some(Commands::Tokens { input }) => tokens_file(input),
        Some(Commands::Check { input }) => check_file(input),
        Some(Commands::Version) => {
            println!("minic 0.1.0");
            Ok(true)
        }
        None => match &cli.input {
            Some(input) => parse_file(input, cli.json),
            None => {
                eprintln!("Error: No input file specified");
                eprintln!("Usage: minic <FILE> or minic parse <FILE>");
                process::exit(1);
            }
        },
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn read_source(input: &Path) -> Result<String> {
    fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))
}

/// Parse a file and print the AST. Returns whether parsing succeeded.
fn parse_file(input: &Path, json: bool) -> Result<bool> {
    let source = read_source(input)?;
    let outcome = minic::parse(&source);
    log::info!(
        "parsed {} statement(s) from {}",
        outcome.program.statements.len(),
        input.display()
    );

    if json {
        let text = serde_json::to_string_pretty(&outcome).context("serializing parse outcome")?;
        println!("{}", text);
    } else {
        print!("{}", print_ast(&outcome.program));
    }

    if let Some(err) = &outcome.error {
        eprintln!("{}", err.render(&source));
    }
    Ok(outcome.success())
}

fn tokens_file(input: &Path) -> Result<bool> {
    let source = read_source(input)?;
    print!("{}", dump_tokens(&source));
    Ok(true)
}

/// Check a source file for errors without printing the tree
fn check_file(input: &Path) -> Result<bool> {
    println!("Checking: {}", input.display());
    let source = read_source(input)?;

    match minic::parse(&source).into_result() {
        Ok(_) => {
            println!("No errors found");
            Ok(true)
        }
        Err(e) => {
            eprintln!("{}", e.render(&source));
            Ok(false)
        }
    }
}
