//! Scanner, parser and tree-walking evaluator for Lox expressions.
//!
//! ```
//! use lox_expr::error::Diagnostics;
//! use lox_expr::Lox;
//!
//! let mut diagnostics = Diagnostics::new();
//! let value = Lox::new().run("(1 + 2) * 3", &mut diagnostics);
//! assert_eq!(value.map(|value| value.to_string()).as_deref(), Some("9"));
//! ```

pub mod ast_printer;
pub mod error;
pub mod expr;
pub mod interpreter;
pub mod logger;
pub mod parser;
pub mod scanner;
pub mod token;
pub mod value;

use std::fs;
use std::io::prelude::*;
use std::io::{self, BufReader};

use error::{Diagnostics, LoxError};
use interpreter::Interpreter;
use parser::Parser;
use scanner::Scanner;
use value::Value;

/// How a file run ended; `main` maps each to an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretResult {
    Ok,
    CompileError,
    RuntimeError,
}

#[derive(Debug, Default)]
pub struct Lox {
    interpreter: Interpreter,
}

impl Lox {
    pub fn new() -> Lox {
        Lox::default()
    }

    /// Scans, parses and evaluates `source`. Every error lands in `diagnostics`; a value is
    /// produced only when none occurred.
    pub fn run(&self, source: &str, diagnostics: &mut Diagnostics) -> Option<Value> {
        log::info!("Scanning...");
        let tokens = Scanner::new(source).scan_tokens(diagnostics);
        log::debug!("Tokens: {:?}", tokens.iter().map(ToString::to_string).collect::<Vec<_>>());

        log::info!("Parsing...");
        let expression = Parser::new(tokens, diagnostics).parse()?;
        log::debug!("Expression: {}", ast_printer::print(&expression));

        // Don't evaluate when the scanner reported errors.
        if diagnostics.had_error() {
            return None;
        }

        log::info!("Interpreting...");
        self.interpreter.interpret(&expression, diagnostics)
    }

    pub fn run_file(&self, path: &str) -> io::Result<InterpretResult> {
        let source = fs::read_to_string(path)?;
        let mut diagnostics = Diagnostics::new();
        self.run_and_print(&source, &mut diagnostics);

        if diagnostics.had_error() {
            return Ok(InterpretResult::CompileError);
        }
        if diagnostics.had_runtime_error() {
            return Ok(InterpretResult::RuntimeError);
        }
        Ok(InterpretResult::Ok)
    }

    /// Reads and runs one line at a time until stdin closes. Errors only affect their own line.
    pub fn run_prompt(&self) -> io::Result<()> {
        let input = io::stdin();
        let mut reader = BufReader::new(input.lock());
        let mut diagnostics = Diagnostics::new();

        loop {
            print!("> ");
            io::stdout().flush()?;

            let mut line = String::new();
            if reader.read_line(&mut line)? == 0 {
                println!();
                return Ok(());
            }

            self.run_and_print(&line, &mut diagnostics);
            diagnostics.clear();
        }
    }

    fn run_and_print(&self, source: &str, diagnostics: &mut Diagnostics) {
        let value = self.run(source, diagnostics);
        for error in diagnostics.errors() {
            report(error);
        }
        if let Some(value) = value {
            println!("{value}");
        }
    }
}

fn report(error: &LoxError) {
    eprintln!("{error}");
}
