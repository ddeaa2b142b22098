use derive_more::{Display, Error};

use crate::token::Token;

/// An evaluation failure, tagged with the operator token that caused it.
#[derive(Debug, Clone, PartialEq, Display, Error)]
#[display("{message}\n[line {}]", token.line)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn new(token: &Token, message: &str) -> RuntimeError {
        RuntimeError {
            token: token.clone(),
            message: message.to_string(),
        }
    }
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum LoxError {
    #[display("[line {line}] Error: {message}")]
    Lexical { line: u32, message: String },
    #[display("[line {line}] Error{location}: {message}")]
    Syntax {
        line: u32,
        location: String,
        message: String,
    },
    #[display("{_0}")]
    Runtime(#[error(not(source))] RuntimeError),
}

/// Receives every error the scanner, parser and interpreter produce.
pub trait Reporter {
    fn error(&mut self, line: u32, message: &str);

    fn token_error(&mut self, token: &Token, message: &str);

    fn runtime_error(&mut self, error: &RuntimeError);
}

/// A [`Reporter`] that keeps the errors of one run in the order they were reported.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<LoxError>,
}

impl Diagnostics {
    pub fn new() -> Diagnostics {
        Diagnostics::default()
    }

    pub fn errors(&self) -> &[LoxError] {
        &self.errors
    }

    /// True when a lexical or syntax error was reported.
    pub fn had_error(&self) -> bool {
        self.errors
            .iter()
            .any(|error| !matches!(error, LoxError::Runtime(_)))
    }

    pub fn had_runtime_error(&self) -> bool {
        self.errors
            .iter()
            .any(|error| matches!(error, LoxError::Runtime(_)))
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

impl Reporter for Diagnostics {
    fn error(&mut self, line: u32, message: &str) {
        log::debug!("lexical error on line {line}: {message}");
        self.errors.push(LoxError::Lexical {
            line,
            message: message.to_string(),
        });
    }

    fn token_error(&mut self, token: &Token, message: &str) {
        let location = if token.is_eof() {
            " at end".to_string()
        } else {
            format!(" at '{}'", token.lexeme)
        };
        log::debug!("syntax error on line {}{location}: {message}", token.line);
        self.errors.push(LoxError::Syntax {
            line: token.line,
            location,
            message: message.to_string(),
        });
    }

    fn runtime_error(&mut self, error: &RuntimeError) {
        log::debug!("runtime error on line {}: {}", error.token.line, error.message);
        self.errors.push(LoxError::Runtime(error.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenType;

    #[test]
    fn formats_each_kind_of_error() {
        let mut diagnostics = Diagnostics::new();
        let plus = Token::new(TokenType::Plus, "+", None, 2);

        diagnostics.error(1, "Unexpected character.");
        diagnostics.token_error(&plus, "Expect expression.");
        diagnostics.token_error(&Token::new(TokenType::Eof, "", None, 3), "Expect expression.");
        diagnostics.runtime_error(&RuntimeError::new(&plus, "Operands must be numbers"));

        let rendered: Vec<String> = diagnostics.errors().iter().map(|e| e.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "[line 1] Error: Unexpected character.",
                "[line 2] Error at '+': Expect expression.",
                "[line 3] Error at end: Expect expression.",
                "Operands must be numbers\n[line 2]",
            ]
        );
    }

    #[test]
    fn separates_static_and_runtime_errors() {
        let mut diagnostics = Diagnostics::new();
        assert!(!diagnostics.had_error());
        assert!(!diagnostics.had_runtime_error());

        let minus = Token::new(TokenType::Minus, "-", None, 1);
        diagnostics.runtime_error(&RuntimeError::new(&minus, "Operand must be a number"));
        assert!(!diagnostics.had_error());
        assert!(diagnostics.had_runtime_error());

        diagnostics.error(1, "Unterminated string.");
        assert!(diagnostics.had_error());

        diagnostics.clear();
        assert!(diagnostics.errors().is_empty());
    }
}
