use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::error::Reporter;
use crate::token::{Token, TokenType};
use crate::value::Value;

/// Positions are counted in chars, not bytes. Each char keeps its byte offset for slicing.
pub struct Scanner {
    source: Box<str>,
    chars: Vec<(usize, char)>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: u32,
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenType> = {
        let mut m = HashMap::new();
        m.insert("and", TokenType::And);
        m.insert("class", TokenType::Class);
        m.insert("else", TokenType::Else);
        m.insert("false", TokenType::False);
        m.insert("for", TokenType::For);
        m.insert("fun", TokenType::Fun);
        m.insert("if", TokenType::If);
        m.insert("nil", TokenType::Nil);
        m.insert("or", TokenType::Or);
        m.insert("print", TokenType::Print);
        m.insert("return", TokenType::Return);
        m.insert("super", TokenType::Super);
        m.insert("this", TokenType::This);
        m.insert("true", TokenType::True);
        m.insert("var", TokenType::Var);
        m.insert("while", TokenType::While);
        m
    };
}

impl Scanner {
    pub fn new(source: &str) -> Scanner {
        Scanner {
            source: source.into(),
            chars: source.char_indices().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Scans the whole source. Lexical errors go to `reporter` and never stop the scan; the
    /// returned tokens always end with a single `Eof`.
    pub fn scan_tokens(mut self, reporter: &mut dyn Reporter) -> Vec<Token> {
        while !self.is_at_end() {
            // We are at the beginning of the next lexeme.
            self.start = self.current;
            self.scan_token(reporter);
        }

        self.tokens
            .push(Token::new(TokenType::Eof, "", None, self.line));
        log::trace!("scanned {} tokens over {} lines", self.tokens.len(), self.line);
        self.tokens
    }

    fn scan_token(&mut self, reporter: &mut dyn Reporter) {
        let c = self.advance();
        match c {
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '{' => self.add_token(TokenType::LeftBrace),
            '}' => self.add_token(TokenType::RightBrace),
            ',' => self.add_token(TokenType::Comma),
            '.' => self.add_token(TokenType::Dot),
            '-' => self.add_token(TokenType::Minus),
            '+' => self.add_token(TokenType::Plus),
            ';' => self.add_token(TokenType::Semicolon),
            '*' => self.add_token(TokenType::Star),
            '!' => {
                let r#type = if self.matches('=') { TokenType::BangEqual } else { TokenType::Bang };
                self.add_token(r#type);
            },
            '=' => {
                let r#type = if self.matches('=') { TokenType::EqualEqual } else { TokenType::Equal };
                self.add_token(r#type);
            },
            '<' => {
                let r#type = if self.matches('=') { TokenType::LessEqual } else { TokenType::Less };
                self.add_token(r#type);
            },
            '>' => {
                let r#type = if self.matches('=') { TokenType::GreaterEqual } else { TokenType::Greater };
                self.add_token(r#type);
            },
            '/' => {
                if self.matches('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenType::Slash);
                }
            }
            ' ' | '\r' | '\t' => (),
            '\n' => self.line += 1,
            '"' => self.string(reporter),
            _ => {
                if c.is_ascii_digit() {
                    self.number();
                } else if is_alpha(c) {
                    self.identifier();
                } else {
                    reporter.error(self.line, "Unexpected character.");
                }
            }
        }
    }

    fn identifier(&mut self) {
        while is_alphanumeric(self.peek()) {
            self.advance();
        }

        let text = self.slice(self.start, self.current);
        let r#type = KEYWORDS.get(text).copied().unwrap_or(TokenType::Identifier);
        self.add_token(r#type);
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        // A trailing '.' without digits after it is not part of the number.
        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        // Only ASCII digits and at most one inner '.' were consumed, so this always parses.
        let value = self
            .slice(self.start, self.current)
            .parse()
            .unwrap_or(f64::NAN);
        self.add_token_with_literal(TokenType::Number, Value::Number(value));
    }

    fn string(&mut self, reporter: &mut dyn Reporter) {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            reporter.error(self.line, "Unterminated string.");
            return;
        }

        // The closing ".
        self.advance();

        // Trim the surrounding quotes.
        let value: Box<str> = self.slice(self.start + 1, self.current - 1).into();
        self.add_token_with_literal(TokenType::String, Value::String(value));
    }

    fn matches(&mut self, expected: char) -> bool {
        if self.peek() != expected || self.is_at_end() {
            return false;
        }

        self.current += 1;

        true
    }

    fn peek(&self) -> char {
        self.chars.get(self.current).map_or('\0', |&(_, c)| c)
    }

    fn peek_next(&self) -> char {
        self.chars.get(self.current + 1).map_or('\0', |&(_, c)| c)
    }

    /// Source text between two char positions.
    fn slice(&self, start: usize, end: usize) -> &str {
        let offset = |index: usize| {
            self.chars
                .get(index)
                .map_or(self.source.len(), |&(offset, _)| offset)
        };
        &self.source[offset(start)..offset(end)]
    }

    fn advance(&mut self) -> char {
        let c = self.peek();
        self.current += 1;
        c
    }

    fn add_token(&mut self, r#type: TokenType) {
        let token = Token::new(r#type, self.slice(self.start, self.current), None, self.line);
        self.tokens.push(token);
    }

    fn add_token_with_literal(&mut self, r#type: TokenType, literal: Value) {
        let token = Token::new(r#type, self.slice(self.start, self.current), Some(literal), self.line);
        self.tokens.push(token);
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Diagnostics, LoxError};

    fn scan(source: &str) -> (Vec<Token>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
        (tokens, diagnostics)
    }

    fn types(tokens: &[Token]) -> Vec<TokenType> {
        tokens.iter().map(|token| token.r#type).collect()
    }

    #[test]
    fn empty_source_is_just_eof() {
        let (tokens, diagnostics) = scan("");
        assert_eq!(types(&tokens), vec![TokenType::Eof]);
        assert_eq!(tokens[0].line, 1);
        assert!(diagnostics.errors().is_empty());
    }

    #[test]
    fn punctuation_and_two_character_operators() {
        let (tokens, _) = scan("(){},.-+;*/ ! != = == < <= > >=");
        assert_eq!(
            types(&tokens),
            vec![
                TokenType::LeftParen,
                TokenType::RightParen,
                TokenType::LeftBrace,
                TokenType::RightBrace,
                TokenType::Comma,
                TokenType::Dot,
                TokenType::Minus,
                TokenType::Plus,
                TokenType::Semicolon,
                TokenType::Star,
                TokenType::Slash,
                TokenType::Bang,
                TokenType::BangEqual,
                TokenType::Equal,
                TokenType::EqualEqual,
                TokenType::Less,
                TokenType::LessEqual,
                TokenType::Greater,
                TokenType::GreaterEqual,
                TokenType::Eof,
            ]
        );
        assert_eq!(&*tokens[12].lexeme, "!=");
    }

    #[test]
    fn comments_run_to_end_of_line() {
        let (tokens, _) = scan("1 // ignored ) (\n2");
        assert_eq!(types(&tokens), vec![TokenType::Number, TokenType::Number, TokenType::Eof]);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn numbers_need_digits_after_the_dot() {
        let (tokens, _) = scan("12.5 7. .5");
        assert_eq!(
            types(&tokens),
            vec![
                TokenType::Number,
                TokenType::Number,
                TokenType::Dot,
                TokenType::Dot,
                TokenType::Number,
                TokenType::Eof,
            ]
        );
        assert_eq!(tokens[0].literal, Some(Value::Number(12.5)));
        assert_eq!(&*tokens[1].lexeme, "7");
        assert_eq!(tokens[4].literal, Some(Value::Number(5.0)));
    }

    #[test]
    fn strings_span_lines_and_keep_their_contents() {
        let (tokens, diagnostics) = scan("\"one\ntwo\" 3");
        assert!(diagnostics.errors().is_empty());
        assert_eq!(tokens[0].literal, Some(Value::String("one\ntwo".into())));
        assert_eq!(&*tokens[0].lexeme, "\"one\ntwo\"");
        assert_eq!(tokens[0].line, 2);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn unterminated_string_reports_once_and_still_ends_with_eof() {
        let (tokens, diagnostics) = scan("1\n\"abc\ndef");
        assert_eq!(types(&tokens), vec![TokenType::Number, TokenType::Eof]);
        assert_eq!(
            diagnostics.errors(),
            &[LoxError::Lexical {
                line: 3,
                message: "Unterminated string.".to_string(),
            }]
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        let (tokens, _) = scan("and class else false for fun if nil or print return super this true var while");
        assert!(tokens[..16].iter().all(|token| token.r#type != TokenType::Identifier));
        assert_eq!(tokens[7].r#type, TokenType::Nil);
        assert_eq!(tokens[8].r#type, TokenType::Or);

        let (tokens, _) = scan("_private orchid nil2 or_else");
        assert_eq!(
            types(&tokens),
            vec![
                TokenType::Identifier,
                TokenType::Identifier,
                TokenType::Identifier,
                TokenType::Identifier,
                TokenType::Eof,
            ]
        );
        assert_eq!(&*tokens[2].lexeme, "nil2");
    }

    #[test]
    fn every_unexpected_character_is_reported() {
        let (tokens, diagnostics) = scan("1 @ 2\n# 3");
        assert_eq!(
            types(&tokens),
            vec![TokenType::Number, TokenType::Number, TokenType::Number, TokenType::Eof]
        );
        let lines: Vec<u32> = diagnostics
            .errors()
            .iter()
            .map(|error| match error {
                LoxError::Lexical { line, .. } => *line,
                other => panic!("unexpected error {other:?}"),
            })
            .collect();
        assert_eq!(lines, vec![1, 2]);
    }

    #[test]
    fn non_ascii_text_inside_strings() {
        let (tokens, diagnostics) = scan("\"héllo\" + 1");
        assert!(diagnostics.errors().is_empty());
        assert_eq!(tokens[0].literal, Some(Value::String("héllo".into())));
        assert_eq!(tokens[1].r#type, TokenType::Plus);
    }

    #[test]
    fn long_sources_scan_in_linear_time() {
        let source = "1 + ".repeat(100_000) + "\"tail\"";
        let started = std::time::Instant::now();
        let (tokens, diagnostics) = scan(&source);
        let elapsed = started.elapsed();

        assert!(diagnostics.errors().is_empty());
        assert_eq!(tokens.len(), 200_002);
        assert_eq!(&*tokens[199_999].lexeme, "+");
        assert_eq!(tokens[200_000].literal, Some(Value::String("tail".into())));
        assert!(elapsed.as_secs() < 5, "scanning 400KB took {elapsed:?}");
    }

    #[test]
    fn scanning_twice_gives_the_same_tokens() {
        let source = "(1 + 2) * \"x\" != nil // done";
        let (first, _) = scan(source);
        let (second, _) = scan(source);
        assert_eq!(first, second);
    }
}
