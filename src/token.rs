use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    // Single-character tokens.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens.
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals.
    Identifier,
    String,
    Number,

    // Keywords.
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

/// A classified lexeme. Only `String` and `Number` tokens carry a literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub r#type: TokenType,
    pub lexeme: Box<str>,
    pub literal: Option<Value>,
    pub line: u32,
}

impl Token {
    pub fn new(r#type: TokenType, lexeme: &str, literal: Option<Value>, line: u32) -> Token {
        Token {
            r#type,
            lexeme: lexeme.into(),
            literal,
            line,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.r#type == TokenType::Eof
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{:?} {} {}", self.r#type, self.lexeme, literal),
            None => write!(f, "{:?} {} nil", self.r#type, self.lexeme),
        }
    }
}
