use crate::token::Token;
use crate::value::Value;

/// Every node owns its children; trees are never mutated once the parser builds them.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary(Box<Expr>, Token, Box<Expr>),
    Grouping(Box<Expr>),
    Literal(Value),
    Unary(Token, Box<Expr>),
}
