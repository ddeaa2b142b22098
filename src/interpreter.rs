use crate::error::{Reporter, RuntimeError, RuntimeResult};
use crate::expr::Expr;
use crate::token::{Token, TokenType};
use crate::value::Value;

/// Reduces expression trees to values. Holds no state between calls.
#[derive(Debug, Default)]
pub struct Interpreter;

impl Interpreter {
    pub fn new() -> Interpreter {
        Interpreter
    }

    /// Evaluates `expr`, reporting a runtime error instead of producing a value if one occurs.
    pub fn interpret(&self, expr: &Expr, reporter: &mut dyn Reporter) -> Option<Value> {
        match self.evaluate(expr) {
            Ok(value) => Some(value),
            Err(error) => {
                reporter.runtime_error(&error);
                None
            }
        }
    }

    /// Recurses on the host stack, so nesting depth is bounded by the thread's stack size.
    pub fn evaluate(&self, expr: &Expr) -> RuntimeResult<Value> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Grouping(expr) => self.evaluate(expr),
            Expr::Unary(operator, right) => {
                let right = self.evaluate(right)?;

                match operator.r#type {
                    TokenType::Minus => {
                        let right = self.check_number_operand(operator, &right)?;
                        Ok(Value::Number(-right))
                    }
                    TokenType::Bang => Ok(Value::Bool(!right.is_truthy())),
                    _ => Err(self.unsupported(operator)),
                }
            }
            Expr::Binary(left, operator, right) => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;

                match operator.r#type {
                    // Equality
                    TokenType::BangEqual => Ok(Value::Bool(left != right)),
                    TokenType::EqualEqual => Ok(Value::Bool(left == right)),

                    // Comparison
                    TokenType::Greater => {
                        let (left, right) = self.check_number_operands(operator, &left, &right)?;
                        Ok(Value::Bool(left > right))
                    }
                    TokenType::GreaterEqual => {
                        let (left, right) = self.check_number_operands(operator, &left, &right)?;
                        Ok(Value::Bool(left >= right))
                    }
                    TokenType::Less => {
                        let (left, right) = self.check_number_operands(operator, &left, &right)?;
                        Ok(Value::Bool(left < right))
                    }
                    TokenType::LessEqual => {
                        let (left, right) = self.check_number_operands(operator, &left, &right)?;
                        Ok(Value::Bool(left <= right))
                    }

                    // Arithmetic
                    TokenType::Minus => {
                        let (left, right) = self.check_number_operands(operator, &left, &right)?;
                        Ok(Value::Number(left - right))
                    }
                    TokenType::Slash => {
                        let (left, right) = self.check_number_operands(operator, &left, &right)?;
                        Ok(Value::Number(left / right))
                    }
                    TokenType::Star => {
                        let (left, right) = self.check_number_operands(operator, &left, &right)?;
                        Ok(Value::Number(left * right))
                    }
                    TokenType::Plus => match (left, right) {
                        (Value::Number(left), Value::Number(right)) => Ok(Value::Number(left + right)),
                        (Value::String(left), Value::String(right)) => {
                            Ok(Value::String(format!("{left}{right}").into()))
                        }
                        (_, _) => Err(RuntimeError::new(
                            operator,
                            "Operands must be two numbers or two strings.",
                        )),
                    },
                    _ => Err(self.unsupported(operator)),
                }
            }
        }
    }

    fn check_number_operand(&self, operator: &Token, operand: &Value) -> RuntimeResult<f64> {
        operand
            .as_number()
            .ok_or_else(|| RuntimeError::new(operator, "Operand must be a number"))
    }

    fn check_number_operands(
        &self,
        operator: &Token,
        left: &Value,
        right: &Value,
    ) -> RuntimeResult<(f64, f64)> {
        match (left, right) {
            (Value::Number(left), Value::Number(right)) => Ok((*left, *right)),
            (_, _) => Err(RuntimeError::new(operator, "Operands must be numbers")),
        }
    }

    // The parser only builds nodes with the operators handled above.
    fn unsupported(&self, operator: &Token) -> RuntimeError {
        RuntimeError::new(operator, &format!("Unsupported operator '{}'.", operator.lexeme))
    }
}
