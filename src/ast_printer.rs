use crate::expr::Expr;

/// Renders `expr` in parenthesized prefix form, e.g. `(* (- 123) (group 45.67))`.
pub fn print(expr: &Expr) -> String {
    match expr {
        Expr::Binary(left, operator, right) => {
            parenthesize(&operator.lexeme, &[left.as_ref(), right.as_ref()])
        }
        Expr::Grouping(expr) => parenthesize("group", &[expr.as_ref()]),
        Expr::Literal(value) => value.to_string(),
        Expr::Unary(operator, right) => parenthesize(&operator.lexeme, &[right.as_ref()]),
    }
}

fn parenthesize(name: &str, exprs: &[&Expr]) -> String {
    let mut builder = format!("({name}");
    for expr in exprs {
        builder.push(' ');
        builder.push_str(&print(expr));
    }
    builder.push(')');
    builder
}
