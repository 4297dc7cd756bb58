//! Parenthesized AST dump used by the `parse` CLI mode.

use super::Expr;
use crate::lexer::{format_number_for_tokens, Literal, TokenKind};

/// Renders an expression as a fully parenthesized string, in the style of
/// the classic Lox "ASTPrinter": `Grouping` becomes `(group <inner>)`,
/// `Unary`/`Binary` print their operator prefix-style, `Logical` prints its
/// operator infix-style, and literals print their bare value (strings
/// without their surrounding quotes, numbers with the `print`-vs-`parse`
/// distinction resolved in favor of the `<n>.0` form).
pub fn print_ast(expr: &Expr) -> String {
    match expr {
        Expr::Literal { token, .. } => literal_text(token),
        Expr::Grouping { expr, .. } => format!("(group {})", print_ast(expr)),
        Expr::Unary { op, expr, .. } => format!("({} {})", op.token.lexeme, print_ast(expr)),
        Expr::Binary { op, left, right, .. } => {
            format!("({} {} {})", op.token.lexeme, print_ast(left), print_ast(right))
        }
        Expr::Logical { op, left, right, .. } => {
            format!("({} {} {})", print_ast(left), op.token.lexeme, print_ast(right))
        }
        Expr::Variable { name, .. } => name.lexeme.clone(),
        Expr::Assignment { name, value, .. } => {
            format!("(= {} {})", name.lexeme, print_ast(value))
        }
        Expr::Call { callee, args, .. } => {
            let rendered_args: Vec<String> = args.iter().map(print_ast).collect();
            if rendered_args.is_empty() {
                format!("(call {})", print_ast(callee))
            } else {
                format!("(call {} {})", print_ast(callee), rendered_args.join(" "))
            }
        }
    }
}

fn literal_text(token: &crate::lexer::Token) -> String {
    match (&token.kind, &token.literal) {
        (_, Literal::Number(n)) => format_number_for_tokens(*n),
        (_, Literal::String(s)) => s.clone(),
        (TokenKind::True, _) => "true".to_owned(),
        (TokenKind::False, _) => "false".to_owned(),
        (TokenKind::Nil, _) => "nil".to_owned(),
        _ => token.lexeme.clone(),
    }
}
