//! The parser's error type.

use crate::lexer::{Token, TokenKind};
use std::fmt::{self, Display};

/// A syntax error raised while parsing. Rendered exactly as
/// `"[line <n>] Error at '<lexeme>': <message>"`, with `<lexeme>` replaced by
/// `"end"` when the offending token is `EOF`.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub line: usize,
    pub at: String,
    pub message: String,
}

impl ParseError {
    pub fn at(token: &Token, message: impl Into<String>) -> Self {
        let at = if matches!(token.kind, TokenKind::Eof) {
            "end".to_owned()
        } else {
            token.lexeme.clone()
        };
        Self {
            line: token.line,
            at,
            message: message.into(),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error at '{}': {}", self.line, self.at, self.message)
    }
}

impl std::error::Error for ParseError {}
