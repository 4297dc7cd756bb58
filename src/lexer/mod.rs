//! # Lexer
//!
//! Scans Lox source text into a flat token stream. Never aborts: unrecognized
//! characters and unterminated strings are reported as [`TokenKind::LexError`]
//! tokens embedded in the stream, in source order, rather than as an early
//! return. Callers decide whether the presence of an error token should abort
//! the rest of the pipeline.

mod token;

pub use token::*;

use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Lookup table from keyword spelling to its `TokenKind`, built once.
static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    use TokenKind::*;
    let mut m = HashMap::new();
    m.insert("and", And);
    m.insert("class", Class);
    m.insert("else", Else);
    m.insert("false", False);
    m.insert("fun", Fun);
    m.insert("for", For);
    m.insert("if", If);
    m.insert("nil", Nil);
    m.insert("or", Or);
    m.insert("print", Print);
    m.insert("return", Return);
    m.insert("super", Super);
    m.insert("this", This);
    m.insert("true", True);
    m.insert("var", Var);
    m.insert("while", While);
    m
});

/// Scans `source` into a token stream, always terminated by exactly one
/// `EOF` token. Returns the tokens alongside a count of `LEX_ERROR` tokens
/// produced along the way.
pub fn lex(source: &str) -> (Vec<Token>, usize) {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.scan();
    let errors = tokens.iter().filter(|t| t.is_error()).count();
    debug!("lexed {} tokens ({} errors)", tokens.len(), errors);
    (tokens, errors)
}

/// Renders a `LEX_ERROR` token the way `tokenize` mode reports it to stderr:
/// `"[line <n>] Error: <message>"`.
pub fn render_lex_error(token: &Token) -> String {
    let message = match token.kind {
        TokenKind::LexError(LexErrorKind::UnexpectedCharacter) => {
            format!("Unexpected character: {}", token.lexeme)
        }
        TokenKind::LexError(LexErrorKind::UnterminatedString) => "Unterminated string.".to_owned(),
        _ => unreachable!("render_lex_error called on a non-error token"),
    };
    format!("[line {}] Error: {message}", token.line)
}

struct Lexer {
    chars: Vec<char>,
    head: usize,
    cursor: usize,
    line: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            head: 0,
            cursor: 0,
            line: 1,
            tokens: Vec::new(),
        }
    }

    fn scan(&mut self) -> Vec<Token> {
        while !self.at_end() {
            self.head = self.cursor;
            self.scan_token();
        }
        self.tokens.push(Token::eof(self.line));
        std::mem::take(&mut self.tokens)
    }

    fn at_end(&self) -> bool {
        self.cursor >= self.chars.len()
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.cursor];
        self.cursor += 1;
        c
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.cursor).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.cursor + 1).copied()
    }

    fn matches(&mut self, expected: char) -> bool {
        if self.peek() != Some(expected) {
            return false;
        }
        self.cursor += 1;
        true
    }

    fn lexeme(&self) -> String {
        self.chars[self.head..self.cursor].iter().collect()
    }

    fn emit(&mut self, kind: TokenKind) {
        let lexeme = self.lexeme();
        self.tokens.push(Token::new(kind, lexeme, Literal::None, self.line));
    }

    fn scan_token(&mut self) {
        use TokenKind::*;
        let c = self.advance();
        match c {
            '(' => self.emit(LeftParen),
            ')' => self.emit(RightParen),
            '{' => self.emit(LeftBrace),
            '}' => self.emit(RightBrace),
            ',' => self.emit(Comma),
            '.' => self.emit(Dot),
            '-' => self.emit(Minus),
            '+' => self.emit(Plus),
            ';' => self.emit(Semicolon),
            '*' => self.emit(Star),
            '!' => {
                let kind = if self.matches('=') { BangEqual } else { Bang };
                self.emit(kind);
            }
            '=' => {
                let kind = if self.matches('=') { EqualEqual } else { Equal };
                self.emit(kind);
            }
            '<' => {
                let kind = if self.matches('=') { LessEqual } else { Less };
                self.emit(kind);
            }
            '>' => {
                let kind = if self.matches('=') {
                    GreaterEqual
                } else {
                    Greater
                };
                self.emit(kind);
            }
            '/' => {
                if self.matches('/') {
                    while self.peek() != Some('\n') && !self.at_end() {
                        self.advance();
                    }
                } else {
                    self.emit(Slash);
                }
            }
            ' ' | '\t' | '\r' => {}
            '\n' | '\u{b}' | '\u{c}' => self.line += 1,
            '"' => self.scan_string(),
            '0'..='9' => self.scan_number(),
            c if c.is_ascii_alphabetic() || c == '_' => self.scan_identifier(),
            other => {
                let line = self.line;
                self.tokens.push(Token::new(
                    LexError(LexErrorKind::UnexpectedCharacter),
                    other.to_string(),
                    Literal::None,
                    line,
                ));
            }
        }
    }

    fn scan_string(&mut self) {
        let start_line = self.line;
        while self.peek() != Some('"') && !self.at_end() {
            if self.peek() == Some('\n') {
                self.line += 1;
            }
            self.advance();
        }

        if self.at_end() {
            self.tokens.push(Token::new(
                TokenKind::LexError(LexErrorKind::UnterminatedString),
                self.lexeme(),
                Literal::None,
                start_line,
            ));
            return;
        }

        // consume the closing quote
        self.advance();

        let body: String = self.chars[self.head + 1..self.cursor - 1].iter().collect();
        let lexeme = self.lexeme();
        self.tokens.push(Token::new(
            TokenKind::String,
            lexeme,
            Literal::String(body),
            start_line,
        ));
    }

    fn scan_number(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let lexeme = self.lexeme();
        let value: f64 = lexeme.parse().expect("scanned number must be valid f64 syntax");
        self.tokens.push(Token::new(
            TokenKind::Number,
            lexeme,
            Literal::Number(value),
            self.line,
        ));
    }

    fn scan_identifier(&mut self) {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let lexeme = self.lexeme();
        let kind = KEYWORDS.get(lexeme.as_str()).copied().unwrap_or(TokenKind::Identifier);
        self.emit(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn empty_source_is_just_eof() {
        let (tokens, errors) = lex("");
        assert_eq!(errors, 0);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(tokens[0].line, 1);
    }

    #[test]
    fn single_and_double_char_operators() {
        let (tokens, errors) = lex("! != = == > >= < <=");
        assert_eq!(errors, 0);
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Bang,
                TokenKind::BangEqual,
                TokenKind::Equal,
                TokenKind::EqualEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn line_comment_consumes_to_end_of_line() {
        let (tokens, _) = lex("// whole line\nvar");
        assert_eq!(kinds(&tokens), vec![TokenKind::Var, TokenKind::Eof]);
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn string_literal_strips_quotes_and_tracks_newlines() {
        let (tokens, errors) = lex("\"a\nb\" true");
        assert_eq!(errors, 0);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].literal, Literal::String("a\nb".into()));
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn unterminated_string_is_a_lex_error() {
        let (tokens, errors) = lex("\"never closed");
        assert_eq!(errors, 1);
        assert!(matches!(
            tokens[0].kind,
            TokenKind::LexError(LexErrorKind::UnterminatedString)
        ));
    }

    #[test]
    fn unexpected_character_is_a_lex_error() {
        let (tokens, errors) = lex("@");
        assert_eq!(errors, 1);
        assert!(matches!(
            tokens[0].kind,
            TokenKind::LexError(LexErrorKind::UnexpectedCharacter)
        ));
        assert_eq!(tokens[0].lexeme, "@");
    }

    #[test]
    fn integral_number_formats_with_trailing_dot_zero_in_literal_channel() {
        let (tokens, _) = lex("42");
        assert_eq!(tokens[0].literal, Literal::Number(42.0));
        assert_eq!(tokens[0].literal.to_string(), "42.0");
    }

    #[test]
    fn trailing_dot_without_digit_is_not_consumed() {
        let (tokens, _) = lex("42.");
        assert_eq!(kinds(&tokens), vec![TokenKind::Number, TokenKind::Dot, TokenKind::Eof]);
    }

    #[test]
    fn keywords_are_recognized() {
        let (tokens, _) = lex("and class else false fun for if nil or print return super this true var while");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::And,
                TokenKind::Class,
                TokenKind::Else,
                TokenKind::False,
                TokenKind::Fun,
                TokenKind::For,
                TokenKind::If,
                TokenKind::Nil,
                TokenKind::Or,
                TokenKind::Print,
                TokenKind::Return,
                TokenKind::Super,
                TokenKind::This,
                TokenKind::True,
                TokenKind::Var,
                TokenKind::While,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn identifier_allows_digits_and_underscore_after_first_char() {
        let (tokens, _) = lex("_foo_123");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme, "_foo_123");
    }

    #[test]
    fn every_non_empty_source_ends_with_eof() {
        for src in ["1", "var a;", "\"s\"", "+", "  "] {
            let (tokens, _) = lex(src);
            assert!(tokens.len() >= 1);
            assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        }
    }

    #[test]
    fn render_matches_tokenize_mode_wire_format() {
        let (tokens, _) = lex("var language = \"lox\";");
        let rendered: Vec<String> = tokens.iter().map(Token::render).collect();
        assert_eq!(
            rendered,
            vec![
                "VAR var null",
                "IDENTIFIER language null",
                "EQUAL = null",
                "STRING \"lox\" lox",
                "SEMICOLON ; null",
                "EOF  null",
            ]
        );
    }
}
