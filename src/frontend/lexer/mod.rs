//! Lexer for the Pizarra teaching language.
//!
//! Handles tokenization including:
//! - Spanish keywords (`entero`, `si`, `mientras`, `repetir`, ...)
//! - Identifiers and literals (integer, real, character, string)
//! - One- and two-character operators (`:=`, `<>`, `<=`, `>=`, ...)
//! - Line comments (`// ...`)
//!
//! The lexer is **pull-based**: the parser calls [`Lexer::next_token`] once per
//! lookahead token, so scanning is interleaved with parsing in a single pass.
//! Lexical problems are reported as in-band [`TokenKind::Error`] tokens rather
//! than aborting the scan; every call advances past at least one character, so
//! the stream always terminates at [`TokenKind::Eof`].

pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_kind};

// ============================================================================
// LEXER STATE
// ============================================================================

/// Pull-based lexer over Pizarra source text.
///
/// Maintains the scan position as both a byte offset (for slicing) and a
/// 1-based line/column pair (for diagnostics). A newline advances the line
/// counter and resets the column to 1.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    /// Byte offset of the next unconsumed character.
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.pos..].chars();
        iter.next(); // skip current
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        let (idx, c) = self.chars.next()?;
        self.pos = idx + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    /// Return the next token and advance the scan position past it.
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let line = self.line;
        let column = self.column;

        let Some(c) = self.peek() else {
            return Token::new(TokenKind::Eof, "EOF", line, column);
        };

        if is_ident_start(c) {
            return self.scan_identifier(line, column);
        }
        if c.is_ascii_digit() {
            return self.scan_number(line, column);
        }
        if c == '\'' {
            return self.scan_char_literal(line, column);
        }
        if c == '"' {
            return self.scan_string_literal(line, column);
        }
        self.scan_operator(line, column)
    }

    /// Skip whitespace and `//` line comments, in any interleaving.
    fn skip_trivia(&mut self) {
        loop {
            while let Some(c) = self.peek() {
                if c == ' ' || c == '\t' || c == '\r' || c == '\n' {
                    self.advance();
                } else {
                    break;
                }
            }
            if self.peek() == Some('/') && self.peek_next() == Some('/') {
                // Consume to end of line; the newline itself is whitespace and
                // falls to the next loop iteration.
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    // ========================================================================
    // Identifiers and keywords
    // ========================================================================

    fn scan_identifier(&mut self, line: usize, column: usize) -> Token {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let kind = keyword_kind(&name).unwrap_or_else(|| TokenKind::Ident(name.clone()));
        Token::new(kind, name, line, column)
    }

    // ========================================================================
    // Numeric literals
    // ========================================================================

    /// Scan an integer or real literal: a maximal digit run, optionally
    /// followed by `.` and a further maximal digit run.
    fn scan_number(&mut self, line: usize, column: usize) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if self.peek() == Some('.') {
            text.push('.');
            self.advance();
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    text.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
            let kind = text
                .parse::<f64>()
                .map(TokenKind::Float)
                .unwrap_or_else(|_| TokenKind::Error("invalid real literal".to_string()));
            return Token::new(kind, text, line, column);
        }

        let kind = text
            .parse::<i64>()
            .map(TokenKind::Int)
            .unwrap_or_else(|_| TokenKind::Error("integer literal out of range".to_string()));
        Token::new(kind, text, line, column)
    }

    // ========================================================================
    // Character and string literals
    // ========================================================================

    /// Scan `'x'`: exactly one payload character between single quotes.
    fn scan_char_literal(&mut self, line: usize, column: usize) -> Token {
        self.advance(); // opening quote

        match self.peek() {
            None | Some('\n') => Token::new(
                TokenKind::Error("unterminated character literal".to_string()),
                "'",
                line,
                column,
            ),
            Some(payload) => {
                self.advance();
                if self.match_char('\'') {
                    Token::new(TokenKind::CharLit(payload), format!("'{payload}'"), line, column)
                } else {
                    Token::new(
                        TokenKind::Error("unterminated character literal".to_string()),
                        format!("'{payload}"),
                        line,
                        column,
                    )
                }
            }
        }
    }

    /// Scan `"..."` up to the closing quote on the same line.
    ///
    /// String literals are tokenized but no grammar production accepts them,
    /// so the parser reports any that survive as syntax errors. This is a
    /// language-scope limitation, not a lexer defect.
    fn scan_string_literal(&mut self, line: usize, column: usize) -> Token {
        self.advance(); // opening quote

        let mut text = String::new();
        loop {
            match self.peek() {
                Some('"') => {
                    self.advance();
                    let lexeme = format!("\"{text}\"");
                    return Token::new(TokenKind::Str(text), lexeme, line, column);
                }
                None | Some('\n') => {
                    return Token::new(
                        TokenKind::Error("unterminated string literal".to_string()),
                        format!("\"{text}"),
                        line,
                        column,
                    );
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
    }

    // ========================================================================
    // Operators and delimiters
    // ========================================================================

    /// Two-character operators are tried by one-character lookahead before
    /// falling back to single-character operators and delimiters.
    fn scan_operator(&mut self, line: usize, column: usize) -> Token {
        // The caller peeked a character, so advance() cannot return None here;
        // fall through to an error token rather than panic if it ever does.
        let Some(c) = self.advance() else {
            return Token::new(TokenKind::Eof, "EOF", line, column);
        };

        let (kind, lexeme): (TokenKind, String) = match c {
            ':' => {
                if self.match_char('=') {
                    (TokenKind::Assign, ":=".to_string())
                } else {
                    (TokenKind::Error("unknown character ':'".to_string()), ":".to_string())
                }
            }
            '<' => {
                if self.match_char('>') {
                    (TokenKind::NotEq, "<>".to_string())
                } else if self.match_char('=') {
                    (TokenKind::LtEq, "<=".to_string())
                } else {
                    (TokenKind::Lt, "<".to_string())
                }
            }
            '>' => {
                if self.match_char('=') {
                    (TokenKind::GtEq, ">=".to_string())
                } else {
                    (TokenKind::Gt, ">".to_string())
                }
            }
            '=' => (TokenKind::Eq, "=".to_string()),
            '+' => (TokenKind::Plus, "+".to_string()),
            '-' => (TokenKind::Minus, "-".to_string()),
            '*' => (TokenKind::Star, "*".to_string()),
            '/' => (TokenKind::Slash, "/".to_string()),
            '%' => (TokenKind::Percent, "%".to_string()),
            '(' => (TokenKind::LParen, "(".to_string()),
            ')' => (TokenKind::RParen, ")".to_string()),
            '{' => (TokenKind::LBrace, "{".to_string()),
            '}' => (TokenKind::RBrace, "}".to_string()),
            ';' => (TokenKind::Semicolon, ";".to_string()),
            ',' => (TokenKind::Comma, ",".to_string()),
            _ => (
                TokenKind::Error(format!("unknown character '{c}'")),
                c.to_string(),
            ),
        };

        Token::new(kind, lexeme, line, column)
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex an entire source string.
///
/// Pulls tokens until end of input; the returned stream always ends with an
/// `Eof` token. Used by the `--lex` debug command and by tests; the parser
/// pulls tokens one at a time instead.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut out = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        out.push(token);
        if done {
            return out;
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
