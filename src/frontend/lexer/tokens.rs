//! Token types for the Pizarra lexer.
//!
//! Tokens carry the exact source text they were matched from (`lexeme`) plus
//! the 1-based line/column of their first character. Literal tokens carry
//! their decoded value in the kind itself, so the parser and the type checker
//! never re-parse source text.

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
///
/// ## Notes
/// - Keywords are case-sensitive and match their Spanish spelling exactly.
/// - `Error` is an in-band lexical error: the lexer never aborts, it hands the
///   problem to the parser as a token no production accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keywords: data types ==========
    Entero,   // entero
    Caracter, // caracter
    Real,     // real

    // ========== Keywords: control flow ==========
    Si,       // si
    Sino,     // sino
    Mientras, // mientras
    Repetir,  // repetir
    Hasta,    // hasta

    // ========== Keywords: I/O ==========
    Leer,     // leer
    Escribir, // escribir

    // ========== Word operators ==========
    And, // y
    Or,  // o
    Not, // no

    // ========== Identifiers and literals ==========
    Ident(String),
    Int(i64),
    Float(f64),
    CharLit(char),
    Str(String),

    // ========== Operators ==========
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %
    Assign,  // :=
    Eq,      // =
    NotEq,   // <>
    Lt,      // <
    LtEq,    // <=
    Gt,      // >
    GtEq,    // >=

    // ========== Delimiters ==========
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Semicolon, // ;
    Comma,     // ,

    // ========== Special ==========
    Eof,
    /// Lexical error with a human-readable description.
    Error(String),
}

impl TokenKind {
    /// Short human-readable name for diagnostics ("expected ';', found ...").
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Entero => "'entero'",
            TokenKind::Caracter => "'caracter'",
            TokenKind::Real => "'real'",
            TokenKind::Si => "'si'",
            TokenKind::Sino => "'sino'",
            TokenKind::Mientras => "'mientras'",
            TokenKind::Repetir => "'repetir'",
            TokenKind::Hasta => "'hasta'",
            TokenKind::Leer => "'leer'",
            TokenKind::Escribir => "'escribir'",
            TokenKind::And => "'y'",
            TokenKind::Or => "'o'",
            TokenKind::Not => "'no'",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Int(_) => "integer literal",
            TokenKind::Float(_) => "real literal",
            TokenKind::CharLit(_) => "character literal",
            TokenKind::Str(_) => "string literal",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Assign => "':='",
            TokenKind::Eq => "'='",
            TokenKind::NotEq => "'<>'",
            TokenKind::Lt => "'<'",
            TokenKind::LtEq => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::GtEq => "'>='",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::Eof => "end of input",
            TokenKind::Error(_) => "invalid token",
        }
    }

    /// True for the three data-type keywords that open a declaration.
    pub fn is_data_type(&self) -> bool {
        matches!(self, TokenKind::Entero | TokenKind::Caracter | TokenKind::Real)
    }

    /// True for the six relational operators.
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::LtEq
                | TokenKind::Gt
                | TokenKind::GtEq
        )
    }
}

/// A token with its kind, exact lexeme and source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// 1-based line of the token's first character.
    pub line: usize,
    /// 1-based column of the token's first character.
    pub column: usize,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }
}

/// Resolve an identifier spelling to its keyword kind, if reserved.
///
/// Lookup is case-sensitive: `Si` is an ordinary identifier, `si` is not.
pub fn keyword_kind(name: &str) -> Option<TokenKind> {
    let kind = match name {
        "entero" => TokenKind::Entero,
        "caracter" => TokenKind::Caracter,
        "real" => TokenKind::Real,
        "si" => TokenKind::Si,
        "sino" => TokenKind::Sino,
        "mientras" => TokenKind::Mientras,
        "repetir" => TokenKind::Repetir,
        "hasta" => TokenKind::Hasta,
        "leer" => TokenKind::Leer,
        "escribir" => TokenKind::Escribir,
        "y" => TokenKind::And,
        "o" => TokenKind::Or,
        "no" => TokenKind::Not,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(keyword_kind("entero"), Some(TokenKind::Entero));
        assert_eq!(keyword_kind("mientras"), Some(TokenKind::Mientras));
        assert_eq!(keyword_kind("y"), Some(TokenKind::And));
        assert_eq!(keyword_kind("no"), Some(TokenKind::Not));
        assert_eq!(keyword_kind("contador"), None);
    }

    #[test]
    fn test_keyword_lookup_is_case_sensitive() {
        assert_eq!(keyword_kind("Entero"), None);
        assert_eq!(keyword_kind("SI"), None);
    }

    #[test]
    fn test_relational_predicate() {
        assert!(TokenKind::LtEq.is_relational());
        assert!(TokenKind::NotEq.is_relational());
        assert!(!TokenKind::Assign.is_relational());
    }
}
