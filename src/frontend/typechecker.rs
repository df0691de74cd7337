//! Type rules for Pizarra: shallow expression typing plus the assignment,
//! arithmetic and relational compatibility matrices.
//!
//! These are stateless functions over the current token and the symbol table;
//! the parser invokes them inline as grammar rules are recognized, and they
//! record their findings in the shared diagnostic sink. No expression tree is
//! ever materialized: [`expression_type_of`] classifies a *single* token, so a
//! multi-operand expression types as whatever its first token types as. That
//! shallowness is deliberate and preserved.

use std::fmt;

use crate::frontend::diagnostics::{Diagnostic, Diagnostics};
use crate::frontend::lexer::{Token, TokenKind};
use crate::frontend::symbols::SymbolTable;

/// The scalar types of the language, plus `Error` for "type could not be
/// determined". `Error` flows through every rule and is distinguishable from
/// the three real types everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Entero,
    Caracter,
    Real,
    Error,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Entero => write!(f, "entero"),
            DataType::Caracter => write!(f, "caracter"),
            DataType::Real => write!(f, "real"),
            DataType::Error => write!(f, "error"),
        }
    }
}

impl DataType {
    /// The declared type named by a data-type keyword token, if any.
    pub fn from_keyword(kind: &TokenKind) -> Option<DataType> {
        match kind {
            TokenKind::Entero => Some(DataType::Entero),
            TokenKind::Caracter => Some(DataType::Caracter),
            TokenKind::Real => Some(DataType::Real),
            _ => None,
        }
    }
}

// ============================================================================
// Shallow expression typing
// ============================================================================

/// Classify a single token as an expression type.
///
/// Literals type as themselves; an identifier types as its declared type, or
/// `Error` when undeclared. Anything else (for example a `(` opening a
/// parenthesized expression) falls back to the default type for arithmetic
/// expressions, integer.
pub fn expression_type_of(token: &Token, symbols: &SymbolTable) -> DataType {
    match &token.kind {
        TokenKind::Int(_) => DataType::Entero,
        TokenKind::Float(_) => DataType::Real,
        TokenKind::CharLit(_) => DataType::Caracter,
        TokenKind::Ident(name) => match symbols.lookup(name) {
            Some(sym) => sym.ty,
            None => DataType::Error,
        },
        _ => DataType::Entero,
    }
}

// ============================================================================
// Assignment compatibility
// ============================================================================

/// Check the assignment matrix for `target := <expr of expr_ty>`.
///
/// Exact outcomes per (target, source) pair:
/// entero←entero ok; entero←real warn; entero←caracter warn;
/// real←real ok; real←entero info; real←caracter warn;
/// caracter←caracter ok; caracter←entero warn; caracter←real hard error.
/// An `Error` on either side is a hard error. The caller marks the target
/// initialized afterwards on every path, hard errors included.
pub fn check_assignment(
    name: &str,
    target_ty: DataType,
    expr_ty: DataType,
    line: usize,
    sink: &mut Diagnostics,
) {
    match target_ty {
        DataType::Entero => match expr_ty {
            DataType::Entero => {}
            DataType::Real => sink.push(Diagnostic::warning(
                format!("assigning a real to integer variable '{name}' may lose precision"),
                line,
            )),
            DataType::Caracter => sink.push(Diagnostic::warning(
                format!("assigning a character to integer variable '{name}' (automatic conversion)"),
                line,
            )),
            DataType::Error => sink.push(Diagnostic::semantic(
                format!("cannot assign a value of unknown type to integer variable '{name}'"),
                line,
            )),
        },
        DataType::Real => match expr_ty {
            DataType::Real => {}
            DataType::Entero => sink.push(Diagnostic::info(
                format!("automatic conversion from integer to real in assignment to '{name}'"),
                line,
            )),
            DataType::Caracter => sink.push(Diagnostic::warning(
                format!("assigning a character to real variable '{name}' (automatic conversion)"),
                line,
            )),
            DataType::Error => sink.push(Diagnostic::semantic(
                format!("cannot assign a value of unknown type to real variable '{name}'"),
                line,
            )),
        },
        DataType::Caracter => match expr_ty {
            DataType::Caracter => {}
            DataType::Entero => sink.push(Diagnostic::warning(
                format!("assigning an integer to character variable '{name}' (automatic conversion)"),
                line,
            )),
            DataType::Real | DataType::Error => sink.push(Diagnostic::semantic(
                format!("cannot assign a {expr_ty} to character variable '{name}'"),
                line,
            )),
        },
        DataType::Error => sink.push(Diagnostic::semantic(
            format!("variable '{name}' has unknown type"),
            line,
        )),
    }
}

// ============================================================================
// Arithmetic combination
// ============================================================================

/// Result type of `left op right` for the arithmetic operators.
///
/// entero∘entero → entero (with a precision warning on division); any
/// numeric combination involving real → real; caracter∘caracter → entero for
/// `+`/`-` only; caracter∘entero (either order) → entero; everything else is
/// a semantic error and types as `Error`.
///
/// Expression/Term parsing does not call this (operand types are never folded
/// across operators); it is part of the semantic rule set in its own right.
pub fn arithmetic_result_type(
    left: DataType,
    right: DataType,
    op: &TokenKind,
    line: usize,
    sink: &mut Diagnostics,
) -> DataType {
    use DataType::{Caracter, Entero, Real};

    let result = match (left, right) {
        (Entero, Entero) => {
            if *op == TokenKind::Slash {
                sink.push(Diagnostic::warning(
                    "integer division may lose precision".to_string(),
                    line,
                ));
            }
            Some(Entero)
        }
        (Real, Real) | (Real, Entero) | (Entero, Real) => Some(Real),
        (Caracter, Caracter) => {
            // Character arithmetic yields integers, and only for + and -
            matches!(op, TokenKind::Plus | TokenKind::Minus).then_some(Entero)
        }
        (Caracter, Entero) | (Entero, Caracter) => Some(Entero),
        _ => None,
    };

    match result {
        Some(ty) => ty,
        None => {
            sink.push(Diagnostic::semantic(
                format!("invalid arithmetic operation between {left} and {right}"),
                line,
            ));
            DataType::Error
        }
    }
}

// ============================================================================
// Relational compatibility
// ============================================================================

/// Whether `left` and `right` may be compared with a relational operator.
///
/// Equal types compare; the two numeric types compare in either order;
/// caracter and entero compare in either order. Anything else is a semantic
/// error.
pub fn relational_compatible(
    left: DataType,
    right: DataType,
    line: usize,
    sink: &mut Diagnostics,
) -> bool {
    use DataType::{Caracter, Entero, Real};

    let ok = left == right
        || matches!((left, right), (Entero | Real, Entero | Real))
        || matches!((left, right), (Caracter, Entero) | (Entero, Caracter));

    if !ok {
        sink.push(Diagnostic::semantic(
            format!("invalid comparison between {left} and {right}"),
            line,
        ));
    }
    ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::diagnostics::Severity;

    fn token(kind: TokenKind) -> Token {
        Token::new(kind, "", 1, 1)
    }

    #[test]
    fn test_expression_type_of_literals() {
        let symbols = SymbolTable::new();
        assert_eq!(expression_type_of(&token(TokenKind::Int(5)), &symbols), DataType::Entero);
        assert_eq!(expression_type_of(&token(TokenKind::Float(2.5)), &symbols), DataType::Real);
        assert_eq!(
            expression_type_of(&token(TokenKind::CharLit('A')), &symbols),
            DataType::Caracter
        );
    }

    #[test]
    fn test_expression_type_of_identifiers() {
        let mut symbols = SymbolTable::new();
        symbols.insert("r", DataType::Real).unwrap();

        assert_eq!(
            expression_type_of(&token(TokenKind::Ident("r".to_string())), &symbols),
            DataType::Real
        );
        assert_eq!(
            expression_type_of(&token(TokenKind::Ident("nope".to_string())), &symbols),
            DataType::Error
        );
    }

    #[test]
    fn test_expression_type_default_is_integer() {
        // A parenthesized expression (or any non-literal start) falls back to
        // the default arithmetic type.
        let symbols = SymbolTable::new();
        assert_eq!(expression_type_of(&token(TokenKind::LParen), &symbols), DataType::Entero);
        assert_eq!(expression_type_of(&token(TokenKind::Semicolon), &symbols), DataType::Entero);
    }

    /// Outcome class of one cell of the assignment matrix.
    #[derive(Debug, PartialEq)]
    enum Outcome {
        Silent,
        Warn,
        Info,
        Hard,
    }

    fn assign_outcome(target: DataType, source: DataType) -> Outcome {
        let mut sink = Diagnostics::new();
        check_assignment("v", target, source, 1, &mut sink);
        if sink.has_error() {
            Outcome::Hard
        } else {
            match sink.iter().next().map(|d| d.severity) {
                None => Outcome::Silent,
                Some(Severity::Warning) => Outcome::Warn,
                Some(Severity::Info) => Outcome::Info,
                Some(other) => panic!("unexpected severity {other:?}"),
            }
        }
    }

    #[test]
    fn test_assignment_matrix_is_exhaustive() {
        use DataType::{Caracter, Entero, Real};
        let cases = [
            (Entero, Entero, Outcome::Silent),
            (Entero, Real, Outcome::Warn),
            (Entero, Caracter, Outcome::Warn),
            (Real, Real, Outcome::Silent),
            (Real, Entero, Outcome::Info),
            (Real, Caracter, Outcome::Warn),
            (Caracter, Caracter, Outcome::Silent),
            (Caracter, Entero, Outcome::Warn),
            (Caracter, Real, Outcome::Hard),
        ];
        for (target, source, expected) in cases {
            assert_eq!(
                assign_outcome(target, source),
                expected,
                "{target} := {source}"
            );
        }
    }

    #[test]
    fn test_assignment_unknown_types_are_hard_errors() {
        use DataType::{Entero, Error, Real};
        assert_eq!(assign_outcome(Entero, Error), Outcome::Hard);
        assert_eq!(assign_outcome(Real, Error), Outcome::Hard);
        assert_eq!(assign_outcome(Error, Entero), Outcome::Hard);
    }

    #[test]
    fn test_arithmetic_integer_division_warns() {
        let mut sink = Diagnostics::new();
        let ty = arithmetic_result_type(
            DataType::Entero,
            DataType::Entero,
            &TokenKind::Slash,
            1,
            &mut sink,
        );
        assert_eq!(ty, DataType::Entero);
        assert!(!sink.has_error());
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.iter().next().unwrap().severity, Severity::Warning);
    }

    #[test]
    fn test_arithmetic_combinations() {
        use DataType::{Caracter, Entero, Error, Real};
        let mut sink = Diagnostics::new();
        let plus = TokenKind::Plus;
        let star = TokenKind::Star;

        assert_eq!(arithmetic_result_type(Entero, Entero, &plus, 1, &mut sink), Entero);
        assert_eq!(arithmetic_result_type(Real, Entero, &plus, 1, &mut sink), Real);
        assert_eq!(arithmetic_result_type(Entero, Real, &star, 1, &mut sink), Real);
        assert_eq!(arithmetic_result_type(Real, Real, &star, 1, &mut sink), Real);
        assert_eq!(arithmetic_result_type(Caracter, Caracter, &plus, 1, &mut sink), Entero);
        assert_eq!(arithmetic_result_type(Caracter, Entero, &star, 1, &mut sink), Entero);
        assert_eq!(arithmetic_result_type(Entero, Caracter, &plus, 1, &mut sink), Entero);
        assert!(!sink.has_error());

        // caracter * caracter is only defined for + and -
        assert_eq!(arithmetic_result_type(Caracter, Caracter, &star, 1, &mut sink), Error);
        assert!(sink.has_error());
    }

    #[test]
    fn test_arithmetic_with_real_and_character_is_error() {
        let mut sink = Diagnostics::new();
        let ty = arithmetic_result_type(
            DataType::Real,
            DataType::Caracter,
            &TokenKind::Plus,
            3,
            &mut sink,
        );
        assert_eq!(ty, DataType::Error);
        assert!(sink.has_error());
    }

    #[test]
    fn test_relational_matrix() {
        use DataType::{Caracter, Entero, Real};
        let mut sink = Diagnostics::new();

        assert!(relational_compatible(Entero, Entero, 1, &mut sink));
        assert!(relational_compatible(Real, Real, 1, &mut sink));
        assert!(relational_compatible(Caracter, Caracter, 1, &mut sink));
        assert!(relational_compatible(Entero, Real, 1, &mut sink));
        assert!(relational_compatible(Real, Entero, 1, &mut sink));
        assert!(relational_compatible(Caracter, Entero, 1, &mut sink));
        assert!(relational_compatible(Entero, Caracter, 1, &mut sink));
        assert!(!sink.has_error());

        assert!(!relational_compatible(Caracter, Real, 1, &mut sink));
        assert!(!relational_compatible(Real, Caracter, 1, &mut sink));
        assert!(sink.has_error());
    }
}
