//! The Pizarra front end: lexing, parsing and semantic checking.
//!
//! Everything happens in one interleaved pass. The [`parser::Parser`] pulls
//! tokens from the [`lexer::Lexer`] one at a time and fires semantic actions
//! as each construct is recognized, so there is no AST and no separate
//! checking phase. A run always terminates with an [`Analysis`] carrying the
//! verdict, the symbol table as built up to the halt point, and every
//! diagnostic recorded along the way.

pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod symbols;
pub mod typechecker;

pub use diagnostics::{Diagnostic, Severity};
pub use symbols::{Symbol, SymbolTable};
pub use typechecker::DataType;

/// Outcome of one front-end run.
///
/// `success` is false exactly when at least one syntax or semantic error was
/// recorded; warnings and informational notes never fail a run. The symbol
/// table and diagnostics are meaningful either way, so callers can report on
/// partial results after a failure.
#[derive(Debug)]
pub struct Analysis {
    pub success: bool,
    pub symbols: SymbolTable,
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    /// Count diagnostics of one severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == severity).count()
    }
}

/// Run the full front end over a source text.
#[tracing::instrument(skip(source), fields(bytes = source.len()))]
pub fn compile(source: &str) -> Analysis {
    let analysis = parser::Parser::new(source).run();
    tracing::debug!(
        success = analysis.success,
        symbols = analysis.symbols.len(),
        diagnostics = analysis.diagnostics.len(),
        "front end finished"
    );
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_clean_program() {
        let analysis = compile("entero contador;\ncontador := 1;\n");
        assert!(analysis.success);
        assert!(analysis.diagnostics.is_empty());
        assert_eq!(analysis.symbols.len(), 1);
    }

    #[test]
    fn test_compile_reports_partial_results() {
        let analysis = compile("entero a;\nb := 2;\n");
        assert!(!analysis.success);
        assert_eq!(analysis.symbols.len(), 1);
        assert_eq!(analysis.count(Severity::Semantic), 1);
    }
}
