//! Diagnostics and error reporting for Pizarra analysis runs.
//!
//! Two error channels share one sticky flag: syntax errors carry line, column
//! and the offending lexeme; semantic errors carry a line only. Warnings and
//! infos (from the assignment compatibility matrix) never fail a run.

use std::fmt;

/// Severity and channel of a diagnostic.
///
/// Syntax and Semantic are the two error channels; Warning and Info are
/// advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Syntax,
    Semantic,
    Warning,
    Info,
}

impl Severity {
    /// True if a diagnostic of this severity fails the compilation.
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Syntax | Severity::Semantic)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Syntax => write!(f, "syntax error"),
            Severity::Semantic => write!(f, "semantic error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A single diagnostic recorded during analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// 1-based source line.
    pub line: usize,
    /// 1-based source column; present on the syntax channel only.
    pub column: Option<usize>,
    /// Offending lexeme; present on the syntax channel only.
    pub lexeme: Option<String>,
}

impl Diagnostic {
    pub fn syntax(message: impl Into<String>, line: usize, column: usize, lexeme: impl Into<String>) -> Self {
        Self {
            severity: Severity::Syntax,
            message: message.into(),
            line,
            column: Some(column),
            lexeme: Some(lexeme.into()),
        }
    }

    pub fn semantic(message: impl Into<String>, line: usize) -> Self {
        Self {
            severity: Severity::Semantic,
            message: message.into(),
            line,
            column: None,
            lexeme: None,
        }
    }

    pub fn warning(message: impl Into<String>, line: usize) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            line,
            column: None,
            lexeme: None,
        }
    }

    pub fn info(message: impl Into<String>, line: usize) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
            line,
            column: None,
            lexeme: None,
        }
    }
}

/// Render a diagnostic for terminal display.
///
/// `file_name` is whatever the caller wants the location prefixed with (a
/// path, or `<demo>` for the built-in program).
pub fn render(file_name: &str, diag: &Diagnostic) -> String {
    let mut out = format!("{}: {}\n", diag.severity, diag.message);
    match diag.column {
        Some(col) => out.push_str(&format!("  --> {}:{}:{}", file_name, diag.line, col)),
        None => out.push_str(&format!("  --> {}:{}", file_name, diag.line)),
    }
    if let Some(lexeme) = &diag.lexeme {
        out.push_str(&format!(" (at '{lexeme}')"));
    }
    out.push('\n');
    out
}

// ============================================================================
// Diagnostic sink
// ============================================================================

/// Ordered collection of diagnostics plus the run's sticky error flag.
///
/// The flag is set the first time an error-severity diagnostic is pushed and
/// is never cleared for the lifetime of the value; a fresh run constructs a
/// fresh sink.
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
    has_error: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diag: Diagnostic) {
        if diag.severity.is_error() {
            self.has_error = true;
        }
        self.items.push(diag);
    }

    /// The sticky error flag: true once any syntax or semantic error exists.
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<Diagnostic> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sticky_flag_set_by_errors_only() {
        let mut sink = Diagnostics::new();
        sink.push(Diagnostic::warning("precision loss", 3));
        sink.push(Diagnostic::info("automatic conversion", 4));
        assert!(!sink.has_error());

        sink.push(Diagnostic::semantic("variable 'y' is not declared", 5));
        assert!(sink.has_error());

        // Nothing clears it
        sink.push(Diagnostic::info("automatic conversion", 6));
        assert!(sink.has_error());
    }

    #[test]
    fn test_render_syntax_with_position_and_lexeme() {
        let diag = Diagnostic::syntax("expected ';', found 'entero'", 3, 5, "entero");
        let text = render("ejemplo.pz", &diag);
        assert!(text.starts_with("syntax error: expected ';', found 'entero'"));
        assert!(text.contains("--> ejemplo.pz:3:5"));
        assert!(text.contains("(at 'entero')"));
    }

    #[test]
    fn test_render_semantic_line_only() {
        let diag = Diagnostic::semantic("variable 'y' is not declared", 7);
        let text = render("demo", &diag);
        assert!(text.contains("--> demo:7"));
        assert!(!text.contains(":7:"));
    }
}
