//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;

use crate::frontend::{self, diagnostics, lexer};

use super::report;
use super::{CliError, CliResult, ExitCode};

/// Built-in demonstration program, embedded at compile time.
const DEMO_SOURCE: &str = include_str!("../../assets/ejemplo.pz");

/// Maximum source file size (10 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions
/// during analysis.
const MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024;

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (10 MB)
pub fn read_source(file_path: &str) -> CliResult<String> {
    // Check file size before reading
    let metadata = fs::metadata(file_path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

/// Check a source file and report on it.
pub fn check_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    Ok(check_source(&source, file_path))
}

/// Check the embedded demonstration program.
pub fn check_demo() -> CliResult<ExitCode> {
    println!("Usando codigo de ejemplo para demostracion:\n");
    println!("CODIGO FUENTE:\n{DEMO_SOURCE}");
    println!("=====================================\n");
    Ok(check_source(DEMO_SOURCE, "<ejemplo>"))
}

/// Run the front end and print diagnostics, the symbol table and statistics.
///
/// The reports print even on a failed run so the user sees how far the
/// analysis got before it halted.
fn check_source(source: &str, file_name: &str) -> ExitCode {
    tracing::info!(file = file_name, "checking source");
    let analysis = frontend::compile(source);

    for diag in &analysis.diagnostics {
        eprint!("{}", diagnostics::render(file_name, diag));
    }

    print!("{}", report::symbol_table(&analysis.symbols));
    print!("{}", report::statistics(&analysis.symbols));

    if analysis.success {
        println!("\nCompilacion exitosa.");
        ExitCode::SUCCESS
    } else {
        println!("\nCompilacion fallida.");
        ExitCode::FAILURE
    }
}

/// Tokenize a file and dump its token stream (debug).
///
/// Lexical errors appear inline as `Error` tokens; their presence makes the
/// dump exit nonzero.
pub fn lex_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lexer::lex(&source);

    let mut had_error = false;
    for tok in &tokens {
        println!("{:?}", tok);
        if matches!(tok.kind, lexer::TokenKind::Error(_)) {
            had_error = true;
        }
    }

    if had_error {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
