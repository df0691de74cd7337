#![forbid(unsafe_code)]
//! Pizarra Teaching Language Checker
//!
//! Pizarra is a small imperative teaching language with Spanish keywords
//! (`entero`, `si`, `mientras`, `leer`, ...). This crate provides its front
//! end: a lexer, a recursive-descent parser with inline semantic checks, and
//! a symbol table, all running in a single interleaved pass with no AST. The
//! output is a verdict, a diagnostic list, and the symbol table as built.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`.
//!   The `cli` module enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! Note that malformed source input is never an `Err` anywhere in the front
//! end: lexical problems become in-band error tokens and parse problems
//! become diagnostics, so analysis always runs to a halt point and reports.

pub mod cli;
pub mod frontend;
pub mod version;

pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::parser;
pub use frontend::symbols;
pub use frontend::typechecker;

pub use frontend::{Analysis, DataType, Diagnostic, Severity, Symbol, SymbolTable, compile};
