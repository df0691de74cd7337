//! Recursive-descent parser for Pizarra.
//!
//! One method per grammar nonterminal, driven by a single token of lookahead
//! pulled from the [`Lexer`] on demand. There is no AST: semantic actions
//! (declaration insertion, identifier lookup, assignment compatibility) fire
//! inline at the point each construct is recognized.
//!
//! ## Error recovery
//! Nothing unwinds. [`Parser::expect`] records a syntax error on a mismatch
//! but still consumes the unexpected token so scanning keeps making progress,
//! which lets several problems in one statement surface in a single run. The
//! two structural loops (top-level program, block body) stop admitting
//! statements once the sticky error flag is set, so a run halts at the next
//! loop boundary rather than at the exact point of error.

use std::mem;

use crate::frontend::Analysis;
use crate::frontend::diagnostics::{Diagnostic, Diagnostics};
use crate::frontend::lexer::{Lexer, Token, TokenKind};
use crate::frontend::symbols::SymbolTable;
use crate::frontend::typechecker::{self, DataType};

/// Parser state: the whole per-run compilation state lives here, constructed
/// fresh for every run, so nothing leaks between compilations.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    symbols: SymbolTable,
    diagnostics: Diagnostics,
}

impl<'a> Parser<'a> {
    /// Create a parser over a source text and prime the lookahead.
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            symbols: SymbolTable::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Drive the full grammar and return the analysis outcome.
    pub fn run(mut self) -> Analysis {
        self.program();
        Analysis {
            success: !self.diagnostics.has_error(),
            symbols: self.symbols,
            diagnostics: self.diagnostics.into_items(),
        }
    }

    // ========================================================================
    // Lookahead handling
    // ========================================================================

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    fn halted(&self) -> bool {
        self.diagnostics.has_error()
    }

    /// Consume the lookahead if its kind matches `expected`; otherwise record
    /// a syntax error and consume the unexpected token anyway.
    fn expect(&mut self, expected: TokenKind) {
        if mem::discriminant(&self.current.kind) == mem::discriminant(&expected) {
            self.advance();
        } else {
            self.syntax_error(format!("expected {}, found {}", expected.name(), self.found()));
            self.advance();
        }
    }

    /// Describe the lookahead for an error message.
    fn found(&self) -> String {
        match &self.current.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Error(msg) => format!("invalid token ({msg})"),
            _ => format!("'{}'", self.current.lexeme),
        }
    }

    fn syntax_error(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::syntax(
            message,
            self.current.line,
            self.current.column,
            self.current.lexeme.clone(),
        ));
    }

    fn semantic_error(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::semantic(message, self.current.line));
    }

    // ========================================================================
    // Program := { Declaration | Statement }
    // ========================================================================

    fn program(&mut self) {
        while self.current.kind != TokenKind::Eof && !self.halted() {
            if self.current.kind.is_data_type() {
                self.declaration();
            } else {
                self.statement();
            }
        }
    }

    // ========================================================================
    // Declaration := DataTypeKw Identifier { ',' Identifier } ';'
    // ========================================================================

    fn declaration(&mut self) {
        // Top-level dispatch guarantees a data-type keyword here
        let ty = DataType::from_keyword(&self.current.kind).unwrap_or(DataType::Error);
        self.advance();

        self.declare_identifier(ty);
        while self.current.kind == TokenKind::Comma {
            self.advance();
            self.declare_identifier(ty);
        }
        self.expect(TokenKind::Semicolon);
    }

    /// Insert one declared name into the symbol table. Rejections surface on
    /// the syntax channel, with the rejection cause spelled out.
    fn declare_identifier(&mut self, ty: DataType) {
        let TokenKind::Ident(name) = &self.current.kind else {
            self.syntax_error(format!("expected identifier, found {}", self.found()));
            return;
        };
        let name = name.clone();
        if let Err(err) = self.symbols.insert(&name, ty) {
            self.syntax_error(err.to_string());
        }
        self.advance();
    }

    // ========================================================================
    // Statement dispatch
    // ========================================================================

    fn statement(&mut self) {
        match &self.current.kind {
            TokenKind::Ident(_) => self.assignment(),
            TokenKind::Si => self.if_statement(),
            TokenKind::Mientras => self.while_statement(),
            TokenKind::Repetir => self.repeat_statement(),
            TokenKind::Leer => self.read_statement(),
            TokenKind::Escribir => self.write_statement(),
            _ => {
                self.syntax_error(format!("not a valid statement: {}", self.found()));
                // Best-effort resynchronization: discard one token before the
                // enclosing loop re-checks the halt condition.
                self.advance();
            }
        }
    }

    // ========================================================================
    // Assignment := Identifier ':=' Expression ';'
    // ========================================================================

    fn assignment(&mut self) {
        let target = self.assignment_target();
        self.expect(TokenKind::Assign);

        // Shallow typing: the right-hand side types as its first token does.
        let line = self.current.line;
        let expr_ty = typechecker::expression_type_of(&self.current, &self.symbols);
        self.expression();

        if let Some((name, ty)) = target {
            typechecker::check_assignment(&name, ty, expr_ty, line, &mut self.diagnostics);
            // Every outcome of the matrix marks the target initialized, hard
            // errors included, so one bad assignment does not cascade.
            self.symbols.mark_initialized(&name);
        }
        self.expect(TokenKind::Semicolon);
    }

    fn assignment_target(&mut self) -> Option<(String, DataType)> {
        let TokenKind::Ident(name) = &self.current.kind else {
            self.syntax_error(format!("expected identifier in assignment, found {}", self.found()));
            return None;
        };
        let name = name.clone();
        let target = match self.symbols.lookup(&name) {
            Some(sym) => Some((name.clone(), sym.ty)),
            None => {
                self.semantic_error(format!("variable '{name}' is not declared"));
                None
            }
        };
        self.advance();
        target
    }

    // ========================================================================
    // Control flow statements
    // ========================================================================

    /// If := 'si' '(' Condition ')' Block [ 'sino' Block ]
    fn if_statement(&mut self) {
        self.expect(TokenKind::Si);
        self.expect(TokenKind::LParen);
        self.condition();
        self.expect(TokenKind::RParen);
        self.block();

        if self.current.kind == TokenKind::Sino {
            self.advance();
            self.block();
        }
    }

    /// While := 'mientras' '(' Condition ')' Block
    fn while_statement(&mut self) {
        self.expect(TokenKind::Mientras);
        self.expect(TokenKind::LParen);
        self.condition();
        self.expect(TokenKind::RParen);
        self.block();
    }

    /// Repeat := 'repetir' Block 'hasta' '(' Condition ')' ';'
    fn repeat_statement(&mut self) {
        self.expect(TokenKind::Repetir);
        self.block();
        self.expect(TokenKind::Hasta);
        self.expect(TokenKind::LParen);
        self.condition();
        self.expect(TokenKind::RParen);
        self.expect(TokenKind::Semicolon);
    }

    // ========================================================================
    // I/O statements
    // ========================================================================

    /// Read := 'leer' '(' Identifier ')' ';'
    fn read_statement(&mut self) {
        self.expect(TokenKind::Leer);
        self.expect(TokenKind::LParen);
        self.read_target();
        self.expect(TokenKind::RParen);
        self.expect(TokenKind::Semicolon);
    }

    fn read_target(&mut self) {
        let TokenKind::Ident(name) = &self.current.kind else {
            self.syntax_error(format!("expected identifier in 'leer', found {}", self.found()));
            return;
        };
        let name = name.clone();
        if self.symbols.lookup(&name).is_some() {
            // A read always hands the variable a value; no input is consumed
            // (this is a checker, not an interpreter).
            self.symbols.mark_initialized(&name);
        } else {
            self.semantic_error(format!("variable '{name}' is not declared"));
        }
        self.advance();
    }

    /// Write := 'escribir' '(' Expression ')' ';'
    fn write_statement(&mut self) {
        self.expect(TokenKind::Escribir);
        self.expect(TokenKind::LParen);
        self.expression();
        self.expect(TokenKind::RParen);
        self.expect(TokenKind::Semicolon);
    }

    /// Block := '{' { Statement } '}'
    fn block(&mut self) {
        self.expect(TokenKind::LBrace);
        while self.current.kind != TokenKind::RBrace
            && self.current.kind != TokenKind::Eof
            && !self.halted()
        {
            self.statement();
        }
        self.expect(TokenKind::RBrace);
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Expression := Term { ('+'|'-') Term }
    fn expression(&mut self) {
        self.term();
        while matches!(self.current.kind, TokenKind::Plus | TokenKind::Minus) {
            self.advance();
            self.term();
        }
    }

    /// Term := Factor { ('*'|'/'|'%') Factor }
    fn term(&mut self) {
        self.factor();
        while matches!(
            self.current.kind,
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent
        ) {
            self.advance();
            self.factor();
        }
    }

    /// Factor := Identifier | IntLit | RealLit | CharLit | '(' Expression ')'
    fn factor(&mut self) {
        match &self.current.kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                if self.symbols.lookup(&name).is_none() {
                    self.semantic_error(format!("variable '{name}' is not declared"));
                }
                self.advance();
            }
            TokenKind::Int(_) | TokenKind::Float(_) | TokenKind::CharLit(_) => {
                self.advance();
            }
            TokenKind::LParen => {
                self.advance();
                self.expression();
                self.expect(TokenKind::RParen);
            }
            _ => {
                // No token is consumed here; the enclosing loops stop on the
                // sticky flag at their next boundary.
                self.syntax_error(format!(
                    "expected identifier, literal or '(', found {}",
                    self.found()
                ));
            }
        }
    }

    // ========================================================================
    // Conditions
    // ========================================================================

    /// Condition := Expression RelOp Expression
    ///              { ('y'|'o') Condition } [ 'no' Condition ]
    ///
    /// The relational operator is mandatory; its absence is a syntax error,
    /// but parsing still proceeds to the logical-operator checks.
    fn condition(&mut self) {
        self.expression();

        if self.current.kind.is_relational() {
            self.advance();
            self.expression();
        } else {
            self.syntax_error(format!(
                "expected relational operator in condition, found {}",
                self.found()
            ));
        }

        while matches!(self.current.kind, TokenKind::And | TokenKind::Or) {
            self.advance();
            self.condition();
        }

        if self.current.kind == TokenKind::Not {
            self.advance();
            self.condition();
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
