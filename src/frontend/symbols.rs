//! Symbol table for Pizarra's single global scope.
//!
//! Declared variables live in an insertion-ordered collection with
//! most-recent-first lookup and iteration, matching the prepend-only storage
//! the table models. Names are unique, so the lookup order is unobservable
//! except through the printed report, whose newest-first row order is part of
//! the contract.

use thiserror::Error;

use crate::frontend::typechecker::DataType;

/// Maximum accepted identifier length, in characters.
///
/// Names of this length or longer are rejected at declaration time.
pub const MAX_NAME_LEN: usize = 30;

/// Default-initialized value slot of a symbol.
///
/// The analysis never evaluates expressions, so this slot keeps its type's
/// zero value for the whole run; only the `initialized` flag ever changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Char(char),
    Real(f64),
}

impl Value {
    /// The zero value for a declared type.
    pub fn default_for(ty: DataType) -> Self {
        match ty {
            DataType::Caracter => Value::Char('\0'),
            DataType::Real => Value::Real(0.0),
            DataType::Entero | DataType::Error => Value::Int(0),
        }
    }
}

/// A declared variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: DataType,
    pub value: Value,
    /// Set the first time the variable is assigned to or read into.
    pub initialized: bool,
}

/// Why a declaration was rejected.
///
/// The three causes are distinct on purpose: collapsing them into one
/// "already declared" message hides what actually went wrong.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeclareError {
    #[error("variable '{0}' is already declared")]
    AlreadyDeclared(String),
    #[error("variable name '{0}' is too long (limit {limit} characters)", limit = MAX_NAME_LEN - 1)]
    NameTooLong(String),
    #[error("empty variable name")]
    EmptyName,
}

// ============================================================================
// SYMBOL TABLE
// ============================================================================

/// Insertion-ordered collection of declared variables.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a declared variable by name. Linear scan, newest declaration
    /// first.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().rev().find(|s| s.name == name)
    }

    /// Declare a new variable with the zero value for its type.
    ///
    /// ## Errors
    /// Rejects, without mutating the table, a name that is already declared,
    /// empty, or at least [`MAX_NAME_LEN`] characters long.
    pub fn insert(&mut self, name: &str, ty: DataType) -> Result<(), DeclareError> {
        if self.lookup(name).is_some() {
            return Err(DeclareError::AlreadyDeclared(name.to_string()));
        }
        if name.is_empty() {
            return Err(DeclareError::EmptyName);
        }
        if name.len() >= MAX_NAME_LEN {
            return Err(DeclareError::NameTooLong(name.to_string()));
        }

        self.symbols.push(Symbol {
            name: name.to_string(),
            ty,
            value: Value::default_for(ty),
            initialized: false,
        });
        Ok(())
    }

    /// Flip a variable's "has received a value" flag. Returns false if the
    /// name is not declared.
    pub fn mark_initialized(&mut self, name: &str) -> bool {
        match self.symbols.iter_mut().rev().find(|s| s.name == name) {
            Some(sym) => {
                sym.initialized = true;
                true
            }
            None => false,
        }
    }

    /// Iterate declared variables, newest first (report row order).
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Aggregate counts for the statistics report.
    pub fn stats(&self) -> TableStats {
        let mut stats = TableStats::default();
        for sym in &self.symbols {
            stats.total += 1;
            if sym.initialized {
                stats.initialized += 1;
            }
            match sym.ty {
                DataType::Entero => stats.integers += 1,
                DataType::Real => stats.reals += 1,
                DataType::Caracter => stats.characters += 1,
                DataType::Error => {}
            }
        }
        stats
    }
}

/// Symbol counts by type and initialization state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    pub total: usize,
    pub initialized: usize,
    pub integers: usize,
    pub reals: usize,
    pub characters: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut table = SymbolTable::new();
        table.insert("contador", DataType::Entero).unwrap();
        table.insert("promedio", DataType::Real).unwrap();

        let sym = table.lookup("contador").unwrap();
        assert_eq!(sym.ty, DataType::Entero);
        assert_eq!(sym.value, Value::Int(0));
        assert!(!sym.initialized);

        assert!(table.lookup("letra").is_none());
    }

    #[test]
    fn test_duplicate_is_rejected_without_mutation() {
        let mut table = SymbolTable::new();
        table.insert("x", DataType::Entero).unwrap();
        let err = table.insert("x", DataType::Real).unwrap_err();
        assert_eq!(err, DeclareError::AlreadyDeclared("x".to_string()));

        // First declaration survives untouched
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("x").unwrap().ty, DataType::Entero);
    }

    #[test]
    fn test_name_length_limit() {
        let mut table = SymbolTable::new();
        let at_limit = "a".repeat(MAX_NAME_LEN - 1);
        let over = "a".repeat(MAX_NAME_LEN);

        table.insert(&at_limit, DataType::Entero).unwrap();
        let err = table.insert(&over, DataType::Entero).unwrap_err();
        assert!(matches!(err, DeclareError::NameTooLong(_)));
        assert_eq!(table.len(), 1);

        // The rendered message names the limit, not the offending length
        assert_eq!(
            err.to_string(),
            format!("variable name '{over}' is too long (limit 29 characters)")
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut table = SymbolTable::new();
        assert_eq!(table.insert("", DataType::Real), Err(DeclareError::EmptyName));
        assert!(table.is_empty());
    }

    #[test]
    fn test_iteration_order_is_newest_first() {
        let mut table = SymbolTable::new();
        table.insert("a", DataType::Entero).unwrap();
        table.insert("b", DataType::Real).unwrap();
        table.insert("c", DataType::Caracter).unwrap();

        let names: Vec<&str> = table.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_mark_initialized() {
        let mut table = SymbolTable::new();
        table.insert("x", DataType::Entero).unwrap();
        assert!(table.mark_initialized("x"));
        assert!(table.lookup("x").unwrap().initialized);
        // Value slot stays at its default
        assert_eq!(table.lookup("x").unwrap().value, Value::Int(0));

        assert!(!table.mark_initialized("y"));
    }

    #[test]
    fn test_stats() {
        let mut table = SymbolTable::new();
        table.insert("a", DataType::Entero).unwrap();
        table.insert("b", DataType::Entero).unwrap();
        table.insert("r", DataType::Real).unwrap();
        table.insert("c", DataType::Caracter).unwrap();
        table.mark_initialized("a");

        let stats = table.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.initialized, 1);
        assert_eq!(stats.integers, 2);
        assert_eq!(stats.reals, 1);
        assert_eq!(stats.characters, 1);
    }

    #[test]
    fn test_default_values_per_type() {
        assert_eq!(Value::default_for(DataType::Entero), Value::Int(0));
        assert_eq!(Value::default_for(DataType::Caracter), Value::Char('\0'));
        assert_eq!(Value::default_for(DataType::Real), Value::Real(0.0));
    }
}
