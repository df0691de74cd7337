//! Plain-text reports printed after a run: the symbol table dump and the
//! table statistics block.

use std::fmt::Write;

use crate::frontend::symbols::{Symbol, SymbolTable, Value};

/// Render the symbol table as an aligned text table, newest symbol first.
///
/// Uninitialized variables show `N/A` in the value column; real values print
/// with two decimals.
pub fn symbol_table(table: &SymbolTable) -> String {
    let mut out = String::new();

    out.push_str("\n=== TABLA DE SIMBOLOS ===\n");
    let _ = writeln!(
        out,
        "{:<15} {:<10} {:<12} {:<10}",
        "Nombre", "Tipo", "Inicializada", "Valor"
    );
    out.push_str("------------------------------------------------\n");

    let mut total = 0usize;
    let mut initialized = 0usize;
    for sym in table.iter() {
        let _ = writeln!(
            out,
            "{:<15} {:<10} {:<12} {:<10}",
            sym.name,
            sym.ty,
            if sym.initialized { "Si" } else { "No" },
            format_value(sym)
        );
        total += 1;
        if sym.initialized {
            initialized += 1;
        }
    }

    out.push_str("================================================\n");
    let _ = writeln!(
        out,
        "Total: {} | Inicializadas: {} | No inicializadas: {}",
        total,
        initialized,
        total - initialized
    );
    out
}

/// Render the statistics block: counts by type and by initialization state.
pub fn statistics(table: &SymbolTable) -> String {
    let stats = table.stats();
    let mut out = String::new();

    out.push_str("\n=== ESTADISTICAS ===\n");
    let _ = writeln!(
        out,
        "Variables: {} (Enteras: {}, Reales: {}, Caracter: {})",
        stats.total, stats.integers, stats.reals, stats.characters
    );
    let _ = writeln!(
        out,
        "Inicializadas: {} | No inicializadas: {}",
        stats.initialized,
        stats.total - stats.initialized
    );
    out
}

fn format_value(sym: &Symbol) -> String {
    if !sym.initialized {
        return "N/A".to_string();
    }
    match sym.value {
        Value::Int(v) => format!("{v}"),
        Value::Char(c) => format!("'{c}'"),
        Value::Real(r) => format!("{r:.2}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::frontend::DataType;

    fn sample_table() -> SymbolTable {
        let mut table = SymbolTable::new();
        table.insert("contador", DataType::Entero).unwrap();
        table.insert("suma", DataType::Real).unwrap();
        table.insert("letra", DataType::Caracter).unwrap();
        table.mark_initialized("suma");
        table
    }

    #[test]
    fn test_symbol_table_report() {
        let report = symbol_table(&sample_table());
        assert!(report.contains("=== TABLA DE SIMBOLOS ==="));
        // Newest first: letra precedes contador
        let letra = report.find("letra").unwrap();
        let contador = report.find("contador").unwrap();
        assert!(letra < contador);
        assert!(report.contains("Total: 3 | Inicializadas: 1 | No inicializadas: 2"));
    }

    #[test]
    fn test_value_formatting() {
        let table = sample_table();
        let report = symbol_table(&table);
        // suma is initialized to its default real value, the rest show N/A
        assert!(report.contains("0.00"));
        assert!(report.contains("N/A"));
    }

    #[test]
    fn test_statistics_report() {
        let report = statistics(&sample_table());
        assert!(report.contains("Variables: 3 (Enteras: 1, Reales: 1, Caracter: 1)"));
        assert!(report.contains("Inicializadas: 1 | No inicializadas: 2"));
    }

    #[test]
    fn test_empty_table() {
        let table = SymbolTable::new();
        assert!(symbol_table(&table).contains("Total: 0"));
        assert!(statistics(&table).contains("Variables: 0"));
    }
}
