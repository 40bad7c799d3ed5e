use std::fmt::{self, Display};

use symscan_hashmap::{ExtendibleMap, InsertError, MapConfig, MapError};

use crate::symbol::Symbol;

/// Symbols by lexeme. The first symbol recorded for a lexeme wins.
#[derive(Debug, Default)]
pub struct SymbolTable {
    map: ExtendibleMap<Symbol>,
}

impl SymbolTable {
    pub fn new(bucket_limit: usize) -> Result<Self, MapError> {
        Ok(SymbolTable {
            map: ExtendibleMap::new(bucket_limit)?,
        })
    }

    pub fn with_config(config: MapConfig) -> Result<Self, MapError> {
        Ok(SymbolTable {
            map: ExtendibleMap::with_config(config)?,
        })
    }

    /// Stores `symbol` unless its lexeme is already present, in which case the
    /// symbol is handed back with [`MapError::DuplicateKey`].
    pub fn insert(&mut self, symbol: Symbol) -> Result<(), InsertError<Symbol>> {
        self.map.insert(symbol)
    }

    pub fn get(&self, lexeme: &str) -> Option<&Symbol> {
        self.map.find(lexeme)
    }

    pub fn contains(&self, lexeme: &str) -> bool {
        self.map.contains_key(lexeme)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Symbols in dump order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.map.iter()
    }

    /// Symbols in dump order, each paired with the first directory slot of its bucket.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &Symbol)> {
        self.map
            .buckets()
            .flat_map(|(slot, bucket)| bucket.iter().map(move |symbol| (slot, symbol)))
    }

    pub fn map(&self) -> &ExtendibleMap<Symbol> {
        &self.map
    }

    /// Releases the table. Returns the number of distinct buckets freed.
    pub fn destroy(self) -> usize {
        self.map.destroy()
    }
}

impl Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Symbol Table ===")?;
        writeln!(f)?;

        for (slot, symbol) in self.rows() {
            writeln!(
                f,
                "hash: {slot:<4} | lexeme: {:<15} | size: {:<4} | type: {:<12} | scope: {}",
                symbol.lexeme, symbol.size, symbol.symbol_type, symbol.scope
            )?;
        }

        writeln!(f)?;
        write!(f, "====================")
    }
}
