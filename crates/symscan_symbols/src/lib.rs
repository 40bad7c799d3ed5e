//! Symbol records and the table that stores them.
//!
//! A [`Symbol`] is keyed by its lexeme and stored in an extendible hash map
//! through [`SymbolTable`]. The [`DeclarationCollector`] walks a token stream
//! and decides, with a same-line heuristic, which identifiers become symbols.

mod collector;
mod error;
mod symbol;
mod table;

pub use collector::{
    BUILTIN_FUNCTIONS, CollectStats, CollectorOptions, DeclarationCollector, collect_declarations,
    is_builtin, type_size,
};
pub use error::CollectError;
pub use symbol::{FUNCTION_TYPE, GLOBAL_SCOPE, Symbol, UNDECLARED_TYPE, UNKNOWN_SIZE};
pub use table::SymbolTable;

pub use symscan_hashmap::{DEFAULT_BUCKET_LIMIT, InsertError, MapConfig, MapError};
