use log::debug;
use symscan_symbols::{SymbolTable, collect_declarations};

use super::ScanTarget;
use crate::commands::scan::ScanOptions;
use crate::error::CliError;

pub struct TableTarget;

impl ScanTarget for TableTarget {
    fn render(&self, source: &str, options: &ScanOptions) -> Result<String, CliError> {
        let mut table = SymbolTable::new(options.bucket_limit)?;
        let stats = collect_declarations(source, options.collector_options(), &mut table)?;

        debug!(
            "{} token(s), {} identifier(s), {} symbol(s) recorded, {} duplicate(s) skipped",
            stats.tokens, stats.identifiers, stats.recorded, stats.duplicates
        );

        let output = table.to_string();
        table.destroy();

        Ok(output)
    }
}
