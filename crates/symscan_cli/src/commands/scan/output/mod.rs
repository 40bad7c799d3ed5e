pub mod preprocessed;
pub mod table;
pub mod tokens;

use super::ScanOptions;
use crate::error::CliError;

/// One kind of report over an already preprocessed source.
pub trait ScanTarget {
    fn render(&self, source: &str, options: &ScanOptions) -> Result<String, CliError>;
}

/// The token stream followed by the symbol table.
pub struct AllTarget;

impl ScanTarget for AllTarget {
    fn render(&self, source: &str, options: &ScanOptions) -> Result<String, CliError> {
        let tokens = tokens::TokensTarget.render(source, options)?;
        let table = table::TableTarget.render(source, options)?;

        Ok(format!("{tokens}\n\n{table}"))
    }
}
