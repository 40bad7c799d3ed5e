use super::ScanTarget;
use crate::commands::scan::ScanOptions;
use crate::error::CliError;

/// The source as the lexer sees it: directives, comments and literal bodies blanked.
pub struct PreprocessedTarget;

impl ScanTarget for PreprocessedTarget {
    fn render(&self, source: &str, _options: &ScanOptions) -> Result<String, CliError> {
        Ok(source.trim_end_matches('\n').to_string())
    }
}
