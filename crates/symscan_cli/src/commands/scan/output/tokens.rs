use std::fmt::Write;

use symscan_lexer::Lexer;

use super::ScanTarget;
use crate::commands::scan::ScanOptions;
use crate::error::CliError;

pub struct TokensTarget;

impl ScanTarget for TokensTarget {
    fn render(&self, source: &str, _options: &ScanOptions) -> Result<String, CliError> {
        let mut output = String::new();

        for (index, token) in Lexer::new(source).enumerate() {
            if index > 0 {
                output.push('\n');
            }
            write!(output, "{token}")?;
        }

        Ok(output)
    }
}
