mod output;

use std::{
    fs::File,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use log::debug;
use symscan_preprocessor::preprocess;
use symscan_symbols::CollectorOptions;

use output::{
    AllTarget, ScanTarget, preprocessed::PreprocessedTarget, table::TableTarget,
    tokens::TokensTarget,
};

use crate::error::CliError;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum OutputFormat {
    Tokens,
    Table,
    All,
    Preprocessed,
}

#[derive(Debug)]
pub struct ScanOptions {
    pub input_file: PathBuf,
    pub output_file: Option<PathBuf>,
    pub output_format: OutputFormat,
    pub bucket_limit: usize,
    pub record_undeclared: bool,
    pub silent: bool,
}

impl ScanOptions {
    pub fn collector_options(&self) -> CollectorOptions {
        CollectorOptions {
            record_undeclared: self.record_undeclared,
        }
    }
}

fn read_source(path: &Path) -> Result<String, CliError> {
    let mut file = File::open(path).map_err(|source| CliError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|err| CliError::Read {
            path: path.to_path_buf(),
            source: err,
        })?;

    Ok(decode_source(bytes))
}

/// Sources in legacy encodings are accepted. Invalid UTF-8 sequences become
/// U+FFFD, one character each, which the lexer reports as `UNKNOWN` outside of
/// comments and literals.
fn decode_source(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|err| {
        debug!("Input is not valid UTF-8: {err}");
        String::from_utf8_lossy(err.as_bytes()).into_owned()
    })
}

fn write_output(path: &Path, output: &str) -> Result<(), CliError> {
    let to_error = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(to_error)?;
    file.write_all(output.as_bytes()).map_err(to_error)?;
    writeln!(file).map_err(to_error)
}

pub fn handle_scan(options: &ScanOptions) -> Result<(), CliError> {
    let source = read_source(&options.input_file)?;
    let source = preprocess(&source);

    debug!(
        "Scanning {} as {:?}",
        options.input_file.display(),
        options.output_format
    );

    let output = match options.output_format {
        OutputFormat::Tokens => TokensTarget.render(&source, options)?,
        OutputFormat::Table => TableTarget.render(&source, options)?,
        OutputFormat::All => AllTarget.render(&source, options)?,
        OutputFormat::Preprocessed => PreprocessedTarget.render(&source, options)?,
    };

    if options.silent {
        return Ok(());
    }

    match &options.output_file {
        Some(path) => write_output(path, &output),
        None => {
            println!("{output}");
            Ok(())
        }
    }
}
