use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgMatches, arg, command};
use symscan_symbols::DEFAULT_BUCKET_LIMIT;

mod commands;
mod error;

use commands::scan::{OutputFormat, ScanOptions, handle_scan};

fn scan_options(matches: &ArgMatches) -> ScanOptions {
    let output_format = match matches.get_one::<String>("output_type").map(String::as_str) {
        Some("tokens") => OutputFormat::Tokens,
        Some("table") => OutputFormat::Table,
        Some("preprocessed") => OutputFormat::Preprocessed,
        _ => OutputFormat::All,
    };

    ScanOptions {
        input_file: matches
            .get_one::<PathBuf>("input_file")
            .cloned()
            .unwrap_or_default(),
        output_file: matches.get_one::<PathBuf>("output_file").cloned(),
        output_format,
        bucket_limit: matches
            .get_one::<usize>("bucket_limit")
            .copied()
            .unwrap_or(DEFAULT_BUCKET_LIMIT),
        record_undeclared: matches.get_flag("record_undeclared"),
        silent: matches.get_flag("silent"),
    }
}

fn get_args() -> ScanOptions {
    let matches = command!()
        .about("Tokenize a C source file and collect its declarations into a symbol table")
        .arg(
            arg!(input_file: <INPUT_FILE> "C source file to scan")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(output_type: -t --"output-type" <OUTPUT_TYPE> "What to print, defaults to all")
                .value_parser(["tokens", "table", "all", "preprocessed"])
                .default_value("all"),
        )
        .arg(
            arg!(bucket_limit: -b --"bucket-limit" <N> "Entries per bucket before it splits")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(arg!(record_undeclared: -u --"record-undeclared" "Record identifiers without a declaration as `not in file`"))
        .arg(
            arg!(output_file: -o --"output-file" <OUTPUT_FILE> "Output file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(arg!(silent: -s --"silent" "Flag to suppress output"))
        .get_matches();

    scan_options(&matches)
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let options = get_args();

    match handle_scan(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
