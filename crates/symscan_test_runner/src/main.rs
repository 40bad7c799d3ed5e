use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use glob::glob;

const SYMSCAN: &str = "./target/debug/symscan";

#[derive(Clone, Copy)]
enum Report {
    Tokens,
    Table,
}

impl Report {
    fn as_str(self) -> &'static str {
        match self {
            Report::Tokens => "tokens",
            Report::Table => "table",
        }
    }

    fn enumerate() -> impl Iterator<Item = Report> {
        [Report::Tokens, Report::Table].into_iter()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pattern = "tests/**/*.c";
    let mut checked = 0;

    for entry in glob(pattern)? {
        let file_path = entry?;

        for report in Report::enumerate() {
            if let Some(expected_output_path) = expected_output_path(&file_path, report) {
                run_test(&file_path, &expected_output_path, report)?;
                checked += 1;
            }
        }
    }

    println!("{checked} fixture report(s) passed");

    Ok(())
}

/// `foo.c` is checked against `foo.expected.<report>.txt` when it exists.
fn expected_output_path(file_path: &Path, report: Report) -> Option<PathBuf> {
    let base_path = file_path.with_extension(""); // Strip `.c` extension
    let report_path = base_path.with_extension(format!("expected.{}.txt", report.as_str()));

    report_path.exists().then_some(report_path)
}

fn run_test(file_path: &Path, expected_output_path: &Path, report: Report) -> Result<(), String> {
    let expected_output = fs::read_to_string(expected_output_path)
        .map_err(|e| format!("Failed to read {}: {}", expected_output_path.display(), e))?;

    let output = Command::new(SYMSCAN)
        .arg(file_path)
        .args(["--output-type", report.as_str()])
        .output()
        .map_err(|e| format!("Failed to execute {SYMSCAN}: {e}"))?;

    if !output.status.success() {
        return Err(format!(
            "{} exited with {} for {}:\n{}",
            SYMSCAN,
            output.status,
            file_path.display(),
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let actual_output = String::from_utf8_lossy(&output.stdout);

    if actual_output.trim() == expected_output.trim() {
        Ok(())
    } else {
        Err(format!(
            "Test failed for {} (report: {}).\nExpected:\n{}\nActual:\n{}",
            file_path.display(),
            report.as_str(),
            expected_output,
            actual_output
        ))
    }
}
