// crates/cli/src/presentation.rs
use eml_dater_engine::config::Config;
use eml_dater_engine::error::EngineError;
use eml_dater_engine::stats::{FileOutcome, Summary};
use std::error::Error;
use std::path::Path;

pub fn print_no_files(root: &Path) {
    println!("No .eml files found in: {}", root.display());
}

pub fn print_header(count: usize, config: &Config) {
    println!("Found {count} .eml file(s) to process");
    if config.dry_run {
        println!("DRY RUN MODE - No files will be modified");
    }
}

/// Print the lines for one processed file.
pub fn print_outcome(path: &Path, outcome: &FileOutcome, config: &Config) {
    for line in outcome_lines(path, outcome, config) {
        println!("{line}");
    }
}

/// Lines reported for one processed file.
///
/// Read and set failures are always shown. Successful updates and missing
/// dates are shown only in verbose mode; dry-run lines are always shown.
fn outcome_lines(path: &Path, outcome: &FileOutcome, config: &Config) -> Vec<String> {
    let name = display_name(path);
    match outcome {
        FileOutcome::WouldUpdate(ts) => vec![format!("Would set {name} to: {ts}")],
        FileOutcome::Updated(ts) if config.verbose => vec![format!("Set {name} to: {ts}")],
        FileOutcome::NoDate if config.verbose => {
            vec![format!("Could not extract date from: {name}")]
        }
        FileOutcome::Updated(_) | FileOutcome::NoDate => Vec::new(),
        FileOutcome::ReadFailed(err) => {
            vec![format!("Error reading {}: {}", path.display(), cause(err))]
        }
        FileOutcome::SetFailed(err) => vec![
            format!("Error setting date for {}: {}", path.display(), cause(err)),
            format!("Failed to set date for: {name}"),
        ],
    }
}

pub fn print_summary(summary: &Summary) {
    println!();
    println!("Summary:");
    println!("Successfully processed: {}", summary.succeeded);
    println!("Failed: {}", summary.failed);
    println!("Total files: {}", summary.total);
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Underlying error text, without the path already printed alongside it.
fn cause(err: &EngineError) -> String {
    err.source()
        .map_or_else(|| err.to_string(), ToString::to_string)
}
