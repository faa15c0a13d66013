// crates/engine/src/lib.rs
use std::path::{Path, PathBuf};

pub mod config;
pub mod error;
pub mod extract;
pub mod filesystem;
pub mod processor;
pub mod stats;
pub mod touch;

use crate::config::Config;
use crate::error::Result;
use crate::stats::{FileOutcome, Summary};

/// Enumerate the candidate files selected by `config`.
///
/// # Errors
///
/// Returns an error when the root is missing, is a file without the `.eml`
/// extension, or the pattern is not a valid glob. Nothing has been touched at
/// that point.
pub fn collect(config: &Config) -> Result<Vec<PathBuf>> {
    filesystem::collect_candidates(&config.walk)
}

/// Process `files` in order and count the outcomes.
///
/// `on_outcome` is called once per file right after it is processed. A failure
/// on one file never stops the run.
pub fn run<F>(config: &Config, files: &[PathBuf], mut on_outcome: F) -> Summary
where
    F: FnMut(&Path, &FileOutcome),
{
    let mut summary = Summary::new(files.len());
    for path in files {
        let outcome = processor::process_file(path, config);
        summary.record(&outcome);
        on_outcome(path, &outcome);
    }
    summary
}
