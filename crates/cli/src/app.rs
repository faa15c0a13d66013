// crates/cli/src/app.rs
use crate::error::Result;
use crate::presentation;
use eml_dater_engine::config::Config;
use eml_dater_engine::stats::Summary;
use log::debug;

/// Collect, process and report. Returns `None` when there was nothing to do.
///
/// # Errors
///
/// Only the upfront checks fail: a missing root, a non-`.eml` file root or an
/// invalid pattern. Per-file failures are counted in the summary.
pub fn run(config: &Config) -> Result<Option<Summary>> {
    debug!("Running with {config:?}");

    let files = eml_dater_engine::collect(config)?;
    if files.is_empty() {
        let root = std::path::absolute(&config.walk.root)
            .unwrap_or_else(|_| config.walk.root.clone());
        presentation::print_no_files(&root);
        return Ok(None);
    }

    presentation::print_header(files.len(), config);
    let summary = eml_dater_engine::run(config, &files, |path, outcome| {
        presentation::print_outcome(path, outcome, config);
    });
    presentation::print_summary(&summary);

    Ok(Some(summary))
}
