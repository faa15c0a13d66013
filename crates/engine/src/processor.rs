use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::extract::{self, ParsedTimestamp};
use crate::stats::FileOutcome;
use crate::touch;
use log::debug;
use std::path::Path;

/// Read a file as text, dropping byte sequences that are not valid UTF-8.
///
/// # Errors
///
/// Returns `FileRead` if the file cannot be read.
pub fn read_content(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| EngineError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_lossy(&bytes))
}

/// Read `path` and extract its message date.
///
/// # Errors
///
/// Returns `FileRead` if the file cannot be read. A missing or unreadable date is
/// `Ok(None)`.
pub fn extract_from_file(path: &Path) -> Result<Option<ParsedTimestamp>> {
    read_content(path).map(|content| extract::extract(&content))
}

/// Process a single candidate file.
///
/// Never fails: every error ends up in the returned outcome.
pub fn process_file(path: &Path, config: &Config) -> FileOutcome {
    let ts = match extract_from_file(path) {
        Ok(Some(ts)) => ts,
        Ok(None) => return FileOutcome::NoDate,
        Err(e) => return FileOutcome::ReadFailed(e),
    };

    if config.dry_run {
        return FileOutcome::WouldUpdate(ts);
    }

    match touch::set_mtime(path, &ts) {
        Ok(mtime) => {
            debug!("{}: mtime set to {mtime}", path.display());
            FileOutcome::Updated(ts)
        }
        Err(e) => FileOutcome::SetFailed(e),
    }
}

fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}
