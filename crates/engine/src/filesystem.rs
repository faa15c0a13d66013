use crate::config::{REQUIRED_EXTENSION, WalkOptions};
use crate::error::{EngineError, Result};
use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Enumerate candidate files under `options.root`.
///
/// A root that is a file is returned as-is when it has the `.eml` extension.
/// A directory is listed (or walked, when recursive) and every regular file
/// whose name matches `options.pattern`, ignoring case, is returned. Files are
/// ordered by name within each directory.
///
/// # Errors
/// Returns `PathNotFound` if the root does not exist, `NotAnEml` for a file root
/// with another extension and `InvalidPattern` if the glob does not compile.
/// Unreadable entries inside the tree are logged and skipped.
pub fn collect_candidates(options: &WalkOptions) -> Result<Vec<PathBuf>> {
    let root = resolve_root(&options.root)?;

    if root.is_file() {
        return if has_required_extension(&root) {
            Ok(vec![root])
        } else {
            Err(EngineError::NotAnEml(root))
        };
    }

    let matcher = build_matcher(&options.pattern)?;

    let mut builder = WalkBuilder::new(&root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .max_depth(if options.recursive { None } else { Some(1) })
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping entry: {e}");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }
        let path = entry.path();
        // `is_file` follows symlinks, so links to regular files are kept.
        if path.file_name().is_some_and(|name| matcher.is_match(name)) && path.is_file() {
            files.push(entry.into_path());
        }
    }

    debug!(
        "Collected {} candidate(s) under {} (pattern '{}', recursive={})",
        files.len(),
        root.display(),
        options.pattern,
        options.recursive
    );
    Ok(files)
}

/// Make `root` absolute and check that it exists.
///
/// # Errors
/// Returns `PathNotFound` when the path cannot be resolved or does not exist.
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    let resolved =
        std::path::absolute(root).map_err(|_| EngineError::PathNotFound(root.to_path_buf()))?;
    if resolved.exists() {
        Ok(resolved)
    } else {
        Err(EngineError::PathNotFound(resolved))
    }
}

/// Case-insensitive check for the `.eml` suffix.
#[must_use]
pub fn has_required_extension(path: &Path) -> bool {
    path.file_name().is_some_and(|name| {
        name.to_string_lossy()
            .to_ascii_lowercase()
            .ends_with(&format!(".{REQUIRED_EXTENSION}"))
    })
}

fn build_matcher(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(&shell_pattern(pattern))
        .case_insensitive(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| EngineError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Rewrite a shell-style pattern into glob syntax.
///
/// Braces have no special meaning and a `[` without a closing `]` is an
/// ordinary character. Everything else passes through unchanged.
fn shell_pattern(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.extend(&chars[i..=end]);
                    i = end;
                }
                None => out.push_str("[[]"),
            },
            '{' => out.push_str("[{]"),
            '}' => out.push_str("[}]"),
            c => out.push(c),
        }
        i += 1;
    }
    out
}

/// Index of the `]` closing the class that opens at `open`.
fn class_end(chars: &[char], open: usize) -> Option<usize> {
    let mut i = open + 1;
    if matches!(chars.get(i), Some('!' | '^')) {
        i += 1;
    }
    // A leading `]` is a member of the class.
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    chars[i.min(chars.len())..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| i + offset)
}
