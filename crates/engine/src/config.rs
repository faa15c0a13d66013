use derive_builder::Builder;
use std::path::PathBuf;

/// Glob applied to file names in directory mode.
pub const DEFAULT_PATTERN: &str = "*.eml";

/// Extension a directly named file must carry.
pub const REQUIRED_EXTENSION: &str = "eml";

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct WalkOptions {
    #[builder(default = "PathBuf::from(\".\")")]
    pub root: PathBuf,
    #[builder(default)]
    pub recursive: bool,
    #[builder(default = "DEFAULT_PATTERN.to_string()")]
    pub pattern: String,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            recursive: false,
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Builder)]
#[builder(setter(into))]
pub struct Config {
    #[builder(default)]
    pub walk: WalkOptions,
    /// Report intended changes without touching any file.
    #[builder(default)]
    pub dry_run: bool,
    #[builder(default)]
    pub verbose: bool,
}
