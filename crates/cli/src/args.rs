// crates/cli/src/args.rs
use std::path::PathBuf;

use clap::{Parser, ValueHint};
use eml_dater_engine::config::DEFAULT_PATTERN;

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "eml_dater",
    version = crate::VERSION,
    about = "Set .eml file dates based on the email Date header"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Path to an .eml file or a directory
    #[arg(default_value = ".", value_hint = ValueHint::AnyPath)]
    pub path: PathBuf,

    /// Process directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Show what would be done without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print a line for every file, not only failures
    #[arg(short, long)]
    pub verbose: bool,

    /// Shell-style file name pattern for directories (`*`, `?`, `[...]`; case-insensitive)
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pub pattern: String,
}
