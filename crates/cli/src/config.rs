// crates/cli/src/config.rs
use crate::args::Args;
use crate::error::AppError;
pub use eml_dater_engine::config::{Config, ConfigBuilder, WalkOptions, WalkOptionsBuilder};

impl TryFrom<Args> for Config {
    type Error = AppError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let walk = WalkOptionsBuilder::default()
            .root(args.path)
            .recursive(args.recursive)
            .pattern(args.pattern)
            .build()?;

        Ok(ConfigBuilder::default()
            .walk(walk)
            .dry_run(args.dry_run)
            .verbose(args.verbose)
            .build()?)
    }
}
