// crates/cli/src/logging.rs
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// `log` records from the engine are forwarded through the subscriber's
/// `tracing-log` bridge. `RUST_LOG` takes precedence over `verbose`.
pub fn init(verbose: bool) {
    let default = if verbose {
        "warn,eml_dater_engine=debug,eml_dater_cli=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
