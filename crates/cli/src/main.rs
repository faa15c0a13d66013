use clap::Parser;
use eml_dater_cli::args::Args;
use eml_dater_cli::config::Config;
use eml_dater_cli::{app, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let result = Config::try_from(args).and_then(|config| app::run(&config));

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
