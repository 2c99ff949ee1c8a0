use clap::Parser;
use std::process::ExitCode;

use slider_puzzle::cli::{self, Args};

fn main() -> ExitCode {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    match cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
