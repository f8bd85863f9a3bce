//! semejar - batch similarity computation over a catalog dump
//!
//! Usage:
//!   semejar -i catalog.json -o similar.jsonl
//!   semejar -i catalog.json --only <id> --only <id>   # recompute two entries
//!   semejar -i catalog.json --threads 4 -v

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use semejar_cli::{run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
