//! hermes - fragmented-market session simulator
//!
//! Runs one session from a JSON configuration (or the reference defaults)
//! and prints the end-of-session report as pretty JSON on stdout.

use hermes_session::{Session, SessionConfig};
use log::error;
use std::process::ExitCode;

fn print_help() {
    eprintln!(
        r#"hermes - fragmented-market session simulator

USAGE:
    hermes [OPTIONS]

OPTIONS:
    --config <PATH>     Load session configuration from a JSON file
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (e.g. debug, hermes_session=debug)

EXAMPLES:
    # Reference calibration, fresh entropy seed
    hermes

    # Batch-auction calibration from a file
    hermes --config batch.json
"#
    );
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut index = 1;
    while index < args.len() {
        match args[index].as_str() {
            "--help" | "-h" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            "--config" | "-c" => {
                index += 1;
                let Some(path) = args.get(index) else {
                    eprintln!("error: --config requires a path argument");
                    return ExitCode::FAILURE;
                };
                config_path = Some(path.clone());
            }
            unknown => {
                eprintln!("error: unknown argument `{unknown}`");
                print_help();
                return ExitCode::FAILURE;
            }
        }
        index += 1;
    }

    match run(config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(source) => {
            error!("session failed: {source}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => SessionConfig::from_file(&path)?,
        None => SessionConfig::default(),
    };
    let mut session = Session::new(config)?;
    let report = session.run()?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
