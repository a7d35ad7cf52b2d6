//! FreiStat Setup Check - Main Entry Point

use clap::Parser;
use setup_cli::{init_logging, load_limits, load_parameters, run_setup};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(
    name = "freistat-setup",
    version,
    about = "Validate a cyclic voltammetry parameter set"
)]
struct Cli {
    /// JSON file with `[name, value]` pairs or a named parameter record
    parameters: PathBuf,

    /// Optional limits file (TOML, JSON or YAML)
    limits: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = load_limits(cli.limits.as_deref()).and_then(|limits| {
        let parameters = load_parameters(&cli.parameters)?;
        run_setup(&parameters, limits)
    });

    match result {
        Ok(outcome) => {
            println!("code: {}", outcome.code);
            println!("{}", outcome.description);
            if let Some(accepted) = outcome.accepted {
                println!("{}", accepted);
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}
