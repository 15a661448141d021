#![forbid(unsafe_code)]

//! # Signup
//!
//! ```bash
//! signup check --name Jo --email a@b.com --password 12345678 --confirm-password 12345678
//! signup interactive
//! signup fields
//! ```

use std::process::ExitCode;

use clap::Parser;
use signup_cli::cli::Cli;
use signup_cli::{EXIT_FAILURE, logging, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::debug!(?err, "command failed");
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
