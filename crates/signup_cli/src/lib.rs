#![forbid(unsafe_code)]

//! # Signup CLI
//!
//! Terminal front end for [`signup_form`]: one-shot validation of a
//! submission, or an interactive session that drives the form controller
//! from standard input.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod output;

use std::process::ExitCode;

use anyhow::Context;
use signup_form::FormConfig;

use cli::{Cli, Command};

/// Exit status when a submission is rejected.
pub const EXIT_REJECTED: u8 = 1;
/// Exit status for usage, configuration and IO failures.
pub const EXIT_FAILURE: u8 = 2;

/// Loads the configuration named on the command line, or the defaults.
pub fn load_config(cli: &Cli) -> anyhow::Result<FormConfig> {
    match &cli.config {
        Some(path) => FormConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(FormConfig::default()),
    }
}

/// Runs a parsed command line and returns the process exit status.
pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(cli)?;
    let color = !cli.no_color;

    match &cli.command {
        Command::Check(args) => {
            let mut stdout = std::io::stdout().lock();
            let accepted = commands::check(args, &config, color, &mut stdout)?;
            Ok(if accepted {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_REJECTED)
            })
        }
        Command::Interactive(args) => {
            commands::interactive(args, config, color)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Fields => {
            commands::fields(&mut std::io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
