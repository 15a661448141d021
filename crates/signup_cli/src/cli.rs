//! Command-line interface for `signup`.
//!
//! # Examples
//!
//! ```bash
//! # Check one submission
//! signup check --name Jo --email a@b.com --password 12345678 --confirm-password 12345678
//!
//! # Check a JSON document, machine-readable output
//! signup check --json submission.json --format json
//!
//! # Drive the form line by line
//! printf 'name=Jo\nsubmit\n' | signup interactive
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Sign-up form with declarative validation.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "signup",
    author,
    version,
    about = "Validate sign-up form submissions",
    long_about = "Validate sign-up form submissions, either one-shot or by driving \
                  the form controller interactively from standard input."
)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, short = 'c', global = true, env = "SIGNUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// `RUST_LOG` takes precedence when set
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Validate a single submission (exit status 1 when rejected)
    Check(CheckArgs),

    /// Drive the form from stdin: `field=value`, `submit`, `show`, `quit`
    Interactive(InteractiveArgs),

    /// List the form's fields
    Fields,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// JSON object of raw values keyed by field (`-` for stdin)
    ///
    /// Flags given alongside override keys from the document
    #[arg(long)]
    pub json: Option<PathBuf>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    #[arg(long)]
    pub confirm_password: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub age: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone, Default)]
pub struct InteractiveArgs {
    /// After stdin closes, wait for a pending success reset before exiting
    #[arg(long)]
    pub drain: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
