//! Subcommand implementations.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, bail};
use signup_form::{
    Event, FieldChange, FieldName, FieldValues, FormConfig, FormState, Input, Program, SignupForm,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::cli::{CheckArgs, InteractiveArgs, OutputFormat};
use crate::output::{CheckReport, TerminalView};

// -----------------------------------------------------------------------------
// check
// -----------------------------------------------------------------------------

/// Collects raw values from the JSON document (if any) and the flags.
pub fn collect_values(args: &CheckArgs) -> anyhow::Result<FieldValues> {
    let mut values = match &args.json {
        Some(path) => read_json(path)?,
        None => FieldValues::new(),
    };
    let overrides = [
        (FieldName::Name, &args.name),
        (FieldName::Email, &args.email),
        (FieldName::Password, &args.password),
        (FieldName::ConfirmPassword, &args.confirm_password),
        (FieldName::Phone, &args.phone),
        (FieldName::Age, &args.age),
    ];
    for (field, value) in overrides {
        if let Some(value) = value {
            values.set(field, value.clone());
        }
    }
    Ok(values)
}

fn read_json(path: &Path) -> anyhow::Result<FieldValues> {
    let source = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read submission from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    let values = serde_json::from_str(&source)
        .map_err(signup_form::FormError::from)
        .with_context(|| format!("invalid submission document {}", path.display()))?;
    Ok(values)
}

/// Validates one submission and writes the report. Returns whether it was
/// accepted.
pub fn check(
    args: &CheckArgs,
    config: &FormConfig,
    color: bool,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let values = collect_values(args)?;
    let result = signup_form::check_with(&values, &config.validation);

    if let signup_form::ValidationResult::Accepted(payload) = &result {
        tracing::info!(?payload, "form submitted");
    }

    let report = CheckReport::new(&result);
    match args.format {
        OutputFormat::Text => writeln!(out, "{}", report.to_text(color))?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(report.accepted)
}

// -----------------------------------------------------------------------------
// interactive
// -----------------------------------------------------------------------------

/// Parses one line of interactive input. Blank lines yield `None`.
pub fn parse_line(line: &str) -> anyhow::Result<Option<Input>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let input = match trimmed {
        "submit" => Input::Event(Event::Submit),
        "show" => Input::Refresh,
        "quit" | "exit" => Input::Quit,
        _ => {
            let Some((key, value)) = line.trim_end_matches(['\r', '\n']).split_once('=') else {
                bail!("unrecognized command: {trimmed} (expected field=value, submit, show or quit)");
            };
            Input::Event(Event::FieldChanged(FieldChange::parse(key.trim(), value)?))
        }
    };
    Ok(Some(input))
}

/// Feeds lines from `reader` into a form rendered on `out`.
pub async fn drive<R, W>(
    reader: R,
    out: W,
    config: FormConfig,
    args: &InteractiveArgs,
    color: bool,
) -> FormState
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let (tx, rx) = mpsc::channel(32);
    let mut program = Program::new(SignupForm::new(config), TerminalView::new(out, color));
    if args.drain {
        program = program.with_drain_resets();
    }

    let feed = async move {
        let mut lines = reader.lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(err) => {
                    tracing::error!(%err, "failed to read input");
                    break;
                }
            };
            match parse_line(&line) {
                Ok(Some(input)) => {
                    let quit = input == Input::Quit;
                    if tx.send(input).await.is_err() || quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(err) => eprintln!("{err:#}"),
            }
        }
    };

    let (finished, ()) = tokio::join!(program.run(rx), feed);
    finished.state
}

/// Runs the interactive form on stdin/stdout.
pub fn interactive(args: &InteractiveArgs, config: FormConfig, color: bool) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start event loop")?;

    let state = runtime.block_on(drive(
        tokio::io::BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
        config,
        args,
        color,
    ));
    tracing::debug!(submitted = state.submitted, errors = state.errors.len(), "session ended");
    Ok(())
}

// -----------------------------------------------------------------------------
// fields
// -----------------------------------------------------------------------------

pub fn fields(out: &mut impl Write) -> anyhow::Result<()> {
    for field in FieldName::ALL {
        let kind = match field.input_kind() {
            signup_form::InputKind::Text => "text",
            signup_form::InputKind::Password => "password",
            signup_form::InputKind::Number => "number",
        };
        let required = if field.required() { "required" } else { "optional" };
        writeln!(out, "{:<16} {kind:<9} {required}", field.key())?;
    }
    Ok(())
}
