//! Terminal rendering.

use std::io::Write;

use colored::Colorize;
use serde::Serialize;
use signup_form::{
    FieldErrors, FormView, FrameLine, NormalizedPayload, SUCCESS_MESSAGE, ValidationResult, View,
};

/// Renders every snapshot as a block of lines on a writer.
pub struct TerminalView<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint_error(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_success(&self, text: &str) -> String {
        if self.color {
            text.green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Styles the shared frame: labels padded into a column, errors indented
    /// and red, the banner green.
    fn frame(&self, view: &FormView<'_>) -> String {
        let mut lines: Vec<String> = view
            .frame()
            .into_iter()
            .map(|line| match line {
                FrameLine::Success => self.paint_success(SUCCESS_MESSAGE),
                FrameLine::Field { field, shown } => {
                    format!("{:<18} {shown}", format!("{}:", field.label()))
                }
                FrameLine::FieldError(message) => format!("  {}", self.paint_error(message)),
                FrameLine::FormError(message) => self.paint_error(message),
            })
            .collect();
        lines.push(String::new());
        lines.join("\n")
    }
}

impl<W: Write> View for TerminalView<W> {
    fn render(&mut self, view: &FormView<'_>) {
        let frame = self.frame(view);
        if let Err(err) = writeln!(self.out, "{frame}") {
            tracing::warn!(%err, "failed to write frame");
        }
    }
}

/// Machine-readable outcome of `signup check`.
#[derive(Debug, Serialize)]
pub struct CheckReport<'a> {
    pub accepted: bool,
    pub errors: FieldErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<&'a NormalizedPayload>,
}

impl<'a> CheckReport<'a> {
    pub fn new(result: &'a ValidationResult) -> Self {
        let payload = match result {
            ValidationResult::Accepted(payload) => Some(payload),
            ValidationResult::Rejected(_) => None,
        };
        Self {
            accepted: result.is_accepted(),
            errors: result.field_errors(),
            payload,
        }
    }

    pub fn to_text(&self, color: bool) -> String {
        if self.accepted {
            let line = format!("accepted: {SUCCESS_MESSAGE}");
            return if color { line.green().to_string() } else { line };
        }
        self.errors
            .iter()
            .map(|(key, message)| {
                let line = format!("{key}: {message}");
                if color { line.red().to_string() } else { line }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
