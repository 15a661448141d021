//! The form controller and its rendering boundary.

use std::fmt::Write as _;

use serde::Serialize;

use crate::config::FormConfig;
use crate::field::{FieldChange, FieldName, InputKind};
use crate::state::{Effect, Event, FormState, Phase};
use crate::validate::Validator;
use crate::values::{ErrorKey, FieldErrors, FieldValues};

/// Message shown while the success flag is set.
pub const SUCCESS_MESSAGE: &str = "Form submitted successfully!";

/// Owns the form state, the rule set and the configuration.
///
/// The two event handlers a presentation layer needs are
/// [`on_field_change`](Self::on_field_change) and
/// [`on_submit`](Self::on_submit). Both return the effects the caller must
/// carry out; [`Program`](crate::Program) does that on a tokio runtime.
#[derive(Debug)]
pub struct SignupForm {
    state: FormState,
    validator: Validator,
    config: FormConfig,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self::new(FormConfig::default())
    }
}

impl SignupForm {
    /// A form with the standard sign-up rules built from `config`.
    pub fn new(config: FormConfig) -> Self {
        let validator = Validator::signup(&config.validation);
        Self {
            state: FormState::new(),
            validator,
            config,
        }
    }

    /// Replaces the rule set.
    #[must_use]
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn on_field_change(&mut self, change: FieldChange) -> Vec<Effect> {
        self.update(Event::FieldChanged(change))
    }

    pub fn on_submit(&mut self) -> Vec<Effect> {
        self.update(Event::Submit)
    }

    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        self.state.reduce(event, &self.validator, &self.config.reset)
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn into_state(self) -> FormState {
        self.state
    }

    /// Snapshot for the presentation layer.
    pub fn view(&self) -> FormView<'_> {
        FormView {
            values: &self.state.values,
            errors: &self.state.errors,
            submitted: self.state.submitted,
            phase: self.state.phase,
        }
    }
}

/// What the presentation layer may read.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FormView<'a> {
    pub values: &'a FieldValues,
    pub errors: &'a FieldErrors,
    pub submitted: bool,
    #[serde(skip)]
    pub phase: Phase,
}

/// Character used to mask password values.
pub const MASK_CHAR: char = '•';

/// One line of a rendered form, before any styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameLine<'a> {
    /// The success banner.
    Success,
    /// A field's label and its displayed (possibly masked) value.
    Field { field: FieldName, shown: String },
    /// The error under the preceding field.
    FieldError(&'a str),
    /// An error not tied to any field.
    FormError(&'a str),
}

impl<'a> FormView<'a> {
    /// The lines of a frame in display order. Presentation layers style
    /// these; [`to_text`](Self::to_text) is the unstyled rendering.
    pub fn frame(&self) -> Vec<FrameLine<'a>> {
        let mut lines = Vec::new();
        if self.submitted {
            lines.push(FrameLine::Success);
        }
        for field in FieldName::ALL {
            let raw = self.values.get(field);
            let shown = match field.input_kind() {
                InputKind::Password => MASK_CHAR.to_string().repeat(raw.chars().count()),
                InputKind::Text | InputKind::Number => raw.to_string(),
            };
            lines.push(FrameLine::Field { field, shown });
            if let Some(message) = self.errors.get(field) {
                lines.push(FrameLine::FieldError(message));
            }
        }
        if let Some(message) = self.errors.get_key(ErrorKey::Unknown) {
            lines.push(FrameLine::FormError(message));
        }
        lines
    }

    /// Plain-text rendering: one line per field with its error beneath,
    /// password values masked.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in self.frame() {
            let _ = match line {
                FrameLine::Success => writeln!(out, "{SUCCESS_MESSAGE}"),
                FrameLine::Field { field, shown } => writeln!(out, "{}: {shown}", field.label()),
                FrameLine::FieldError(message) => writeln!(out, "  ! {message}"),
                FrameLine::FormError(message) => writeln!(out, "! {message}"),
            };
        }
        out
    }
}

/// A presentation layer.
pub trait View {
    /// Called after every event with the current snapshot.
    fn render(&mut self, view: &FormView<'_>);
}

/// Keeps the rendered text of every snapshot; handy in tests and for
/// headless runs.
#[derive(Debug, Default, Clone)]
pub struct RecordingView {
    pub frames: Vec<String>,
}

impl View for RecordingView {
    fn render(&mut self, view: &FormView<'_>) {
        self.frames.push(view.to_text());
    }
}
