//! Form state and its pure transition function.
//!
//! [`FormState::reduce`] takes one [`Event`] and mutates the state in place.
//! It never sleeps or spawns; anything that has to happen later is returned
//! as an [`Effect`] for the runtime to carry out. That keeps every transition
//! testable without a clock or a renderer.

use std::time::Duration;

use crate::config::{ResetConfig, ResetPolicy};
use crate::field::{FieldChange, FieldName};
use crate::normalize::NormalizedPayload;
use crate::validate::{ValidationResult, Validator};
use crate::values::{FieldErrors, FieldValues};

/// Where the form is in its edit/submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Editing,
    /// The last submission was rejected; errors are shown.
    SubmittedInvalid,
    /// The last submission was accepted; the success flag is set.
    SubmittedValid,
}

/// Identity of one scheduled success reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResetToken(u64);

impl ResetToken {
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Something that happened to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The user edited a field.
    FieldChanged(FieldChange),
    /// The user submitted the form.
    Submit,
    /// A scheduled success reset reached its deadline.
    ResetElapsed(ResetToken),
}

impl From<FieldChange> for Event {
    fn from(change: FieldChange) -> Self {
        Self::FieldChanged(change)
    }
}

/// Work requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver [`Event::ResetElapsed`] with `token` after `after`.
    ScheduleReset { token: ResetToken, after: Duration },
    /// The reset identified by `token` must not fire.
    CancelReset(ResetToken),
}

/// Everything the form remembers between events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub values: FieldValues,
    pub errors: FieldErrors,
    pub submitted: bool,
    pub phase: Phase,
    pending_reset: Option<ResetToken>,
    next_token: u64,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The reset that will clear `submitted`, if one is scheduled.
    pub fn pending_reset(&self) -> Option<ResetToken> {
        self.pending_reset
    }

    /// Applies `event` and returns the effects it requires.
    pub fn reduce(
        &mut self,
        event: Event,
        validator: &Validator,
        reset: &ResetConfig,
    ) -> Vec<Effect> {
        match event {
            Event::FieldChanged(change) => {
                self.change_field(change);
                Vec::new()
            }
            Event::Submit => self.submit(validator, reset),
            Event::ResetElapsed(token) => {
                self.reset_elapsed(token, reset.policy);
                Vec::new()
            }
        }
    }

    fn change_field(&mut self, FieldChange { field, raw_value }: FieldChange) {
        self.values.set(field, raw_value);
        if self.errors.clear_field(field) {
            tracing::debug!(%field, "cleared field error on edit");
        }
        self.phase = Phase::Editing;
    }

    fn submit(&mut self, validator: &Validator, reset: &ResetConfig) -> Vec<Effect> {
        let mut effects = Vec::new();
        if reset.policy == ResetPolicy::Cancel {
            if let Some(token) = self.pending_reset.take() {
                effects.push(Effect::CancelReset(token));
            }
        }

        let payload = NormalizedPayload::from_values(&self.values);
        match validator.validate(&payload) {
            ValidationResult::Accepted(payload) => {
                tracing::info!(?payload, "form submitted");
                self.errors.clear();
                self.submitted = true;
                self.values = FieldValues::new();
                self.phase = Phase::SubmittedValid;

                let token = self.issue_token();
                self.pending_reset = Some(token);
                effects.push(Effect::ScheduleReset {
                    token,
                    after: reset.delay(),
                });
            }
            rejected @ ValidationResult::Rejected(_) => {
                self.errors = rejected.field_errors();
                self.submitted = false;
                self.phase = Phase::SubmittedInvalid;
                tracing::debug!(errors = self.errors.len(), "submission rejected");
            }
        }
        effects
    }

    fn reset_elapsed(&mut self, token: ResetToken, policy: ResetPolicy) {
        let current = self.pending_reset == Some(token);
        if policy == ResetPolicy::Cancel && !current {
            tracing::debug!(token = token.id(), "ignoring stale success reset");
            return;
        }
        if current {
            self.pending_reset = None;
        }
        self.submitted = false;
        if self.phase == Phase::SubmittedValid {
            self.phase = Phase::Editing;
        }
    }

    fn issue_token(&mut self) -> ResetToken {
        self.next_token += 1;
        ResetToken(self.next_token)
    }

    /// Whether `field` currently shows an error.
    pub fn has_error(&self, field: FieldName) -> bool {
        self.errors.contains(field)
    }
}
