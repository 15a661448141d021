#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Signup Form
//!
//! A sign-up form with declarative validation, modelled the Elm way: a state
//! struct, a pure transition function, and effects carried out by a small
//! runtime.
//!
//! The form has six fields (name, email, password, confirm password, and the
//! optional phone and age). Values are raw strings until the user submits;
//! then they are normalized and checked by an ordered list of independent
//! rules. Every failing rule reports, one message per field.
//!
//! - [`SignupForm`]: owns values, errors and the success flag
//! - [`Validator`]: the rule set
//! - [`Program`]: single-threaded loop with a cancellable success reset
//! - [`FormConfig`]: thresholds and timer settings, loadable from TOML
//!
//! ## Example
//!
//! ```
//! use signup_form::{FieldChange, FieldName, SignupForm};
//!
//! let mut form = SignupForm::default();
//! for (field, value) in [
//!     (FieldName::Name, "Jo"),
//!     (FieldName::Email, "a@b.com"),
//!     (FieldName::Password, "12345678"),
//!     (FieldName::ConfirmPassword, "12345678"),
//! ] {
//!     form.on_field_change(FieldChange::new(field, value));
//! }
//!
//! let effects = form.on_submit();
//! assert_eq!(effects.len(), 1); // the success reset
//! assert!(form.view().submitted);
//! assert!(form.view().values.is_empty());
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod field;
pub mod normalize;
pub mod program;
pub mod state;
pub mod validate;
pub mod values;

pub use config::{FormConfig, ResetConfig, ResetPolicy, ValidationConfig};
pub use controller::{
    FormView, FrameLine, MASK_CHAR, RecordingView, SUCCESS_MESSAGE, SignupForm, View,
};
pub use error::{FormError, Result, UNKNOWN_FIELD, ValidationError};
pub use field::{FieldChange, FieldName, InputKind};
pub use normalize::{NormalizedPayload, normalize_age, normalize_phone};
pub use program::{Finished, Input, Program, ProgramOptions};
pub use state::{Effect, Event, FormState, Phase, ResetToken};
pub use validate::{Rule, ValidationResult, Validator, is_email, parse_age};
pub use values::{ErrorKey, FieldErrors, FieldValues};

/// Validates a set of raw values with the default rules.
///
/// Convenience for one-shot checks that don't need a controller.
pub fn check(values: &FieldValues) -> ValidationResult {
    check_with(values, &ValidationConfig::default())
}

/// As [`check`], with configured thresholds.
pub fn check_with(values: &FieldValues, config: &ValidationConfig) -> ValidationResult {
    Validator::signup(config).validate(&NormalizedPayload::from_values(values))
}
