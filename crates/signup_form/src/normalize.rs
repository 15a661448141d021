//! Submit-time normalization of raw field values.

use std::fmt;

use serde::Serialize;

use crate::values::FieldValues;

/// The form's values as seen by the validator.
///
/// Derived from [`FieldValues`] at submit time and never stored by the form.
/// Passwords are left out of `Debug` and `Serialize` output so an accepted
/// payload can be logged.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPayload {
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
    /// Digits only; `None` when the field was left empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Still a string, coerced to a number by the age rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
}

impl NormalizedPayload {
    pub fn from_values(values: &FieldValues) -> Self {
        Self {
            name: values.name.clone(),
            email: values.email.clone(),
            password: values.password.clone(),
            confirm_password: values.confirm_password.clone(),
            phone: normalize_phone(&values.phone),
            age: normalize_age(&values.age),
        }
    }
}

impl From<&FieldValues> for NormalizedPayload {
    fn from(values: &FieldValues) -> Self {
        Self::from_values(values)
    }
}

impl fmt::Debug for NormalizedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizedPayload")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .field("phone", &self.phone)
            .field("age", &self.age)
            .finish()
    }
}

/// Empty input is absent; anything else keeps only its ASCII digits.
///
/// A non-empty input with no digits normalizes to `Some("")`, which the phone
/// rule then rejects.
pub fn normalize_phone(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    Some(raw.chars().filter(char::is_ascii_digit).collect())
}

/// Blank input (empty or whitespace) is absent; anything else passes through.
pub fn normalize_age(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}
