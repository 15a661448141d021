//! Field inventory for the sign-up form.
//!
//! Every input slot of the form is a [`FieldName`]. The set is closed: the
//! presentation layer hands the controller typed [`FieldChange`] records
//! instead of free-form `(name, value)` pairs, and string keys are parsed
//! once at the boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// A named, independently validated input slot of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    /// Display name, at least two characters.
    Name,
    /// Email address.
    Email,
    /// Password, at least eight characters.
    Password,
    /// Must repeat the password.
    ConfirmPassword,
    /// Optional ten-digit phone number.
    Phone,
    /// Optional age between 18 and 100.
    Age,
}

/// How a field is entered and echoed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Free text, echoed as typed.
    #[default]
    Text,
    /// Masked text.
    Password,
    /// Numeric entry. The raw value stays a string until validation.
    Number,
}

impl FieldName {
    /// All fields in display order.
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Email,
        Self::Password,
        Self::ConfirmPassword,
        Self::Phone,
        Self::Age,
    ];

    /// The wire key used by presentation layers and JSON payloads.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::Phone => "phone",
            Self::Age => "age",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm password",
            Self::Phone => "Phone (optional)",
            Self::Age => "Age (optional)",
        }
    }

    pub const fn input_kind(self) -> InputKind {
        match self {
            Self::Password | Self::ConfirmPassword => InputKind::Password,
            Self::Age => InputKind::Number,
            Self::Name | Self::Email | Self::Phone => InputKind::Text,
        }
    }

    /// Whether the field must be filled in for the form to be accepted.
    pub const fn required(self) -> bool {
        !matches!(self, Self::Phone | Self::Age)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FieldName {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// A single edit coming from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: FieldName,
    pub raw_value: String,
}

impl FieldChange {
    pub fn new(field: FieldName, raw_value: impl Into<String>) -> Self {
        Self {
            field,
            raw_value: raw_value.into(),
        }
    }

    /// Builds a change from an untyped `(key, value)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] when `key` names no field.
    pub fn parse(key: &str, raw_value: impl Into<String>) -> crate::Result<Self> {
        Ok(Self::new(key.parse()?, raw_value))
    }
}
