//! Error types.
//!
//! Two families live here. [`ValidationError`] is the outcome of a rule that
//! did not hold; it is data, returned inside a
//! [`ValidationResult`](crate::ValidationResult), and always recoverable by
//! editing the offending field. [`FormError`] covers everything around the
//! form: parsing untyped keys, loading configuration, reading input.
//!
//! # Note on Clone and PartialEq
//!
//! Like the validation data, [`FormError`] implements `Clone` and `PartialEq`
//! so tests can compare errors directly. Foreign errors (`io::Error`,
//! `toml::de::Error`, `serde_json::Error`) are stored as their message.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::field::FieldName;

/// Display text of the sentinel key for issues that carry no field path.
pub const UNKNOWN_FIELD: &str = "unknown field";

/// One violated rule: the field it concerns and a message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// `None` when the rule could not be tied to a single field.
    pub path: Option<FieldName>,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: FieldName, message: impl Into<String>) -> Self {
        Self {
            path: Some(path),
            message: message.into(),
        }
    }

    /// An issue without a field path.
    pub fn unattributed(message: impl Into<String>) -> Self {
        Self {
            path: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path {
            Some(field) => write!(f, "{field}: {}", self.message),
            None => write!(f, "{UNKNOWN_FIELD}: {}", self.message),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised around the form (never by validation itself).
///
/// | Variant | Recovery |
/// |---------|----------|
/// | [`UnknownField`](FormError::UnknownField) | Fix the key sent by the presentation layer |
/// | [`Config`](FormError::Config) | Fix the configuration file |
/// | [`Io`](FormError::Io) | Check the input source |
/// | [`Json`](FormError::Json) | Fix the submission document |
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A field key that is not part of the inventory.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Configuration could not be parsed or is inconsistent.
    #[error("config error: {0}")]
    Config(String),

    /// IO error while reading configuration or input.
    #[error("io error: {0}")]
    Io(String),

    /// A JSON submission document could not be decoded.
    #[error("json error: {0}")]
    Json(String),
}

impl FormError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns true if the caller can retry with corrected input.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnknownField(_) | Self::Json(_))
    }
}

impl From<std::io::Error> for FormError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<toml::de::Error> for FormError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result alias for fallible operations around the form.
pub type Result<T> = std::result::Result<T, FormError>;
