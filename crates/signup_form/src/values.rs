//! Raw field values and per-field error messages.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{UNKNOWN_FIELD, ValidationError};
use crate::field::FieldName;

// -----------------------------------------------------------------------------
// Field Values
// -----------------------------------------------------------------------------

/// The raw, uninterpreted string typed into each field.
///
/// Deserializes from a JSON object keyed by the wire keys; missing keys are
/// empty and unknown keys are an error. Bare numbers are accepted and kept
/// as their decimal text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldValues {
    #[serde(deserialize_with = "raw_value")]
    pub name: String,
    #[serde(deserialize_with = "raw_value")]
    pub email: String,
    #[serde(deserialize_with = "raw_value")]
    pub password: String,
    #[serde(deserialize_with = "raw_value")]
    pub confirm_password: String,
    #[serde(deserialize_with = "raw_value")]
    pub phone: String,
    #[serde(deserialize_with = "raw_value")]
    pub age: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Int(i64),
    Uint(u64),
    Float(f64),
}

fn raw_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawValue::deserialize(deserializer)? {
        RawValue::Text(text) => text,
        RawValue::Int(n) => n.to_string(),
        RawValue::Uint(n) => n.to_string(),
        RawValue::Float(n) => n.to_string(),
    })
}

impl FieldValues {
    /// All-empty values, the state of a fresh or just-submitted form.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => &self.name,
            FieldName::Email => &self.email,
            FieldName::Password => &self.password,
            FieldName::ConfirmPassword => &self.confirm_password,
            FieldName::Phone => &self.phone,
            FieldName::Age => &self.age,
        }
    }

    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        let slot = match field {
            FieldName::Name => &mut self.name,
            FieldName::Email => &mut self.email,
            FieldName::Password => &mut self.password,
            FieldName::ConfirmPassword => &mut self.confirm_password,
            FieldName::Phone => &mut self.phone,
            FieldName::Age => &mut self.age,
        };
        *slot = value.into();
    }

    /// Builder-style variant of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, field: FieldName, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        FieldName::ALL.into_iter().all(|f| self.get(f).is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> + '_ {
        FieldName::ALL.into_iter().map(|f| (f, self.get(f)))
    }
}

// -----------------------------------------------------------------------------
// Field Errors
// -----------------------------------------------------------------------------

/// Key of an error entry: a field, or the sentinel for pathless issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKey {
    Field(FieldName),
    Unknown,
}

impl ErrorKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Field(field) => field.key(),
            Self::Unknown => UNKNOWN_FIELD,
        }
    }
}

impl From<Option<FieldName>> for ErrorKey {
    fn from(path: Option<FieldName>) -> Self {
        path.map_or(Self::Unknown, Self::Field)
    }
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// At most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: BTreeMap<ErrorKey, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds validation issues into a mapping. When two issues share a key
    /// the later one wins.
    pub fn from_issues<'a, I>(issues: I) -> Self
    where
        I: IntoIterator<Item = &'a ValidationError>,
    {
        let entries = issues
            .into_iter()
            .map(|issue| (ErrorKey::from(issue.path), issue.message.clone()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.get_key(ErrorKey::Field(field))
    }

    pub fn get_key(&self, key: ErrorKey) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.entries.contains_key(&ErrorKey::Field(field))
    }

    pub fn insert(&mut self, key: ErrorKey, message: impl Into<String>) {
        self.entries.insert(key, message.into());
    }

    /// Removes the message for `field`. Returns whether one was present.
    pub fn clear_field(&mut self, field: FieldName) -> bool {
        self.entries.remove(&ErrorKey::Field(field)).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = ErrorKey> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorKey, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, message) in &self.entries {
            map.serialize_entry(key.as_str(), message)?;
        }
        map.end()
    }
}
