//! Runtime configuration.
//!
//! [`FormConfig`] is the single source of truth for rule thresholds and the
//! success-reset timer, independent of where the values came from. Every key
//! is optional in TOML; missing keys take the defaults below.
//!
//! ```toml
//! [validation]
//! name_min_len = 2
//! password_min_len = 8
//! phone_digits = 10
//! age_min = 18
//! age_max = 100
//!
//! [reset]
//! delay_ms = 3000
//! policy = "cancel"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub validation: ValidationConfig,
    pub reset: ResetConfig,
}

/// Thresholds used by the standard sign-up rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub name_min_len: usize,
    pub password_min_len: usize,
    pub phone_digits: usize,
    /// Inclusive lower bound.
    pub age_min: u32,
    /// Inclusive upper bound.
    pub age_max: u32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            name_min_len: 2,
            password_min_len: 8,
            phone_digits: 10,
            age_min: 18,
            age_max: 100,
        }
    }
}

/// What happens to a pending success reset when the form is submitted again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetPolicy {
    /// A new submission cancels the pending reset; stale timers are ignored.
    #[default]
    Cancel,
    /// Every timer fires at its original deadline and clears the flag, even
    /// if a later submission set it again.
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetConfig {
    pub delay_ms: u64,
    pub policy: ResetPolicy,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            delay_ms: 3000,
            policy: ResetPolicy::Cancel,
        }
    }
}

impl ResetConfig {
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl FormConfig {
    /// Parses and checks a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Config`] on malformed TOML or inconsistent values.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading form config");
        Self::from_toml_str(&source)
    }

    /// Checks that the values describe a satisfiable form.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Config`] naming the first inconsistent setting.
    pub fn validate(&self) -> Result<()> {
        let v = &self.validation;
        if v.age_min > v.age_max {
            return Err(FormError::config(format!(
                "age_min ({}) is greater than age_max ({})",
                v.age_min, v.age_max
            )));
        }
        if v.phone_digits == 0 {
            return Err(FormError::config("phone_digits must be at least 1"));
        }
        if self.reset.delay_ms == 0 {
            return Err(FormError::config("reset.delay_ms must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = FormConfig::default();
        assert_eq!(config.validation.name_min_len, 2);
        assert_eq!(config.validation.password_min_len, 8);
        assert_eq!(config.validation.phone_digits, 10);
        assert_eq!((config.validation.age_min, config.validation.age_max), (18, 100));
        assert_eq!(config.reset.delay(), Duration::from_secs(3));
        assert_eq!(config.reset.policy, ResetPolicy::Cancel);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(FormConfig::from_toml_str("").unwrap(), FormConfig::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = FormConfig::from_toml_str(
            "[validation]\nage_min = 21\n\n[reset]\npolicy = \"legacy\"\n",
        )
        .unwrap();
        assert_eq!(config.validation.age_min, 21);
        assert_eq!(config.validation.age_max, 100);
        assert_eq!(config.reset.policy, ResetPolicy::Legacy);
        assert_eq!(config.reset.delay_ms, 3000);
    }

    #[test]
    fn inverted_age_range_is_rejected() {
        let err = FormConfig::from_toml_str("[validation]\nage_min = 50\nage_max = 40\n")
            .unwrap_err();
        assert!(matches!(err, FormError::Config(msg) if msg.contains("age_min")));
    }

    #[test]
    fn zero_delay_is_rejected() {
        assert!(FormConfig::from_toml_str("[reset]\ndelay_ms = 0\n").is_err());
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = FormConfig::from_toml_str("[validation\n").unwrap_err();
        assert!(matches!(err, FormError::Config(_)));
    }

    #[test]
    fn toml_round_trip() {
        let config = FormConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(FormConfig::from_toml_str(&text).unwrap(), config);
    }
}
