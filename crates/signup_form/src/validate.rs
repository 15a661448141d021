//! Declarative validation.
//!
//! A [`Validator`] is an ordered list of independent rules. Each rule looks at
//! the whole [`NormalizedPayload`] and yields at most one message for the
//! field it is attached to. All rules run on every call: one failing rule
//! never hides another.
//!
//! # Example
//!
//! ```
//! use signup_form::{FieldName, FieldValues, NormalizedPayload, ValidationConfig, Validator};
//!
//! let validator = Validator::signup(&ValidationConfig::default());
//! let values = FieldValues::new().with(FieldName::Name, "J");
//! let result = validator.validate(&NormalizedPayload::from_values(&values));
//!
//! assert!(!result.is_accepted());
//! assert!(result.field_errors().contains(FieldName::Name));
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::config::ValidationConfig;
use crate::error::ValidationError;
use crate::field::FieldName;
use crate::normalize::NormalizedPayload;
use crate::values::FieldErrors;

/// Local part, `@`, dot-separated labels, alphabetic TLD of two or more.
/// Leading dots and consecutive dots are checked separately.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$")
        .expect("email pattern is valid")
});

type Check = Box<dyn Fn(&NormalizedPayload) -> Option<String> + Send + Sync>;

/// One predicate and the field its message is reported against.
pub struct Rule {
    path: Option<FieldName>,
    check: Check,
}

impl Rule {
    pub fn path(&self) -> Option<FieldName> {
        self.path
    }

    fn apply(&self, payload: &NormalizedPayload) -> Option<ValidationError> {
        (self.check)(payload).map(|message| ValidationError {
            path: self.path,
            message,
        })
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Outcome of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "lowercase")]
pub enum ValidationResult {
    Accepted(NormalizedPayload),
    /// Issues in rule order. Never empty.
    Rejected(Vec<ValidationError>),
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// The issues of a rejection; empty when accepted.
    pub fn issues(&self) -> &[ValidationError] {
        match self {
            Self::Accepted(_) => &[],
            Self::Rejected(issues) => issues,
        }
    }

    /// One message per field, later rules overriding earlier ones.
    pub fn field_errors(&self) -> FieldErrors {
        FieldErrors::from_issues(self.issues())
    }
}

/// An ordered rule set.
#[derive(Debug, Default)]
pub struct Validator {
    rules: Vec<Rule>,
}

impl Validator {
    /// A validator with no rules; accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule reported against `field`.
    #[must_use]
    pub fn rule<F>(mut self, field: FieldName, check: F) -> Self
    where
        F: Fn(&NormalizedPayload) -> Option<String> + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            path: Some(field),
            check: Box::new(check),
        });
        self
    }

    /// Appends a rule whose message is not tied to one field.
    #[must_use]
    pub fn refine<F>(mut self, check: F) -> Self
    where
        F: Fn(&NormalizedPayload) -> Option<String> + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            path: None,
            check: Box::new(check),
        });
        self
    }

    /// The standard sign-up rule set.
    pub fn signup(config: &ValidationConfig) -> Self {
        let name_min = config.name_min_len;
        let password_min = config.password_min_len;
        let phone_digits = config.phone_digits;
        let (age_min, age_max) = (config.age_min, config.age_max);

        Self::new()
            .rule(FieldName::Name, move |p| {
                min_chars(&p.name, name_min)
                    .then(|| format!("Name must be at least {name_min} characters"))
            })
            .rule(FieldName::Email, |p| {
                (!is_email(&p.email)).then(|| "Invalid email address".to_string())
            })
            .rule(FieldName::Password, move |p| {
                min_chars(&p.password, password_min)
                    .then(|| format!("Password must be at least {password_min} characters"))
            })
            .rule(FieldName::ConfirmPassword, |p| {
                (p.password != p.confirm_password).then(|| "Passwords don't match".to_string())
            })
            .rule(FieldName::Phone, move |p| {
                let phone = p.phone.as_deref()?;
                let valid = phone.len() == phone_digits && phone.bytes().all(|b| b.is_ascii_digit());
                (!valid).then(|| format!("Phone number must be {phone_digits} digits"))
            })
            .rule(FieldName::Age, |p| {
                let age = p.age.as_deref()?;
                parse_age(age)
                    .is_none()
                    .then(|| "Age must be a number".to_string())
            })
            .rule(FieldName::Age, move |p| {
                let age = parse_age(p.age.as_deref()?)?;
                let in_range = (f64::from(age_min)..=f64::from(age_max)).contains(&age);
                (!in_range).then(|| format!("Age must be between {age_min} and {age_max}"))
            })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Runs every rule against `payload`.
    pub fn validate(&self, payload: &NormalizedPayload) -> ValidationResult {
        let issues: Vec<ValidationError> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let issue = rule.apply(payload);
                tracing::trace!(path = ?rule.path, failed = issue.is_some(), "rule evaluated");
                issue
            })
            .collect();

        if issues.is_empty() {
            ValidationResult::Accepted(payload.clone())
        } else {
            ValidationResult::Rejected(issues)
        }
    }
}

/// True when `s` is shorter than `min` characters.
fn min_chars(s: &str, min: usize) -> bool {
    s.chars().count() < min
}

/// Standard email-address syntax.
pub fn is_email(s: &str) -> bool {
    !s.starts_with('.') && !s.contains("..") && EMAIL_RE.is_match(s)
}

/// Numeric coercion of a raw age: surrounding whitespace is ignored, the rest
/// must be a finite decimal number.
pub fn parse_age(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
