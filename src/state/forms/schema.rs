//! Declarative validation rules applied to a form snapshot
//!
//! A schema is configuration data: a list of (field name, rule) pairs built
//! at form-definition time. `validate` reads the controller's current field
//! values and returns a structured per-field report. It never panics and
//! never blocks submission itself; the controller decides what to do with
//! the report.

use super::field::{FieldValue, FormField};
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// E.164-style phone shape: optional '+', 2-15 digits, no leading zero
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[1-9]\d{1,14}$").expect("phone regex is valid")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

/// A single validation rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Character count must lie in `[min, max]`
    Length { min: usize, max: usize },
    /// Must match a standard email grammar
    Email,
    /// Must match `^\+?[1-9]\d{1,14}$`
    Phone,
    /// Field must hold a value (text, choice, or file)
    Required,
    /// Checkbox must be checked
    Accepted,
    /// Non-empty date input must parse with the field's configured format
    Date,
    /// Required whenever the named other field holds a value
    RequiredIf { other: String },
}

/// Validation schema: per-field rules in declaration order
#[derive(Debug, Clone, Default)]
pub struct Schema {
    rules: Vec<(String, Rule)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, field: &str, rule: Rule) -> Self {
        self.rules.push((field.to_string(), rule));
        self
    }

    /// Field names referenced by any rule, for definition-time checking
    pub fn referenced_fields(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().flat_map(|(name, rule)| {
            let other = match rule {
                Rule::RequiredIf { other } => Some(other.as_str()),
                _ => None,
            };
            std::iter::once(name.as_str()).chain(other)
        })
    }

    /// Validate a snapshot of the form's fields. Returns at most one error
    /// per field name; fields without an entry are valid.
    pub fn validate(&self, fields: &[FormField]) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        for (name, rule) in &self.rules {
            if errors.contains_key(name) {
                continue;
            }
            let Some(field) = fields.iter().find(|f| f.name() == name) else {
                continue;
            };
            if let Some(message) = check(rule, field, fields) {
                errors.insert(name.clone(), message);
            }
        }
        errors
    }
}

fn check(rule: &Rule, field: &FormField, fields: &[FormField]) -> Option<String> {
    let label = field.config.display_label();
    match rule {
        Rule::Length { min, max } => {
            let len = field.as_text().chars().count();
            if len < *min {
                Some(format!("{label} must be at least {min} characters."))
            } else if len > *max {
                Some(format!("{label} must not exceed {max} characters."))
            } else {
                None
            }
        }
        Rule::Email => {
            if EMAIL_RE.is_match(field.as_text()) {
                None
            } else {
                Some(format!("{label} must be a valid email address."))
            }
        }
        Rule::Phone => {
            if PHONE_RE.is_match(field.as_text()) {
                None
            } else {
                Some(format!("{label} must be a valid phone number."))
            }
        }
        Rule::Required => {
            if field.value.is_empty() {
                Some(format!("{label} is required."))
            } else {
                None
            }
        }
        Rule::Accepted => {
            if field.as_bool() {
                None
            } else {
                Some(format!("{label} must be accepted to continue."))
            }
        }
        Rule::Date => {
            let input = field.as_text();
            if input.is_empty() {
                return None;
            }
            let format = field.config.effective_date_format();
            let parsed = if field.config.show_time {
                NaiveDateTime::parse_from_str(input, &format).is_ok()
            } else {
                NaiveDate::parse_from_str(input, &format).is_ok()
            };
            if parsed {
                None
            } else {
                Some(format!("{label} must be a valid date ({format})."))
            }
        }
        Rule::RequiredIf { other } => {
            let other_set = fields
                .iter()
                .find(|f| f.name() == other)
                .is_some_and(|f| !f.value.is_empty());
            if other_set && field.value.is_empty() {
                let other_label = fields
                    .iter()
                    .find(|f| f.name() == other)
                    .map(|f| f.config.display_label().to_string())
                    .unwrap_or_else(|| other.clone());
                Some(format!("{label} is required when {other_label} is set."))
            } else {
                None
            }
        }
    }
}
