//! Per-field error collection for registration forms.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Field name -> user-facing message. Empty when the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("{}", self.joined())]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`. The first message per field wins.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge another form's errors, prefixing their field names.
    pub fn extend_prefixed(&mut self, prefix: &str, other: FieldErrors) {
        for (field, message) in other.errors {
            self.add(format!("{}.{}", prefix, field), message);
        }
    }

    /// `field: message` pairs in field order, separated by `; `.
    pub fn joined(&self) -> String {
        self.iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Require a non-blank value.
    pub fn require(&mut self, field: &str, value: &str, message: &str) -> bool {
        if value.trim().is_empty() {
            self.add(field, message);
            return false;
        }
        true
    }

    /// Require a non-blank value that passes `check`.
    pub fn require_valid(
        &mut self,
        field: &str,
        value: &str,
        check: fn(&str) -> bool,
        missing: &str,
        invalid: &str,
    ) {
        if self.require(field, value, missing) && !check(value) {
            self.add(field, invalid);
        }
    }

    /// Check an optional value only when present.
    pub fn optional_valid(
        &mut self,
        field: &str,
        value: Option<&str>,
        check: fn(&str) -> bool,
        invalid: &str,
    ) {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            if !check(value) {
                self.add(field, invalid);
            }
        }
    }
}
