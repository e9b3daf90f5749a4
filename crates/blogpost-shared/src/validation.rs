//! Field-level request validation.

use std::collections::BTreeMap;

/// Problems found in a request, keyed by the camelCase field name.
///
/// Ordered so error bodies are stable from one request to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Record `field` as missing when `value` is empty or whitespace.
    pub fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "Required");
        }
    }

    /// Like [`require`](Self::require), but only for values that were sent.
    pub fn reject_blank(&mut self, field: &str, value: Option<&str>) {
        if value.is_some_and(|v| v.trim().is_empty()) {
            self.add(field, "Must not be empty");
        }
    }

    /// Record `field` when a value was sent but is not one of `allowed`.
    pub fn one_of(&mut self, field: &str, value: Option<&str>, allowed: &[&str]) {
        if let Some(value) = value {
            if !allowed.contains(&value) {
                self.add(
                    field,
                    format!(
                        "Invalid value '{value}', expected one of: {}",
                        allowed.join(", ")
                    ),
                );
            }
        }
    }

    /// Record `field` when a number was sent that exceeds `max`.
    pub fn at_most(&mut self, field: &str, value: Option<u64>, max: u64) {
        if value.is_some_and(|v| v > max) {
            self.add(field, format!("Must be at most {max}"));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Implemented by every request body and query string the API accepts.
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}
