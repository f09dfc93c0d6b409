//! Field-level checks applied before any create/update request.
//!
//! A [`Validator`] accumulates at most one message per field (the first one
//! wins) so forms can render inline errors next to each input. Nothing here
//! talks to the network; the server remains the final authority.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::collections::BTreeMap;

use time::PrimitiveDateTime;

use crate::dates;
use crate::taxonomy::{TaxonomyProvider, Vocabulary};

/// Coded values an edited record already carried, keyed by form field.
///
/// [`Validator::one_of_or_kept`] accepts these as they are even when the
/// taxonomy does not list them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeptValues(BTreeMap<&'static str, String>);

impl KeptValues {
    /// Remember `value` for `field`; blanks are ignored.
    #[must_use]
    pub fn with(mut self, field: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.0.insert(field, value.to_owned());
        }
        self
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

/// Per-field validation messages, keyed by form field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation", .fields.len())]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    /// Record a message unless the field already has one.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Message for one field, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Accumulating field checker.
#[derive(Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with a custom message.
    pub fn fail(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    /// Value must be non-blank.
    pub fn required(&mut self, field: &'static str, label: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.fail(field, format!("{label} is required"));
            return false;
        }
        true
    }

    /// Value must be at most `max` characters once trimmed.
    pub fn max_len(&mut self, field: &'static str, label: &str, value: &str, max: usize) {
        if value.trim().chars().count() > max {
            self.fail(field, format!("{label} must be at most {max} characters"));
        }
    }

    /// Optional number within `[min, max]`. Blank input is `None`.
    pub fn number(&mut self, field: &'static str, label: &str, raw: &str, min: f64, max: f64) -> Option<f64> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let Ok(value) = trimmed.parse::<f64>() else {
            self.fail(field, format!("{label} must be a number"));
            return None;
        };
        if !value.is_finite() || value < min || value > max {
            self.fail(field, format!("{label} must be between {min} and {max}"));
            return None;
        }
        Some(value)
    }

    /// Optional non-negative whole number. Blank input is `None`.
    pub fn whole_number(&mut self, field: &'static str, label: &str, raw: &str) -> Option<u64> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<u64>() {
            Ok(v) => Some(v),
            Err(_) => {
                self.fail(field, format!("{label} must be a whole number"));
                None
            }
        }
    }

    /// Optional value that must belong to a taxonomy vocabulary.
    ///
    /// Returns the canonical key for known values.
    pub fn one_of(
        &mut self,
        field: &'static str,
        label: &str,
        raw: &str,
        vocab: Vocabulary,
        taxonomy: &dyn TaxonomyProvider,
    ) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(term) = taxonomy.lookup(vocab, trimmed) {
            Some(term.key)
        } else {
            self.fail(field, format!("{label} {trimmed:?} is not a recognised value"));
            None
        }
    }

    /// Like [`Self::one_of`], but an unknown value equal to `kept` passes
    /// through unchanged.
    pub fn one_of_or_kept(
        &mut self,
        field: &'static str,
        label: &str,
        raw: &str,
        vocab: Vocabulary,
        taxonomy: &dyn TaxonomyProvider,
        kept: Option<&str>,
    ) -> Option<String> {
        let trimmed = raw.trim();
        if !trimmed.is_empty() && taxonomy.lookup(vocab, trimmed).is_none() && kept == Some(trimmed) {
            return Some(trimmed.to_owned());
        }
        self.one_of(field, label, raw, vocab, taxonomy)
    }

    /// Optional absolute http(s) URL without whitespace.
    pub fn url(&mut self, field: &'static str, label: &str, raw: &str) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }
        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"));
        let ok = rest.is_some_and(|r| !r.is_empty() && !r.starts_with('/') && !r.chars().any(char::is_whitespace));
        if !ok {
            self.fail(field, format!("{label} must be an http(s) URL"));
        }
    }

    /// Optional date/datetime. Blank input is `None`.
    pub fn date(&mut self, field: &'static str, label: &str, raw: &str) -> Option<PrimitiveDateTime> {
        match dates::parse_optional(Some(raw)) {
            Ok(value) => value,
            Err(_) => {
                self.fail(field, format!("{label} is not a valid date"));
                None
            }
        }
    }

    /// `end` must not precede `start`; the message lands on `end_field`.
    pub fn date_order(
        &mut self,
        end_field: &'static str,
        start_label: &str,
        end_label: &str,
        start: Option<PrimitiveDateTime>,
        end: Option<PrimitiveDateTime>,
    ) {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                self.fail(end_field, format!("{end_label} must not be before {start_label}"));
            }
        }
    }

    /// Consume the validator.
    ///
    /// # Errors
    ///
    /// Returns every recorded field message when any check failed.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() { Ok(()) } else { Err(self.errors) }
    }
}
