//! Forms: untrusted input in, validated input out.
//!
//! Every writable entity has a form whose fields are all optional, so a
//! missing field becomes a "required" message instead of a deserialization
//! failure. `clean()` either returns the typed input for the repository or a
//! [`FormErrors`] map keyed by field name.
//!
//! Updates call `overlay()` first, which fills every field the submitter left
//! out from the stored record; the result is validated as a whole form.
//! Nullable fields use `Option<Option<T>>`: absent keeps the stored value,
//! an explicit `null` clears it.

mod farm;
mod user;
mod wildlife;

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::geo::GeometryError;

pub use farm::{FarmForm, FarmInput, FieldForm, FieldInput, IrrigationPointForm, IrrigationPointInput};
pub use user::{UserForm, UserInput};
pub use wildlife::{
    AnnualPopulationForm, AnnualPopulationInput, NamedForm, NamedInput, OrganisationForm,
    OrganisationInput, PropertyForm, PropertyInput, TaxonForm, TaxonInput,
};

/// Key used for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "__all__";

pub const REQUIRED: &str = "This field is required.";

/// Message for a foreign key that names a missing row.
pub const INVALID_REFERENCE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors with a single message on one field.
    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages attached to `field`, empty when the field is valid.
    #[must_use]
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when no errors were collected.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one message was added.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// Deserialize a nullable form field so that `null` and "absent" differ.
///
/// Pair with `#[serde(default)]`: absent → `None`, `null` → `Some(None)`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Accumulates field errors while a form is cleaned.
#[derive(Debug, Default)]
pub(crate) struct Cleaner {
    errors: FormErrors,
}

impl Cleaner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    /// Trimmed, non-empty text of at most `max_len` characters.
    pub(crate) fn text(&mut self, field: &str, value: Option<&str>, max_len: usize) -> Option<String> {
        let trimmed = value.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            self.error(field, REQUIRED);
            return None;
        }
        self.max_length(field, trimmed, max_len)
    }

    /// Trimmed text that may be blank; blank becomes `None`.
    pub(crate) fn optional_text(
        &mut self,
        field: &str,
        value: Option<&str>,
        max_len: usize,
    ) -> Result<Option<String>, ()> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(trimmed) => self.max_length(field, trimmed, max_len).map(Some).ok_or(()),
        }
    }

    fn max_length(&mut self, field: &str, value: &str, max_len: usize) -> Option<String> {
        let len = value.chars().count();
        if len > max_len {
            self.error(
                field,
                format!("Ensure this value has at most {max_len} characters (it has {len})."),
            );
            return None;
        }
        Some(value.to_string())
    }

    pub(crate) fn required<T: Clone>(&mut self, field: &str, value: Option<&T>) -> Option<T> {
        if value.is_none() {
            self.error(field, REQUIRED);
        }
        value.cloned()
    }

    /// A required number that must be strictly positive.
    pub(crate) fn positive(&mut self, field: &str, value: Option<f64>, message: &str) -> Option<f64> {
        let value = value.or_else(|| {
            self.error(field, REQUIRED);
            None
        })?;
        if !value.is_finite() || value <= 0.0 {
            self.error(field, message);
            return None;
        }
        Some(value)
    }

    /// A required count that must not be negative.
    pub(crate) fn non_negative(&mut self, field: &str, value: Option<i64>) -> Option<i64> {
        let value = value.or_else(|| {
            self.error(field, REQUIRED);
            None
        })?;
        if value < 0 {
            self.error(field, "Ensure this value is greater than or equal to 0.");
            return None;
        }
        Some(value)
    }

    pub(crate) fn geometry<T: Clone>(
        &mut self,
        field: &str,
        value: Option<&T>,
        validate: impl FnOnce(&T) -> Result<(), GeometryError>,
    ) -> Option<T> {
        let value = self.required(field, value)?;
        if let Err(error) = validate(&value) {
            self.error(field, error.to_string());
            return None;
        }
        Some(value)
    }

    /// Finish cleaning.
    ///
    /// # Errors
    ///
    /// Returns the collected errors when any field failed.
    pub(crate) fn finish(self) -> Result<(), FormErrors> {
        self.errors.into_result()
    }

    /// Fallback used when a field came back empty without recording why.
    pub(crate) fn incomplete() -> FormErrors {
        FormErrors::single(NON_FIELD_ERRORS, "The form is incomplete.")
    }
}
