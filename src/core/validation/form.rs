//! Form cleaning and field-level error collection
//!
//! Submitted forms arrive as loosely typed string fields. Each form type
//! declares its structural rules with `validator` and converts itself into a
//! typed value in [`Form::clean`]. Every problem found along the way is
//! attached to the offending field in a [`FormErrors`] map, so callers can
//! re-render the input with messages next to each field.

use crate::core::error::{RentalError, RentalResult, ValidationError};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

/// Message attached to a required field that was not submitted
pub const REQUIRED: &str = "This field is required.";

/// Message attached to a reference field whose target does not exist
pub const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Ordered map of field name to error messages
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(IndexMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an error message to a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages attached to a field, if any
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, messages)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Collect `validator` errors, ordering fields by `fields`.
    ///
    /// Fields absent from `fields` are appended in name order.
    pub fn from_validation(errors: &ValidationErrors, fields: &[&str]) -> Self {
        let by_field = errors.field_errors();
        let mut names: Vec<&str> = by_field.keys().map(|k| k.as_ref()).collect();
        names.sort_by_key(|name| {
            (
                fields.iter().position(|f| f == name).unwrap_or(usize::MAX),
                name.to_string(),
            )
        });

        let mut out = Self::new();
        for name in names {
            if let Some(list) = by_field.get(name) {
                for error in list.iter() {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", error.code));
                    out.add(name, message);
                }
            }
        }
        out
    }

    /// `Ok(())` when no error was collected, otherwise a validation error
    pub fn into_result(self) -> RentalResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(RentalError::Validation(ValidationError::Form(self)))
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect();
        write!(f, "{}", msgs.join(", "))
    }
}

/// A submitted form that can be cleaned into a typed value
pub trait Form: Validate {
    /// Field names in display order
    const FIELDS: &'static [&'static str];

    /// The typed value produced by a successful clean
    type Cleaned;

    /// Convert the raw fields, recording every problem in `errors`.
    ///
    /// Returning `None` without adding an error is a bug in the implementation.
    fn clean(self, errors: &mut FormErrors) -> Option<Self::Cleaned>;
}

/// Run structural validation then cleaning, returning the value and every error found
///
/// Use this when further checks (such as lookups in the store) must add their
/// own field errors before the form is accepted or rejected.
pub fn clean_form<F: Form>(form: F) -> (Option<F::Cleaned>, FormErrors) {
    let mut errors = match form.validate() {
        Ok(()) => FormErrors::new(),
        Err(e) => FormErrors::from_validation(&e, F::FIELDS),
    };

    let cleaned = form.clean(&mut errors);
    if cleaned.is_none() && errors.is_empty() {
        errors.add("__all__", "Form could not be cleaned.");
    }
    (cleaned, errors)
}

/// Run structural validation then cleaning, failing with every field error at once
pub fn validate_form<F: Form>(form: F) -> RentalResult<F::Cleaned> {
    match clean_form(form) {
        (Some(value), errors) if errors.is_empty() => Ok(value),
        (_, errors) => Err(RentalError::Validation(ValidationError::Form(errors))),
    }
}

/// Parse an optional raw field with `FromStr`, recording a required or parse error
pub fn parse_required<T: FromStr>(
    field: &str,
    raw: Option<&str>,
    invalid: &str,
    errors: &mut FormErrors,
) -> Option<T> {
    match raw.map(str::trim) {
        None | Some("") => {
            if !errors.contains(field) {
                errors.add(field, REQUIRED);
            }
            None
        }
        Some(value) => parse_value(field, value, invalid, errors),
    }
}

/// Parse a raw value with `FromStr`, recording `invalid` on failure
pub fn parse_value<T: FromStr>(
    field: &str,
    raw: &str,
    invalid: &str,
    errors: &mut FormErrors,
) -> Option<T> {
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(field, invalid);
            None
        }
    }
}

/// Message for a date field that does not parse
pub const INVALID_DATE: &str = "Enter a valid date (YYYY-MM-DD).";

/// Message for an identifier field that does not parse
pub const INVALID_ID: &str = "Enter a valid identifier.";

pub fn parse_date(field: &str, raw: Option<&str>, errors: &mut FormErrors) -> Option<NaiveDate> {
    parse_required(field, raw, INVALID_DATE, errors)
}

pub fn parse_id(field: &str, raw: Option<&str>, errors: &mut FormErrors) -> Option<Uuid> {
    parse_required(field, raw, INVALID_ID, errors)
}
