//! Field-level validation rules shared by creation inputs.
//!
//! # Responsibility
//! - Enforce format, range and temporal constraints before persistence.
//! - Report the offending field and constraint in every rejection.
//!
//! # Invariants
//! - Validation never touches storage; it is pure over its inputs.
//! - Date rules are evaluated against the caller-supplied reference day.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Accepts ISBN-10 and ISBN-13 (978/979 prefixed) forms; the final
/// character may be the literal checksum character `X`.
static ISBN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(97[89])?\d{9}(\d|X)$").expect("valid isbn regex"));

/// Rejection of one malformed input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the offending field.
    pub field: &'static str,
    /// Human-readable description of the violated constraint.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid `{}`: {}", self.field, self.message)
    }
}

impl Error for ValidationError {}

/// Returns the current calendar date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Requires `value` to be `min..=max` characters long.
pub(crate) fn check_name_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let chars = value.chars().count();
    if chars < min || chars > max {
        return Err(ValidationError::new(
            field,
            format!("must be between {min} and {max} characters, got {chars}"),
        ));
    }
    Ok(())
}

/// Requires `value` to contain at least one non-whitespace character.
pub(crate) fn check_non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be blank"));
    }
    Ok(())
}

/// Requires `value` to match the ISBN-10/13 pattern.
pub(crate) fn check_isbn(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if !ISBN_RE.is_match(value) {
        return Err(ValidationError::new(
            field,
            format!("`{value}` is not a valid ISBN-10/13"),
        ));
    }
    Ok(())
}

/// Requires `value` to be strictly earlier than `today`.
pub(crate) fn check_strictly_past(
    field: &'static str,
    value: NaiveDate,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if value >= today {
        return Err(ValidationError::new(
            field,
            format!("{value} must be strictly before {today}"),
        ));
    }
    Ok(())
}

/// Requires `value` not to be later than `today`.
pub(crate) fn check_not_future(
    field: &'static str,
    value: NaiveDate,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if value > today {
        return Err(ValidationError::new(
            field,
            format!("{value} must not be later than {today}"),
        ));
    }
    Ok(())
}

/// Requires `year` to be positive and not beyond the current calendar year.
pub(crate) fn check_established_year(
    field: &'static str,
    year: i32,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if year <= 0 {
        return Err(ValidationError::new(field, "must be greater than 0"));
    }
    let current = today.year();
    if year > current {
        return Err(ValidationError::new(
            field,
            format!("{year} must not be later than {current}"),
        ));
    }
    Ok(())
}
