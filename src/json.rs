//! JSON request bodies and the validation helpers shared by the resource handlers.

use axum::extract::{FromRequest, rejection::JsonRejection};

use crate::Error;

/// A JSON request body whose parse failures are reported as [Error::InvalidJson].
///
/// Request payloads declare their required fields as `Option`s so that a
/// missing field can be reported by name with [required] instead of a generic
/// deserialization error.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidJson(rejection.body_text())
    }
}

/// Unwrap a required field.
///
/// # Errors
///
/// Returns [Error::MissingField] naming `field` if `value` is `None`.
pub(crate) fn required<T>(value: Option<T>, field: &'static str) -> Result<T, Error> {
    value.ok_or(Error::MissingField(field))
}

/// Unwrap a required text field, treating an empty or whitespace-only string as missing.
///
/// The text is returned as given, surrounding whitespace included.
///
/// # Errors
///
/// Returns [Error::MissingField] naming `field` if `value` is `None` or blank.
pub(crate) fn required_text(value: Option<String>, field: &'static str) -> Result<String, Error> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(Error::MissingField(field)),
    }
}

/// Check that a replacement text value is not blank.
pub(crate) fn non_blank_text(value: String, field: &'static str) -> Result<String, Error> {
    if value.trim().is_empty() {
        return Err(Error::InvalidField {
            field,
            reason: "must not be empty",
        });
    }

    Ok(value)
}

/// Check that a money amount is a finite number no less than zero.
pub(crate) fn non_negative_amount(value: f64, field: &'static str) -> Result<f64, Error> {
    if !value.is_finite() {
        return Err(Error::InvalidField {
            field,
            reason: "must be a number",
        });
    }

    if value < 0.0 {
        return Err(Error::InvalidField {
            field,
            reason: "must not be negative",
        });
    }

    Ok(value)
}

/// Check that a money amount is a finite number greater than zero.
pub(crate) fn positive_amount(value: f64, field: &'static str) -> Result<f64, Error> {
    let value = non_negative_amount(value, field)?;

    if value == 0.0 {
        return Err(Error::InvalidField {
            field,
            reason: "must be greater than zero",
        });
    }

    Ok(value)
}
