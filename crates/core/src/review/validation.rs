//! Parse-and-validate step for review creation payloads.
//!
//! Turns an untyped JSON value into a typed [`CreateReview`] or a structured
//! [`ValidationError`] naming the offending field and the expected type.

use serde_json::Value;
use thiserror::Error;

use super::types::CreateReview;

/// Human-readable summary of the create contract, used in 400 responses.
pub const REQUIRED_FIELDS_MESSAGE: &str =
    "user_id, place_id, rating, price, and review are required";

/// Errors produced when validating a review creation payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
    #[error("invalid value for field {field}: expected {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("request body must be a JSON object")]
    NotAnObject,
}

impl CreateReview {
    /// Validate an untyped JSON payload into a typed `CreateReview`.
    ///
    /// All five fields must be present and coercible: `user_id`, `place_id`,
    /// `price`, and `review` accept strings or numbers (numbers are
    /// stringified); `rating` accepts integers, integral floats, and
    /// integer-formatted strings. The first failing field is reported.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        if !value.is_object() {
            return Err(ValidationError::NotAnObject);
        }

        Ok(Self {
            user_id: required_string(value, "user_id")?,
            place_id: required_string(value, "place_id")?,
            rating: required_integer(value, "rating")?,
            price: required_string(value, "price")?,
            review: required_string(value, "review")?,
        })
    }
}

fn required_string(value: &Value, field: &'static str) -> Result<String, ValidationError> {
    let field_value = value
        .get(field)
        .ok_or(ValidationError::MissingField { field })?;

    match field_value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(ValidationError::InvalidType {
            field,
            expected: "string",
        }),
    }
}

fn required_integer(value: &Value, field: &'static str) -> Result<i64, ValidationError> {
    let field_value = value
        .get(field)
        .ok_or(ValidationError::MissingField { field })?;

    let invalid = ValidationError::InvalidType {
        field,
        expected: "integer",
    };

    match field_value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            // Integral floats (e.g. 4.0) are accepted; 4.5 is not.
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
                    Ok(f as i64)
                }
                _ => Err(invalid),
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid),
        _ => Err(invalid),
    }
}
