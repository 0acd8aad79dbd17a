//! Schema checks for untyped JSON request bodies
//!
//! A body is first checked for shape (object, required fields present, field
//! types) field by field, stopping at the first failure. The resulting typed
//! request is then checked against its `validator` rules, and every rule
//! violation is folded into one message.

use serde_json::{Map, Value};
use thiserror::Error;
use validator::Validate;

/// Why a request body was refused
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// Body is JSON but not an object
    #[error("Invalid data format: expected a JSON object")]
    NotAnObject,

    /// Required field absent, null or blank
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// Field present with the wrong JSON type
    #[error("{field} must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    /// Field has the right type but breaks a bound
    #[error("{0}")]
    Constraint(String),
}

/// Borrowed view of a JSON object being checked against a schema
#[derive(Debug, Clone, Copy)]
pub struct Payload<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> Payload<'a> {
    /// Accept only JSON objects
    pub fn new(value: &'a Value) -> Result<Self, PayloadError> {
        value
            .as_object()
            .map(|fields| Self { fields })
            .ok_or(PayloadError::NotAnObject)
    }

    fn present(&self, field: &'static str) -> Option<&'a Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    /// A string field that must be present and not blank
    pub fn required_text(&self, field: &'static str) -> Result<String, PayloadError> {
        match self.present(field) {
            None => Err(PayloadError::MissingField { field }),
            Some(Value::String(s)) if s.trim().is_empty() => {
                Err(PayloadError::MissingField { field })
            }
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(PayloadError::InvalidType {
                field,
                expected: "a string",
            }),
        }
    }

    /// A string field that may be absent; `null` is not a string
    pub fn optional_text(&self, field: &'static str) -> Result<Option<String>, PayloadError> {
        match self.fields.get(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(PayloadError::InvalidType {
                field,
                expected: "a string",
            }),
        }
    }

    /// A whole number given either as a JSON number or as numeric text
    pub fn required_integer(&self, field: &'static str) -> Result<i64, PayloadError> {
        let not_integer = PayloadError::InvalidType {
            field,
            expected: "a whole number",
        };

        match self.present(field) {
            None => Err(PayloadError::MissingField { field }),
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    Ok(i)
                } else if n.as_u64().is_some() {
                    // Beyond i64; the bound check rejects it
                    Ok(i64::MAX)
                } else {
                    match n.as_f64() {
                        // `as` saturates at the i64 bounds
                        Some(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
                        _ => Err(not_integer),
                    }
                }
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                Err(PayloadError::MissingField { field })
            }
            Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| not_integer),
            Some(_) => Err(not_integer),
        }
    }
}

/// Run the `validator` rules of a typed request, joining every message
pub fn check_rules<T: Validate>(request: &T) -> Result<(), PayloadError> {
    let errors = match request.validate() {
        Ok(()) => return Ok(()),
        Err(errors) => errors,
    };

    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |err| match &err.message {
                Some(msg) => msg.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();

    Err(PayloadError::Constraint(messages.join("; ")))
}
