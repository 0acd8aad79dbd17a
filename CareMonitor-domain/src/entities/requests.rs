use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use crate::validation::{check_rules, Payload, PayloadError};

/// Spoken when a reminder request carries no message
pub const DEFAULT_REMINDER: &str = "This is your reminder.";

/// A heart-rate / blood-pressure reading submitted by a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct HealthDataRequest {
    /// Heart rate in beats per minute; numeric text is accepted
    #[validate(range(min = 0, max = 200, message = "heart_rate must be between 0 and 200 bpm"))]
    #[cfg_attr(feature = "with-api", schema(example = 72))]
    pub heart_rate: i64,

    /// Blood pressure, free text such as "120/80"
    #[validate(length(max = 64, message = "bp must be at most 64 characters"))]
    #[cfg_attr(feature = "with-api", schema(example = "120/80"))]
    pub bp: String,
}

impl HealthDataRequest {
    pub fn from_payload(body: &Value) -> Result<Self, PayloadError> {
        let payload = Payload::new(body)?;
        let request = Self {
            heart_rate: payload.required_integer("heart_rate")?,
            bp: payload.required_text("bp")?,
        };
        check_rules(&request)?;
        Ok(request)
    }
}

/// A detected fall
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct FallAlertRequest {
    /// Where the fall happened
    #[validate(length(max = 200, message = "location must be at most 200 characters"))]
    #[cfg_attr(feature = "with-api", schema(example = "Living Room"))]
    pub location: String,
}

impl FallAlertRequest {
    pub fn from_payload(body: &Value) -> Result<Self, PayloadError> {
        let payload = Payload::new(body)?;
        let request = Self {
            location: payload.required_text("location")?,
        };
        check_rules(&request)?;
        Ok(request)
    }
}

/// Text to be spoken aloud
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct ReminderRequest {
    /// Message to speak; defaults to a generic reminder
    #[validate(length(max = 1000, message = "message must be at most 1000 characters"))]
    #[cfg_attr(feature = "with-api", schema(example = "Time to take your medication."))]
    pub message: String,
}

impl ReminderRequest {
    pub fn from_payload(body: &Value) -> Result<Self, PayloadError> {
        let payload = Payload::new(body)?;
        let request = Self {
            message: payload
                .optional_text("message")?
                .unwrap_or_else(|| DEFAULT_REMINDER.to_string()),
        };
        check_rules(&request)?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn health_data_accepts_valid_reading() {
        let request = HealthDataRequest::from_payload(&json!({"heart_rate": 72, "bp": "120/80"}))
            .unwrap();
        assert_eq!(request.heart_rate, 72);
        assert_eq!(request.bp, "120/80");
    }

    #[test]
    fn health_data_accepts_zero_and_numeric_text() {
        let zero = HealthDataRequest::from_payload(&json!({"heart_rate": 0, "bp": "90/60"})).unwrap();
        assert_eq!(zero.heart_rate, 0);

        let text = HealthDataRequest::from_payload(&json!({"heart_rate": "200", "bp": "140/90"}))
            .unwrap();
        assert_eq!(text.heart_rate, 200);
    }

    #[test]
    fn health_data_requires_both_fields() {
        assert_eq!(
            HealthDataRequest::from_payload(&json!({"bp": "120/80"})),
            Err(PayloadError::MissingField { field: "heart_rate" })
        );
        assert_eq!(
            HealthDataRequest::from_payload(&json!({"heart_rate": 72})),
            Err(PayloadError::MissingField { field: "bp" })
        );
        assert_eq!(
            HealthDataRequest::from_payload(&json!({"heart_rate": 72, "bp": ""})),
            Err(PayloadError::MissingField { field: "bp" })
        );
    }

    #[test]
    fn health_data_rejects_out_of_range_heart_rate() {
        for hr in [-1, 201, 1000] {
            let err = HealthDataRequest::from_payload(&json!({"heart_rate": hr, "bp": "120/80"}))
                .unwrap_err();
            assert_eq!(
                err,
                PayloadError::Constraint("heart_rate must be between 0 and 200 bpm".to_string())
            );
        }
    }

    #[test]
    fn health_data_rejects_non_numeric_heart_rate() {
        let err = HealthDataRequest::from_payload(&json!({"heart_rate": "fast", "bp": "120/80"}))
            .unwrap_err();
        assert_eq!(err.to_string(), "heart_rate must be a whole number");
    }

    #[test]
    fn health_data_aggregates_bound_violations() {
        let long_bp = "1".repeat(65);
        let err = HealthDataRequest::from_payload(&json!({"heart_rate": 250, "bp": long_bp}))
            .unwrap_err();
        assert_eq!(
            err,
            PayloadError::Constraint(
                "bp must be at most 64 characters; heart_rate must be between 0 and 200 bpm"
                    .to_string()
            )
        );
    }

    #[test]
    fn fall_alert_requires_location() {
        assert_eq!(
            FallAlertRequest::from_payload(&json!({})),
            Err(PayloadError::MissingField { field: "location" })
        );
        assert_eq!(
            FallAlertRequest::from_payload(&json!({"location": 12})),
            Err(PayloadError::InvalidType {
                field: "location",
                expected: "a string"
            })
        );
        assert_eq!(
            FallAlertRequest::from_payload(&json!({"location": "Kitchen"}))
                .unwrap()
                .location,
            "Kitchen"
        );
    }

    #[test]
    fn reminder_defaults_message() {
        let request = ReminderRequest::from_payload(&json!({})).unwrap();
        assert_eq!(request.message, DEFAULT_REMINDER);
    }

    #[test]
    fn reminder_rejects_non_string_message() {
        assert_eq!(
            ReminderRequest::from_payload(&json!({"message": 42})),
            Err(PayloadError::InvalidType {
                field: "message",
                expected: "a string"
            })
        );
        assert!(ReminderRequest::from_payload(&json!({"message": null})).is_err());
    }

    #[test]
    fn every_request_rejects_non_objects() {
        let body = json!(["heart_rate", 72]);
        assert_eq!(HealthDataRequest::from_payload(&body), Err(PayloadError::NotAnObject));
        assert_eq!(FallAlertRequest::from_payload(&body), Err(PayloadError::NotAnObject));
        assert_eq!(ReminderRequest::from_payload(&body), Err(PayloadError::NotAnObject));
    }
}
