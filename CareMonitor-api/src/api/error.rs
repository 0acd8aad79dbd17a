use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use care_monitor_domain::services::{FallAlertError, HealthDataServiceError, ReminderError};
use care_monitor_domain::validation::PayloadError;

use crate::entities::common::ErrorResponse;

/// Every way a request can fail, mapped to a status code and an `error` body
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body is not declared as JSON
    #[error("Request must be JSON")]
    NotJson,

    /// Body is declared as JSON but cannot be read as JSON
    #[error("Request body is not valid JSON: {0}")]
    InvalidJson(String),

    /// Body does not match the operation's schema
    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    HealthData(#[from] HealthDataServiceError),

    #[error(transparent)]
    FallAlert(#[from] FallAlertError),

    #[error(transparent)]
    Reminder(#[from] ReminderError),

    /// A static page could not be read
    #[error("Template error: {0}")]
    Template(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotJson | ApiError::InvalidJson(_) | ApiError::Payload(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::HealthData(_)
            | ApiError::FallAlert(_)
            | ApiError::Reminder(_)
            | ApiError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => ApiError::NotJson,
            other => ApiError::InvalidJson(other.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_client_error() {
            warn!("Rejected request: {}", message);
        } else {
            error!("Request failed: {}", message);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use care_monitor_data::mail::MailError;

    #[test]
    fn client_errors_are_bad_request() {
        assert_eq!(ApiError::NotJson.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Payload(PayloadError::MissingField { field: "location" }).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn downstream_errors_are_server_errors() {
        let err = ApiError::FallAlert(FallAlertError::Delivery(MailError::Connection(
            "connection refused".to_string(),
        )));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Failed to send alert: mail server connection failed: connection refused"
        );
    }

    #[test]
    fn payload_messages_pass_through() {
        let err = ApiError::from(PayloadError::MissingField { field: "heart_rate" });
        assert_eq!(err.to_string(), "heart_rate is required");
    }
}
