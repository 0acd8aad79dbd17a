use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::instrument;

use care_monitor_domain::entities::ReminderRequest;

use crate::api::error::ApiError;
use crate::api::state::ReminderServiceHandle;
use crate::entities::responses::ReminderResponse;

/// Speak a reminder aloud; blocks until playback has finished
#[utoipa::path(
    post,
    path = "/send-reminder",
    request_body = ReminderRequest,
    responses(
        (status = 200, description = "Reminder spoken", body = ReminderResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Speech engine failed", body = ErrorResponse),
    ),
    tag = "reminders"
)]
#[instrument(skip(service, payload))]
pub async fn send_reminder(
    State(service): State<ReminderServiceHandle>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ReminderResponse>, ApiError> {
    let Json(body) = payload?;
    let request = ReminderRequest::from_payload(&body)?;

    let spoken = service.send_reminder(request).await?;

    Ok(Json(ReminderResponse::sent(spoken)))
}
