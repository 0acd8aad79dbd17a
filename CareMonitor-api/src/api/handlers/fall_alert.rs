use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::{info, instrument};

use care_monitor_domain::entities::FallAlertRequest;

use crate::api::error::ApiError;
use crate::api::state::FallAlertServiceHandle;
use crate::entities::responses::FallAlertResponse;

/// Email the caregiver about a detected fall
#[utoipa::path(
    post,
    path = "/fall-alert",
    request_body = FallAlertRequest,
    responses(
        (status = 200, description = "Caregiver notified", body = FallAlertResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Mail configuration missing or delivery failed", body = ErrorResponse),
    ),
    tag = "alerts"
)]
#[instrument(skip(service, payload))]
pub async fn send_fall_alert(
    State(service): State<FallAlertServiceHandle>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<FallAlertResponse>, ApiError> {
    let Json(body) = payload?;
    let request = FallAlertRequest::from_payload(&body)?;

    info!("Fall reported at {}", request.location);
    service.send_alert(request).await?;

    Ok(Json(FallAlertResponse::sent()))
}
