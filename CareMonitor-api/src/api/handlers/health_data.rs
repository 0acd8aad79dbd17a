use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::{info, instrument};

use care_monitor_domain::entities::HealthDataRequest;

use crate::api::error::ApiError;
use crate::api::state::HealthDataServiceHandle;
use crate::entities::responses::HealthDataResponse;

/// Validate, classify and store a heart-rate / blood-pressure reading
#[utoipa::path(
    post,
    path = "/health-data",
    request_body = HealthDataRequest,
    responses(
        (status = 200, description = "Reading stored and analysed", body = HealthDataResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Store unavailable", body = ErrorResponse),
    ),
    tag = "health_data"
)]
#[instrument(skip(service, payload))]
pub async fn submit_health_data(
    State(service): State<HealthDataServiceHandle>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<HealthDataResponse>, ApiError> {
    let Json(body) = payload?;
    let request = HealthDataRequest::from_payload(&body)?;

    let record = service.record_reading(request).await?;
    info!("Health record {} stored as {}", record.id, record.status);

    Ok(Json(HealthDataResponse::processed(record)))
}
