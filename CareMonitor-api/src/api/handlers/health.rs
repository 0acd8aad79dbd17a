use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{extract::State, http::StatusCode, Json};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use care_monitor_domain::health::{ComponentStatus, SystemStatus};

use crate::api::state::HealthServiceHandle;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Overall status ("ok", "degraded" or "error")
    pub status: String,
    /// Application version from the Cargo manifest
    pub version: String,
    /// Seconds since the Unix epoch when the response was generated
    pub timestamp: u64,
    /// Seconds since the server started
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    /// Per-component status, keyed by component name
    pub components: BTreeMap<String, ComponentHealthStatus>,
    /// Value of `APP_ENV`
    pub environment: String,
}

/// Health status for an individual component
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealthStatus {
    /// "ok", "degraded" or "error"
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

static SERVER_START_TIME: OnceCell<u64> = OnceCell::new();

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Record the server start time for uptime reporting; later calls are no-ops
pub fn initialize_server_start_time() {
    SERVER_START_TIME.get_or_init(now_secs);
}

/// Report whether the store and the alert mail settings are usable
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "All components healthy", body = HealthResponse),
        (status = 500, description = "Store unavailable", body = HealthResponse),
        (status = 503, description = "Alerts cannot be delivered", body = HealthResponse)
    ),
    tag = "health"
)]
#[instrument(skip(health_service))]
pub async fn health_check(
    State(health_service): State<HealthServiceHandle>,
) -> (StatusCode, Json<HealthResponse>) {
    info!("Health check requested");

    let now = now_secs();
    let uptime = SERVER_START_TIME
        .get()
        .map(|&start| now.saturating_sub(start));

    let system_health = health_service.get_system_health().await;

    let (status, code) = match system_health.status {
        SystemStatus::Healthy => ("ok", StatusCode::OK),
        SystemStatus::Degraded => ("degraded", StatusCode::SERVICE_UNAVAILABLE),
        SystemStatus::Unhealthy => ("error", StatusCode::INTERNAL_SERVER_ERROR),
    };

    let components = system_health
        .components
        .into_iter()
        .map(|(name, component)| {
            (
                name,
                ComponentHealthStatus {
                    status: component_label(&component.status).to_string(),
                    message: component.details,
                },
            )
        })
        .collect();

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: now,
        uptime,
        components,
        environment: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
    };

    (code, Json(response))
}

fn component_label(status: &ComponentStatus) -> &'static str {
    match status {
        ComponentStatus::Healthy => "ok",
        ComponentStatus::Degraded => "degraded",
        ComponentStatus::Unhealthy => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use care_monitor_domain::health::{HealthComponent, HealthServiceTrait, SystemHealth};

    struct FixedHealth(Vec<(&'static str, ComponentStatus)>);

    #[async_trait]
    impl HealthServiceTrait for FixedHealth {
        async fn get_system_health(&self) -> SystemHealth {
            let components: HashMap<String, HealthComponent> = self
                .0
                .iter()
                .map(|(name, status)| {
                    (
                        name.to_string(),
                        HealthComponent {
                            status: status.clone(),
                            details: (*status != ComponentStatus::Healthy)
                                .then(|| format!("{} is not ready", name)),
                        },
                    )
                })
                .collect();
            SystemHealth::from_components(components)
        }
    }

    async fn check(components: Vec<(&'static str, ComponentStatus)>) -> (StatusCode, HealthResponse) {
        let handle: HealthServiceHandle = Arc::new(FixedHealth(components));
        let (code, Json(body)) = health_check(State(handle)).await;
        (code, body)
    }

    #[tokio::test]
    async fn healthy_system_reports_ok() {
        initialize_server_start_time();
        let (code, body) = check(vec![
            ("database", ComponentStatus::Healthy),
            ("mail", ComponentStatus::Healthy),
        ])
        .await;

        assert_eq!(code, StatusCode::OK);
        assert_eq!(body.status, "ok");
        assert_eq!(body.components["database"].status, "ok");
        assert!(body.components["mail"].message.is_none());
        assert!(body.uptime.is_some());
    }

    #[tokio::test]
    async fn degraded_mail_is_service_unavailable() {
        let (code, body) = check(vec![
            ("database", ComponentStatus::Healthy),
            ("mail", ComponentStatus::Degraded),
        ])
        .await;

        assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
        assert_eq!(
            body.components["mail"].message.as_deref(),
            Some("mail is not ready")
        );
    }

    #[tokio::test]
    async fn unhealthy_database_is_internal_error() {
        let (code, body) = check(vec![
            ("database", ComponentStatus::Unhealthy),
            ("mail", ComponentStatus::Degraded),
        ])
        .await;

        assert_eq!(code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.status, "error");
        assert_eq!(body.components["database"].status, "error");
    }
}
