use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Serve Swagger UI and the raw OpenAPI document
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::pages::index,
        crate::api::handlers::pages::profile,
        crate::api::handlers::health_data::submit_health_data,
        crate::api::handlers::fall_alert::send_fall_alert,
        crate::api::handlers::reminder::send_reminder,
        crate::api::handlers::health::health_check,
    ),
    components(
        schemas(
            care_monitor_domain::entities::HealthDataRequest,
            care_monitor_domain::entities::FallAlertRequest,
            care_monitor_domain::entities::ReminderRequest,
            care_monitor_domain::entities::HealthRecord,
            care_monitor_domain::entities::HeartRateStatus,
            crate::entities::common::ErrorResponse,
            crate::entities::responses::HealthDataResponse,
            crate::entities::responses::FallAlertResponse,
            crate::entities::responses::ReminderResponse,
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentHealthStatus,
        )
    ),
    tags(
        (name = "pages", description = "Static pages"),
        (name = "health_data", description = "Heart-rate and blood-pressure readings"),
        (name = "alerts", description = "Caregiver fall alerts"),
        (name = "reminders", description = "Spoken reminders"),
        (name = "health", description = "Service health check")
    ),
    info(
        title = "CareMonitor API",
        version = "0.1.0",
        description = "Elderly-care monitoring: vital readings, fall alerts and spoken reminders",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let openapi = ApiDoc::openapi();

        assert_eq!(openapi.info.title, "CareMonitor API");
        for path in ["/", "/profile", "/health-data", "/fall-alert", "/send-reminder", "/health"] {
            assert!(
                openapi.paths.paths.contains_key(path),
                "missing path {}",
                path
            );
        }
    }

    #[test]
    fn registers_request_and_response_schemas() {
        let openapi = ApiDoc::openapi();
        let schemas = &openapi
            .components
            .as_ref()
            .expect("components are generated")
            .schemas;

        for name in ["HealthDataRequest", "HealthDataResponse", "ErrorResponse", "HealthResponse"] {
            assert!(schemas.contains_key(name), "missing schema {}", name);
        }
    }

    #[test]
    fn tags_cover_each_area() {
        let openapi = ApiDoc::openapi();
        let tags = openapi.tags.unwrap_or_default();
        for name in ["health_data", "alerts", "reminders", "health"] {
            assert!(tags.iter().any(|tag| tag.name == name));
        }
    }
}
