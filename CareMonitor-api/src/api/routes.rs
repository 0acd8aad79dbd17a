use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::api::handlers::{fall_alert, health, health_data, pages, reminder};
use crate::api::security::configure_security;
use crate::api::state::AppState;
use crate::openapi::configure_swagger_routes;

/// Create the application router
pub fn create_app(state: AppState) -> Router {
    debug!("Creating application router");

    let page_routes = Router::new()
        .route("/", get(pages::index))
        .route("/profile", get(pages::profile));

    let api_routes = Router::new()
        .route("/health-data", post(health_data::submit_health_data))
        .route("/fall-alert", post(fall_alert::send_fall_alert))
        .route("/send-reminder", post(reminder::send_reminder))
        .route("/health", get(health::health_check));

    let app = Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .with_state(state)
        .merge(configure_swagger_routes());

    debug!("Routes configured");

    let app = configure_security(app).layer(TraceLayer::new_for_http());

    health::initialize_server_start_time();

    app
}
