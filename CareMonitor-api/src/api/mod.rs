pub mod error;
pub mod handlers;
pub mod routes;
pub mod security;
pub mod state;

use axum::Router;

pub use routes::create_app;
pub use state::AppState;

/// Create the application router
pub fn create_application(state: AppState) -> Router {
    routes::create_app(state)
}
