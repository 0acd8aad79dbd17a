use std::path::Path;

use axum::{extract::State, response::Html};
use tracing::{debug, instrument};

use crate::api::error::ApiError;
use crate::api::state::TemplateDir;

/// Landing page
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Landing page", content_type = "text/html", body = String),
        (status = 500, description = "Page could not be read", body = ErrorResponse),
    ),
    tag = "pages"
)]
#[instrument(skip(templates))]
pub async fn index(State(templates): State<TemplateDir>) -> Result<Html<String>, ApiError> {
    read_page(&templates.0, "index.html").await
}

/// Profile page
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Profile page", content_type = "text/html", body = String),
        (status = 500, description = "Page could not be read", body = ErrorResponse),
    ),
    tag = "pages"
)]
#[instrument(skip(templates))]
pub async fn profile(State(templates): State<TemplateDir>) -> Result<Html<String>, ApiError> {
    read_page(&templates.0, "profile.html").await
}

async fn read_page(dir: &Path, name: &str) -> Result<Html<String>, ApiError> {
    let path = dir.join(name);
    debug!("Serving page {}", path.display());

    tokio::fs::read_to_string(&path)
        .await
        .map(Html)
        .map_err(|e| ApiError::Template(format!("{}: {}", name, e)))
}
