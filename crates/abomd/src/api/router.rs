//! Route table and middleware stack.
//!
//! Layers (outermost first): CORS → body limit → handler.

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use super::handlers;
use super::AppState;
use crate::config::ServerConfig;

pub fn build_router(state: AppState, config: &ServerConfig) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.cors_header_values()?))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    Ok(Router::new()
        .route("/", get(handlers::health))
        .route("/api/calculate-risk", post(handlers::calculate_risk))
        .route("/api/download-report", post(handlers::download_report))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors))
}
