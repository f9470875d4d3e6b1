pub mod cache;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod handlers;
pub mod inflight;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod port;
pub mod provider;
pub mod state;
pub mod template;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

use crate::error::AppError;
use crate::handlers::{ai_handler, health_handler, metrics_handler};
use crate::state::AppState;

// creating the router, `cors_origin` is the one browser origin allowed in
pub fn app(state: Arc<AppState>, cors_origin: &str) -> Result<Router, AppError> {
    let origin = HeaderValue::from_str(cors_origin)
        .map_err(|e| AppError::Config(format!("CORS origin {cors_origin:?}: {e}")))?;

    // wildcards are not allowed together with credentials, so mirror instead
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    Ok(Router::new()
        .route("/health", get(health_handler))
        .route("/ai", post(ai_handler))
        .route("/metrics", get(metrics_handler))
        .layer(cors)
        .with_state(state))
}
