use axum::{Json, response::IntoResponse};

// Liveness only, does not touch the cache backend
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
