use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::provider::ProviderError;

// Errors that reach the HTTP boundary or abort startup
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("no available ports found between {start} and {end}")]
    NoAvailablePort { start: u16, end: u16 },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}
