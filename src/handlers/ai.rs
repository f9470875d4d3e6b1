use axum::{Json, extract::State, extract::rejection::JsonRejection};
use std::sync::Arc;
use std::time::Instant;

use crate::error::AppError;
use crate::metrics::{REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::{AiResponse, Query, QueryRequest};
use crate::state::AppState;

pub async fn ai_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<AiResponse>, AppError> {
    REQUEST_TOTAL.inc();

    // malformed bodies never reach the cache or the provider
    let Json(payload) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let query = Query::try_from(payload)?;

    let start_time = Instant::now();
    let response = state.respond(&query).await?;
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    Ok(Json(response))
}
