use tokio::net::TcpListener;

use crate::error::AppError;

// bind the first free port in start..start + attempts
pub async fn bind_available(host: &str, start: u16, attempts: u16) -> Result<TcpListener, AppError> {
    let end = start.saturating_add(attempts.max(1) - 1);

    for port in start..=end {
        match TcpListener::bind((host, port)).await {
            Ok(listener) => return Ok(listener),
            Err(e) => tracing::debug!(port, error = %e, "Port unavailable"),
        }
    }
    Err(AppError::NoAvailablePort { start, end })
}
