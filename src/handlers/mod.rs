mod health;
mod metrics;
mod ai;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use ai::ai_handler;
