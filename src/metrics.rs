use lazy_static::lazy_static;
use prometheus::{Counter, Histogram, register_counter, register_histogram};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("ai_requests_total", "Total number of /ai requests").unwrap();
    pub static ref CACHE_HITS: Counter =
        register_counter!("ai_cache_hits_total", "Total cache hits").unwrap();
    pub static ref CACHE_MISSES: Counter =
        register_counter!("ai_cache_misses_total", "Total cache misses").unwrap();
    pub static ref CACHE_ERRORS: Counter =
        register_counter!("ai_cache_errors_total", "Cache backend failures absorbed as misses").unwrap();
    pub static ref PROVIDER_CALLS: Counter =
        register_counter!("ai_provider_calls_total", "Total completion provider calls").unwrap();
    pub static ref PROVIDER_ERRORS: Counter =
        register_counter!("ai_provider_errors_total", "Total failed completion provider calls").unwrap();
    pub static ref COALESCED_REQUESTS: Counter = register_counter!(
        "ai_coalesced_requests_total",
        "Requests that joined an identical in-flight provider call"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "ai_request_latency_seconds",
        "Request latency in seconds"
    )
    .unwrap();
    pub static ref PROVIDER_LATENCY: Histogram = register_histogram!(
        "ai_provider_latency_seconds",
        "Completion provider latency in seconds"
    )
    .unwrap();
}
