use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cache::CacheStore;
use crate::error::AppError;
use crate::fingerprint::fingerprint;
use crate::inflight::InFlight;
use crate::metrics::{CACHE_HITS, CACHE_MISSES, PROVIDER_CALLS, PROVIDER_ERRORS, PROVIDER_LATENCY};
use crate::models::{AiResponse, Query};
use crate::provider::{CompletionProvider, ProviderError};
use crate::template;

pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(60);

// app's shared state, built once in main and shared by every request
pub struct AppState {
    pub cache: CacheStore,
    pub provider: Arc<dyn CompletionProvider>,
    pub in_flight: InFlight,
    pub provider_timeout: Duration,
}

impl AppState {
    pub fn new(cache: CacheStore, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            cache,
            provider,
            in_flight: InFlight::new(),
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub async fn respond(&self, query: &Query) -> Result<AiResponse, AppError> {
        let key = fingerprint(query);

        // check cache first; an empty cached string counts as a miss
        if let Some(cached) = self.cache.get(&key).await.filter(|v| !v.is_empty()) {
            CACHE_HITS.inc();
            tracing::debug!(key = %key, "Cache HIT");
            return Ok(AiResponse {
                generated_text: cached,
                cache_hit: true,
            });
        }
        CACHE_MISSES.inc();
        tracing::debug!(key = %key, "Cache MISS - calling provider");

        let prompt = template::resolve(query.task_type, query.context.as_deref()).render(&query.text);
        let provider = Arc::clone(&self.provider);
        let cache = self.cache.clone();
        let temperature = query.temperature;
        let timeout = self.provider_timeout;
        let cache_key = key.clone();

        let generated_text = self
            .in_flight
            .run(&key, move || async move {
                let text = call_provider(provider.as_ref(), &prompt, temperature, timeout).await?;
                // only successful completions are cached
                cache.set(&cache_key, &text, cache.ttl()).await;
                Ok(text)
            })
            .await?;

        Ok(AiResponse {
            generated_text,
            cache_hit: false,
        })
    }
}

async fn call_provider(
    provider: &dyn CompletionProvider,
    prompt: &str,
    temperature: f64,
    timeout: Duration,
) -> Result<String, ProviderError> {
    PROVIDER_CALLS.inc();
    let start = Instant::now();

    let result = match tokio::time::timeout(timeout, provider.complete(prompt, temperature)).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout(timeout)),
    };

    PROVIDER_LATENCY.observe(start.elapsed().as_secs_f64());
    if let Err(e) = &result {
        PROVIDER_ERRORS.inc();
        tracing::error!(error = %e, "Completion provider failed");
    }
    result
}
