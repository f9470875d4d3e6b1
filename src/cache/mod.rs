mod memory;
mod redis;

pub use self::memory::MemoryBackend;
pub use self::redis::RedisBackend;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::CacheBackendKind;
use crate::metrics::CACHE_ERRORS;

// how long a completion stays cached
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend: {0}")]
    Backend(String),

    #[error("cache backend timed out")]
    Timeout,
}

#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
    fn name(&self) -> &'static str;
}

// Settings needed to open the backing store
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub backend: CacheBackendKind,
    pub redis_url: String,
    pub timeout: Duration,
    pub ttl: Duration,
}

// fail-open: backend errors are logged, reads miss and writes are dropped
#[derive(Clone)]
pub struct CacheStore {
    backend: Option<Arc<dyn CacheBackend>>,
    ttl: Duration,
}

impl CacheStore {
    pub fn new(backend: Arc<dyn CacheBackend>, ttl: Duration) -> Self {
        Self {
            backend: Some(backend),
            ttl,
        }
    }

    pub fn degraded(ttl: Duration) -> Self {
        Self { backend: None, ttl }
    }

    // unreachable backend at startup means degraded for the process lifetime
    pub async fn connect(config: &CacheConfig) -> Self {
        match config.backend {
            CacheBackendKind::Memory => {
                tracing::info!("Using in-memory cache");
                Self::new(Arc::new(MemoryBackend::new()), config.ttl)
            }
            CacheBackendKind::Redis => {
                match RedisBackend::connect(&config.redis_url, config.timeout).await {
                    Ok(backend) => {
                        tracing::info!(url = %config.redis_url, "Connected to Redis");
                        Self::new(Arc::new(backend), config.ttl)
                    }
                    Err(e) => {
                        CACHE_ERRORS.inc();
                        tracing::warn!(
                            url = %config.redis_url,
                            error = %e,
                            "Failed to connect to Redis, caching disabled"
                        );
                        Self::degraded(config.ttl)
                    }
                }
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let backend = self.backend.as_ref()?;
        match backend.get(key).await {
            Ok(value) => value,
            Err(e) => {
                CACHE_ERRORS.inc();
                tracing::warn!(backend = backend.name(), key, error = %e, "Cache read failed");
                None
            }
        }
    }

    pub async fn set(&self, key: &str, value: &str, ttl: Duration) {
        let Some(backend) = self.backend.as_ref() else {
            return;
        };
        if let Err(e) = backend.set(key, value, ttl).await {
            CACHE_ERRORS.inc();
            tracing::warn!(backend = backend.name(), key, error = %e, "Cache write failed");
        }
    }
}
