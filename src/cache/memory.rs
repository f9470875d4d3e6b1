use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

use super::{CacheBackend, CacheError};

// how often a write also drops every expired entry
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

// Cache entry with absolute expiry, never modified after insert
#[derive(Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

// in-process backend, on tokio's clock so paused-time tests can age entries
pub struct MemoryBackend {
    entries: DashMap<String, CacheEntry>,
    next_sweep: Mutex<Instant>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_sweep: Mutex::new(Instant::now() + SWEEP_INTERVAL),
        }
    }

    fn sweep_expired(&self, now: Instant) {
        {
            let mut next_sweep = match self.next_sweep.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if now < *next_sweep {
                return;
            }
            *next_sweep = now + SWEEP_INTERVAL;
        }

        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            tracing::debug!(removed, "Swept expired cache entries");
        }
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            // a fresh entry may have replaced it since the read guard dropped
            self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let now = Instant::now();
        self.sweep_expired(now);
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
