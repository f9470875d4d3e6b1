use ::redis::AsyncCommands;
use ::redis::aio::ConnectionManager;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

use super::{CacheBackend, CacheError};

// opened once and shared, the manager reconnects if the server comes back
#[derive(Clone)]
pub struct RedisBackend {
    conn: ConnectionManager,
    timeout: Duration,
}

// bound a redis command by the configured timeout
async fn bounded<T>(
    timeout: Duration,
    fut: impl Future<Output = ::redis::RedisResult<T>>,
) -> Result<T, CacheError> {
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| CacheError::Timeout)?
        .map_err(|e| CacheError::Backend(e.to_string()))
}

// SETEX takes whole seconds and rejects zero, so round up
fn expiry_seconds(ttl: Duration) -> u64 {
    let seconds = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
    seconds.max(1)
}

impl RedisBackend {
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self, CacheError> {
        let client = ::redis::Client::open(url)
            .map_err(|e| CacheError::Backend(format!("invalid URL: {e}")))?;

        let mut conn = bounded(timeout, client.get_connection_manager()).await?;
        let pong: String = bounded(timeout, ::redis::cmd("PING").query_async(&mut conn)).await?;
        tracing::debug!(reply = %pong, "Redis ping");

        Ok(Self { conn, timeout })
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        bounded(self.timeout, conn.get::<_, Option<String>>(key)).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        bounded(self.timeout, conn.set_ex::<_, _, ()>(key, value, expiry_seconds(ttl))).await
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
