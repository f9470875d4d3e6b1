use clap::{Parser, ValueEnum};
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::provider::OpenAiConfig;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackendKind {
    Redis,
    Memory,
}

// CLI argument structure, every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "ai-prompt-gateway")]
#[command(about = "Caching HTTP front for LLM prompt completions")]
pub struct Args {
    // Interface to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    // First port to try
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    // How many consecutive ports to try when the first is taken
    #[arg(long, default_value_t = 100)]
    pub port_attempts: u16,

    #[arg(long, value_enum, env = "CACHE_BACKEND", default_value_t = CacheBackendKind::Redis)]
    pub cache_backend: CacheBackendKind,

    #[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379/0")]
    pub redis_url: String,

    // Redis connect/command timeout in seconds
    #[arg(long, default_value_t = 5)]
    pub redis_timeout: u64,

    // Cache TTL in seconds (24 hours)
    #[arg(short, long, env = "CACHE_TTL_SECS", default_value_t = 86_400)]
    pub cache_ttl: u64,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub openai_base_url: String,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(short, long, env = "OPENAI_MODEL", default_value = "gpt-3.5-turbo-instruct")]
    pub model: String,

    #[arg(long, default_value_t = 256)]
    pub max_tokens: u32,

    // Upper bound on a single completion call, in seconds
    #[arg(long, default_value_t = 60)]
    pub provider_timeout: u64,

    // Origin allowed to call the API from a browser
    #[arg(long, env = "CORS_ORIGIN", default_value = "http://localhost:3000")]
    pub cors_origin: String,
}

impl Args {
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            backend: self.cache_backend,
            redis_url: self.redis_url.clone(),
            timeout: Duration::from_secs(self.redis_timeout),
            ttl: Duration::from_secs(self.cache_ttl),
        }
    }

    pub fn provider_config(&self) -> OpenAiConfig {
        OpenAiConfig {
            base_url: self.openai_base_url.clone(),
            api_key: self.openai_api_key.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            timeout: self.provider_timeout(),
        }
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout)
    }
}
