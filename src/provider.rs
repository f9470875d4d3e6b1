use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

// Cloneable so a single in-flight result can be handed to every waiter
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Request(String),

    #[error("provider returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("provider did not respond within {0:?}")]
    Timeout(Duration),

    #[error("no API key configured for the completion provider")]
    MissingApiKey,

    #[error("completion task aborted: {0}")]
    Aborted(String),
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str, temperature: f64) -> Result<String, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

// OpenAI completions API request format
#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f64,
    max_tokens: u32,
}

// OpenAI completions API response format
#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    text: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

// any OpenAI-compatible /completions endpoint
pub struct OpenAiProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.filter(|k| !k.is_empty()),
            model: config.model,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str, temperature: f64) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&CompletionRequest {
                model: &self.model,
                prompt,
                temperature,
                max_tokens: self.max_tokens,
            })
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = res
            .json::<CompletionResponse>()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or_else(|| ProviderError::MalformedResponse("no choices in response".to_string()))
    }
}
