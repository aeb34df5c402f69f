//! HTTP client for an OpenAI-compatible chat-completions endpoint.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info};

use crate::config::RemoteConfig;
use crate::error::{MindMapError, Result};

/// Anything that turns a prompt into a completion.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: String) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Completion service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    client: Client,
    config: RemoteConfig,
}

impl HttpCompletionClient {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    fn build_request(&self, payload: &ChatRequest<'_>) -> Result<reqwest::RequestBuilder> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &self.config.api_key {
            let value = format!("Bearer {}", key)
                .parse::<HeaderValue>()
                .map_err(|_| MindMapError::Config("API key is not a valid header value".into()))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(self
            .client
            .post(&self.config.api_url)
            .headers(headers)
            .json(payload))
    }
}

#[async_trait]
impl CompletionService for HttpCompletionClient {
    async fn complete(&self, prompt: String) -> Result<String> {
        let payload = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream: false,
        };

        info!(
            "Requesting completion from {} (model {})",
            self.config.api_url, self.config.model
        );

        let request = self.build_request(&payload)?;
        let response = timeout(Duration::from_secs(self.config.timeout_secs), request.send()).await??;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Completion service returned {}: {}", status, body);
            return Err(MindMapError::Http(format!(
                "completion service returned {}",
                status
            )));
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| {
                MindMapError::MalformedExternalResult("Invalid API response format".to_string())
            })
    }
}
