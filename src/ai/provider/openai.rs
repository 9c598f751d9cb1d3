//! OpenAI API Provider
//!
//! Completion client using OpenAI's Chat Completions API.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

use super::CompletionClient;
use crate::ai::prompt::PromptTriple;
use crate::config::{Credentials, LlmConfig};
use crate::types::{ErrorClassifier, IdeaError, Result, Service, UpstreamError};

/// OpenAI API client with secure API key handling
pub struct OpenAiClient {
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    api_base: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig, credentials: &Credentials) -> Result<Self> {
        let api_key = SecretString::from(credentials.openai_api_key()?.expose_secret());

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| IdeaError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn build_request(prompt: &PromptTriple, model: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: prompt.system_message.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.user_message(),
                },
            ],
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &PromptTriple, model: &str) -> Result<String> {
        debug!("Requesting completion from OpenAI (model: {})", model);

        let start_time = Instant::now();
        let request = Self::build_request(prompt, model);
        let url = format!("{}/chat/completions", self.api_base);

        debug!("Sending request to OpenAI API");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::transport(Service::Completion, &e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ErrorClassifier::from_http(Service::Completion, status, &body).into());
        }

        let response_body: ChatCompletionResponse = response.json().await.map_err(|e| {
            UpstreamError::malformed(
                Service::Completion,
                format!("Failed to parse OpenAI response: {}", e),
            )
        })?;

        let text = response_body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                UpstreamError::malformed(Service::Completion, "No content in OpenAI response")
            })?;

        debug!(
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            chars = text.len(),
            "Received completion"
        );

        Ok(text.trim().to_string())
    }

    fn name(&self) -> &str {
        "openai"
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
