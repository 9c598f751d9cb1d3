//! Completion Provider Abstraction
//!
//! Defines the `CompletionClient` trait: one prompt triple in, one trimmed
//! text out. A single attempt per call; failures surface as `UpstreamError`.

mod openai;

pub use openai::OpenAiClient;

use async_trait::async_trait;
use std::sync::Arc;

use crate::ai::prompt::PromptTriple;
use crate::config::{Credentials, LlmConfig};
use crate::constants::completion;
use crate::types::{IdeaError, Result};

/// Shared completion client for the workflow controller and CLI.
pub type SharedCompletionClient = Arc<dyn CompletionClient>;

/// Chat completion service
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send the system message and the labeled user message under `model`.
    ///
    /// Returns the first candidate's text with surrounding whitespace trimmed.
    async fn complete(&self, prompt: &PromptTriple, model: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Create a shared client from configuration
pub fn create_client(
    config: &LlmConfig,
    credentials: &Credentials,
) -> Result<SharedCompletionClient> {
    match config.provider.as_str() {
        completion::PROVIDER_OPENAI => Ok(Arc::new(OpenAiClient::new(config, credentials)?)),
        other => Err(IdeaError::Config(format!(
            "Unknown provider: {}. Supported: {}",
            other,
            completion::PROVIDER_OPENAI
        ))),
    }
}
