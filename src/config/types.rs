//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Secrets are accepted from files and the environment but never serialized.

use serde::{Deserialize, Serialize};

use crate::ai::topics::TopicPolicy;
use crate::constants::{completion, documents, prompt};
use crate::types::{IdeaError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Completion provider settings
    pub llm: LlmConfig,

    /// Document export settings
    pub documents: DocumentsConfig,

    /// Topic list settings
    pub topics: TopicsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            llm: LlmConfig::default(),
            documents: DocumentsConfig::default(),
            topics: TopicsConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if self.llm.provider != completion::PROVIDER_OPENAI {
            return Err(IdeaError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.llm.provider,
                completion::PROVIDER_OPENAI
            )));
        }

        if self.llm.model.trim().is_empty() {
            return Err(IdeaError::Config("LLM model must not be empty".to_string()));
        }

        if self.llm.timeout_secs == Some(0) || self.documents.timeout_secs == Some(0) {
            return Err(IdeaError::Config(
                "timeout_secs must be greater than 0 when set".to_string(),
            ));
        }

        if self.topics.count == 0 {
            return Err(IdeaError::Config(
                "topics.count must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name
    pub provider: String,

    /// Model name
    pub model: String,

    /// API base URL
    pub api_base: String,

    /// Request timeout in seconds; unset leaves the HTTP client default
    pub timeout_secs: Option<u64>,

    /// API key. Falls back to `OPENAI_API_KEY`.
    /// Never serialized to output.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: completion::PROVIDER_OPENAI.to_string(),
            model: completion::DEFAULT_MODEL.to_string(),
            api_base: completion::DEFAULT_API_BASE.to_string(),
            timeout_secs: None,
            api_key: None,
        }
    }
}

// =============================================================================
// Documents Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentsConfig {
    /// Docs API base URL
    pub docs_api_base: String,

    /// Drive API base URL
    pub drive_api_base: String,

    /// Default destination folder
    pub folder_id: Option<String>,

    /// Request timeout in seconds; unset leaves the HTTP client default
    pub timeout_secs: Option<u64>,

    /// OAuth access token scoped to Docs and Drive. Falls back to `GOOGLE_ACCESS_TOKEN`.
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,
}

impl std::fmt::Debug for DocumentsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentsConfig")
            .field("docs_api_base", &self.docs_api_base)
            .field("drive_api_base", &self.drive_api_base)
            .field("folder_id", &self.folder_id)
            .field("timeout_secs", &self.timeout_secs)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            docs_api_base: documents::DEFAULT_DOCS_API_BASE.to_string(),
            drive_api_base: documents::DEFAULT_DRIVE_API_BASE.to_string(),
            folder_id: None,
            timeout_secs: None,
            access_token: None,
        }
    }
}

// =============================================================================
// Topics Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicsConfig {
    /// Topics requested from the model
    pub count: usize,

    /// Trim the returned list to `count` non-blank lines
    pub enforce_count: bool,
}

impl Default for TopicsConfig {
    fn default() -> Self {
        Self {
            count: prompt::DEFAULT_TOPIC_COUNT,
            enforce_count: false,
        }
    }
}

impl TopicsConfig {
    pub fn policy(&self) -> TopicPolicy {
        if self.enforce_count {
            TopicPolicy::Enforce { count: self.count }
        } else {
            TopicPolicy::AsReturned
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
