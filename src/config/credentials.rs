//! Credential Resolution
//!
//! Secrets are read once at startup (config file first, then the environment)
//! and handed to the service constructors by reference.

use secrecy::SecretString;

use super::types::Config;
use crate::constants::{completion, documents};
use crate::types::{IdeaError, Result};

/// Opaque credentials for the completion and document services
#[derive(Default)]
pub struct Credentials {
    openai_api_key: Option<SecretString>,
    google_access_token: Option<SecretString>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "google_access_token",
                &self.google_access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Credentials {
    /// Resolve from config values, falling back to environment variables
    pub fn resolve(config: &Config) -> Self {
        let openai_api_key = config
            .llm
            .api_key
            .clone()
            .or_else(|| std::env::var(completion::API_KEY_ENV).ok())
            .filter(|key| !key.is_empty())
            .map(SecretString::from);

        let google_access_token = config
            .documents
            .access_token
            .clone()
            .or_else(|| std::env::var(documents::ACCESS_TOKEN_ENV).ok())
            .filter(|token| !token.is_empty())
            .map(SecretString::from);

        Self {
            openai_api_key,
            google_access_token,
        }
    }

    /// Build from explicit values
    pub fn new(openai_api_key: Option<&str>, google_access_token: Option<&str>) -> Self {
        Self {
            openai_api_key: openai_api_key.map(SecretString::from),
            google_access_token: google_access_token.map(SecretString::from),
        }
    }

    pub fn openai_api_key(&self) -> Result<&SecretString> {
        self.openai_api_key.as_ref().ok_or_else(|| {
            IdeaError::Config(format!(
                "OpenAI API key not found. Set {} env var or llm.api_key in config",
                completion::API_KEY_ENV
            ))
        })
    }

    pub fn google_access_token(&self) -> Result<&SecretString> {
        self.google_access_token.as_ref().ok_or_else(|| {
            IdeaError::Config(format!(
                "Google access token not found. Set {} env var or documents.access_token in config",
                documents::ACCESS_TOKEN_ENV
            ))
        })
    }
}
