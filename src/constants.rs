//! Global Constants
//!
//! Centralized defaults for remote endpoints and prompts.

/// Completion service constants
pub mod completion {
    /// Default OpenAI-compatible API base
    pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

    /// Default chat model
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

    /// Only supported provider name
    pub const PROVIDER_OPENAI: &str = "openai";

    /// Environment variable holding the API key
    pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
}

/// Document service constants
pub mod documents {
    /// Google Docs API base
    pub const DEFAULT_DOCS_API_BASE: &str = "https://docs.googleapis.com";

    /// Google Drive API base
    pub const DEFAULT_DRIVE_API_BASE: &str = "https://www.googleapis.com";

    /// Environment variable holding the OAuth access token
    pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_ACCESS_TOKEN";

    /// Insertion index of the document body start (index 0 is the section break)
    pub const BODY_START_INDEX: u32 = 1;
}

/// Prompt constants
pub mod prompt {
    /// Topics requested by the topics prompt
    pub const DEFAULT_TOPIC_COUNT: usize = 10;
}
