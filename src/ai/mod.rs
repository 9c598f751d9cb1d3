//! AI Integration Layer
//!
//! Prompt construction, the completion client and topic list handling.

pub mod prompt;
pub mod provider;
pub mod topics;

pub use prompt::{PromptBuilder, PromptTriple};
pub use provider::{CompletionClient, OpenAiClient, SharedCompletionClient, create_client};
pub use topics::TopicPolicy;
