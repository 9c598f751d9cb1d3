//! ideagen - Marketing Idea Generator
//!
//! Turns four marketing inputs (brand, target audience, business goal,
//! special feature) into buyer personas, a content strategy, a topic list and
//! content type / platform suggestions using a chat completion service, and
//! exports any result into a Google Docs document filed in a Drive folder.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use ideagen::cli::{CommandContext, ConsolePresenter};
//! use ideagen::{GenerationTask, InputRecord};
//!
//! let ctx = CommandContext::load(None)?;
//! let mut controller = ctx.controller(Arc::new(ConsolePresenter::default()))?;
//! let input = InputRecord::new("Acme", "Remote workers", "Grow subscriptions", "Fresh beans");
//! controller.generate(GenerationTask::ContentStrategy, &input).await?;
//! controller.export(GenerationTask::ContentStrategy, "drive-folder-id").await;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: prompt construction, completion client, topic splitting
//! - [`export`]: document creation, text insertion and folder filing
//! - [`workflow`]: per-task state machines and the presenter seam
//! - [`config`]: layered configuration and credentials
//! - [`cli`]: terminal presenter and command handlers

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod types;
pub mod workflow;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, Credentials};

// Error Types
pub use types::error::{ErrorCategory, IdeaError, Result, UpstreamError, ValidationError};

// Domain
pub use types::{DocumentId, ExportRequest, GenerationResult, GenerationTask, InputRecord};

// =============================================================================
// Service Re-exports
// =============================================================================

pub use ai::{CompletionClient, OpenAiClient, PromptBuilder, PromptTriple, SharedCompletionClient};
pub use export::{DocumentBackend, DocumentExporter, DocumentSession, GoogleWorkspace};
pub use workflow::{
    ExportOutcome, GenerationOutcome, Presenter, TaskState, WorkflowController, WorkflowEvent,
    WorkflowOutcome, WorkflowSettings,
};
