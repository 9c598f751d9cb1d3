//! CLI Common Utilities
//!
//! Shared configuration and client setup for the generation commands.

use std::sync::Arc;
use tracing::{debug, info};

use crate::ai::provider::create_client;
use crate::config::{Config, ConfigLoader, Credentials};
use crate::export::{DocumentExporter, GoogleWorkspace};
use crate::types::Result;
use crate::workflow::{Presenter, WorkflowController, WorkflowSettings};

/// Command execution context
///
/// Loaded once per invocation: configuration from all sources plus the
/// credentials resolved from it.
#[derive(Debug)]
pub struct CommandContext {
    pub config: Config,
    pub credentials: Credentials,
}

impl CommandContext {
    /// Load configuration, apply the `--model` override, resolve credentials
    pub fn load(model: Option<String>) -> Result<Self> {
        let mut config = ConfigLoader::load()?;
        if let Some(model) = model {
            config.llm.model = model;
        }
        config.validate()?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Config) -> Self {
        let credentials = Credentials::resolve(&config);
        Self {
            config,
            credentials,
        }
    }

    /// Folder id from `--folder-id`, falling back to configuration
    pub fn folder_id(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.config.documents.folder_id.clone())
            .unwrap_or_default()
    }

    /// Exporter, or `None` when no document access token is available
    pub fn exporter(&self) -> Result<Option<DocumentExporter>> {
        if self.credentials.google_access_token().is_err() {
            debug!("No document access token; export disabled");
            return Ok(None);
        }
        let workspace = GoogleWorkspace::new(&self.config.documents, &self.credentials)?;
        Ok(Some(DocumentExporter::new(Arc::new(workspace))))
    }

    /// Wire the completion client, exporter and presenter into a controller
    pub fn controller(&self, presenter: Arc<dyn Presenter>) -> Result<WorkflowController> {
        let completion = create_client(&self.config.llm, &self.credentials)?;
        info!(
            "Using {} (model: {})",
            completion.name(),
            self.config.llm.model
        );

        Ok(WorkflowController::new(
            completion,
            self.exporter()?,
            presenter,
            WorkflowSettings::from_config(&self.config),
        ))
    }
}
