//! Document Export
//!
//! Uploads generated text into a newly created hosted document and files it
//! into a destination folder. Three steps, each a single attempt:
//!
//! 1. create a document with the given title
//! 2. insert the text at the start of the body
//! 3. add the destination folder as a parent
//!
//! One authenticated session is opened per export and shared by all steps.
//! There is no rollback: a document created in step 1 stays in the store if a
//! later step fails, and the error names it.

mod google;

pub use google::{GoogleSession, GoogleWorkspace};

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::constants::documents::BODY_START_INDEX;
use crate::types::{DocumentId, ExportRequest, IdeaError, Result};

/// Authenticated handle to the document and file services
#[async_trait]
pub trait DocumentSession: Send + Sync {
    async fn create_document(&self, title: &str) -> Result<DocumentId>;

    async fn insert_text(&self, document_id: &DocumentId, index: u32, text: &str) -> Result<()>;

    async fn add_to_folder(&self, document_id: &DocumentId, folder_id: &str) -> Result<()>;
}

/// Opens sessions against a document store
pub trait DocumentBackend: Send + Sync {
    fn session(&self) -> Result<Box<dyn DocumentSession>>;
}

pub type SharedDocumentBackend = Arc<dyn DocumentBackend>;

/// Runs the create → insert → attach sequence
#[derive(Clone)]
pub struct DocumentExporter {
    backend: SharedDocumentBackend,
}

impl DocumentExporter {
    pub fn new(backend: SharedDocumentBackend) -> Self {
        Self { backend }
    }

    pub async fn export(&self, request: &ExportRequest) -> Result<DocumentId> {
        debug!(
            "Exporting '{}' ({} chars) to folder {}",
            request.title,
            request.content.len(),
            request.folder_id
        );

        let session = self.backend.session()?;

        let document_id = session.create_document(&request.title).await?;
        debug!("Created document {}", document_id);

        if request.content.is_empty() {
            debug!("Empty content, skipping text insertion");
        } else if let Err(e) = session
            .insert_text(&document_id, BODY_START_INDEX, &request.content)
            .await
        {
            return Err(orphaned(e, &document_id, "inserting text"));
        }

        if let Err(e) = session
            .add_to_folder(&document_id, &request.folder_id)
            .await
        {
            return Err(orphaned(e, &document_id, "moving it to the folder"));
        }

        debug!("Exported '{}' as document {}", request.title, document_id);
        Ok(document_id)
    }
}

/// Name the created document in the error so it can be found by hand
fn orphaned(err: IdeaError, document_id: &DocumentId, step: &str) -> IdeaError {
    warn!(
        "Document {} was created but {} failed; it is left in place",
        document_id, step
    );
    match err {
        IdeaError::Upstream(upstream) => IdeaError::Upstream(upstream.context(format!(
            "document {} was created but {} failed",
            document_id, step
        ))),
        other => other,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory document backend that records calls.

    use super::*;
    use crate::types::{ErrorCategory, Service, UpstreamError};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Session,
        Create(String),
        Insert(String, u32, String),
        Attach(String, String),
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FailAt {
        Nothing,
        Create,
        Insert,
        Attach,
    }

    pub struct RecordingBackend {
        pub calls: Arc<Mutex<Vec<Call>>>,
        fail_at: FailAt,
    }

    impl RecordingBackend {
        pub fn new(fail_at: FailAt) -> Arc<Self> {
            Arc::new(Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                fail_at,
            })
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls().iter().filter(|c| pred(c)).count()
        }
    }

    impl DocumentBackend for RecordingBackend {
        fn session(&self) -> Result<Box<dyn DocumentSession>> {
            self.calls.lock().unwrap().push(Call::Session);
            Ok(Box::new(RecordingSession {
                calls: Arc::clone(&self.calls),
                fail_at: self.fail_at,
            }))
        }
    }

    struct RecordingSession {
        calls: Arc<Mutex<Vec<Call>>>,
        fail_at: FailAt,
    }

    fn failure(service: Service, message: &str) -> IdeaError {
        UpstreamError::new(service, ErrorCategory::Transient, message)
            .with_status(500)
            .into()
    }

    #[async_trait]
    impl DocumentSession for RecordingSession {
        async fn create_document(&self, title: &str) -> Result<DocumentId> {
            self.calls.lock().unwrap().push(Call::Create(title.to_string()));
            if self.fail_at == FailAt::Create {
                return Err(failure(Service::Documents, "create exploded"));
            }
            Ok(DocumentId::new("doc-1"))
        }

        async fn insert_text(&self, document_id: &DocumentId, index: u32, text: &str) -> Result<()> {
            self.calls.lock().unwrap().push(Call::Insert(
                document_id.to_string(),
                index,
                text.to_string(),
            ));
            if self.fail_at == FailAt::Insert {
                return Err(failure(Service::Documents, "insert exploded"));
            }
            Ok(())
        }

        async fn add_to_folder(&self, document_id: &DocumentId, folder_id: &str) -> Result<()> {
            self.calls.lock().unwrap().push(Call::Attach(
                document_id.to_string(),
                folder_id.to_string(),
            ));
            if self.fail_at == FailAt::Attach {
                return Err(failure(Service::Drive, "attach exploded"));
            }
            Ok(())
        }
    }
}
