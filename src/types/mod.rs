pub mod error;
pub mod marketing;

pub use error::{
    ErrorCategory, ErrorClassifier, IdeaError, Result, Service, UpstreamError, ValidationError,
};
pub use marketing::{DocumentId, ExportRequest, GenerationResult, GenerationTask, InputRecord};
