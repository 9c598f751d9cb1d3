//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Error Families
//!
//! - **Upstream**: any failure reported by (or while talking to) the completion,
//!   document or drive services. Carries a category for display and logging.
//! - **Validation**: required form fields missing before a generation task.
//! - **Config**: configuration or credential problems detected at startup.
//!
//! Categories are informational. Every remote call is a single attempt.

use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Classification of upstream failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rate limited or quota exhausted
    RateLimit,
    /// Authentication or authorization rejected
    Auth,
    /// Connectivity issues (DNS, connect, timeout)
    Network,
    /// Service unavailable or resource not found
    Unavailable,
    /// Request rejected as invalid
    BadRequest,
    /// Response could not be decoded or lacked required data
    ParseError,
    /// Temporary server-side failure
    Transient,
    /// Anything else
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Auth => write!(f, "AUTH"),
            Self::Network => write!(f, "NETWORK"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::Transient => write!(f, "TRANSIENT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// =============================================================================
// Upstream Error
// =============================================================================

/// Remote service that produced an upstream error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Chat completion API
    Completion,
    /// Document creation and editing API
    Documents,
    /// File storage API (folder membership)
    Drive,
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completion => write!(f, "completion"),
            Self::Documents => write!(f, "documents"),
            Self::Drive => write!(f, "drive"),
        }
    }
}

/// Failure from a remote service, with category and HTTP context
#[derive(Debug, Clone)]
pub struct UpstreamError {
    /// Service that failed
    pub service: Service,
    /// Error category
    pub category: ErrorCategory,
    /// HTTP status, when the service answered
    pub status: Option<u16>,
    /// Detailed error message
    pub message: String,
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(
                f,
                "[{}:{}] HTTP {}: {}",
                self.service, self.category, status, self.message
            ),
            None => write!(f, "[{}:{}] {}", self.service, self.category, self.message),
        }
    }
}

impl std::error::Error for UpstreamError {}

impl UpstreamError {
    pub fn new(service: Service, category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            service,
            category,
            status: None,
            message: message.into(),
        }
    }

    /// Attach the HTTP status the service answered with
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Prefix the message with extra context, keeping category and status
    pub fn context(mut self, context: impl std::fmt::Display) -> Self {
        self.message = format!("{}: {}", context, self.message);
        self
    }

    /// Transport-level failure (no HTTP answer)
    pub fn transport(service: Service, err: &reqwest::Error) -> Self {
        let category = if err.is_timeout() || err.is_connect() {
            ErrorCategory::Network
        } else if err.is_decode() {
            ErrorCategory::ParseError
        } else {
            ErrorClassifier::classify(&err.to_string())
        };
        Self::new(service, category, err.to_string())
    }

    /// Response body could not be decoded or lacked required fields
    pub fn malformed(service: Service, message: impl Into<String>) -> Self {
        Self::new(service, ErrorCategory::ParseError, message)
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Error classifier for upstream failures
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify an error message when no status code is available
    pub fn classify(message: &str) -> ErrorCategory {
        let lower = message.to_lowercase();

        if lower.contains("rate limit")
            || lower.contains("too many requests")
            || lower.contains("quota")
        {
            return ErrorCategory::RateLimit;
        }

        if lower.contains("unauthorized")
            || lower.contains("api key")
            || lower.contains("permission denied")
            || lower.contains("invalid_grant")
        {
            return ErrorCategory::Auth;
        }

        if lower.contains("connection")
            || lower.contains("dns")
            || lower.contains("timed out")
            || lower.contains("timeout")
        {
            return ErrorCategory::Network;
        }

        if lower.contains("json") || lower.contains("decode") || lower.contains("parse") {
            return ErrorCategory::ParseError;
        }

        ErrorCategory::Unknown
    }

    /// Classify HTTP status code directly
    pub fn classify_http_status(status: u16) -> ErrorCategory {
        match status {
            429 => ErrorCategory::RateLimit,
            401 | 403 => ErrorCategory::Auth,
            400 | 422 => ErrorCategory::BadRequest,
            404 => ErrorCategory::Unavailable,
            500..=599 => ErrorCategory::Transient,
            _ => ErrorCategory::Unknown,
        }
    }

    /// Build an upstream error from a non-success HTTP answer
    pub fn from_http(service: Service, status: u16, body: &str) -> UpstreamError {
        let message = extract_api_message(body).unwrap_or_else(|| body.trim().to_string());
        UpstreamError::new(service, Self::classify_http_status(status), message).with_status(status)
    }
}

/// Pull `error.message` out of a JSON error body (OpenAI and Google share this shape)
fn extract_api_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

// =============================================================================
// Validation Error
// =============================================================================

/// Required input fields that were left empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Labels of the missing fields, in form order
    pub missing: Vec<&'static str>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Please fill in all required fields (missing: {})",
            self.missing.join(", ")
        )
    }
}

impl std::error::Error for ValidationError {}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum IdeaError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Remote Errors
    // -------------------------------------------------------------------------
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown task '{0}'. Valid values: personas, strategy, topics, platforms")]
    UnknownTask(String),
}

pub type Result<T> = std::result::Result<T, IdeaError>;

impl IdeaError {
    /// The upstream failure behind this error, if any
    pub fn as_upstream(&self) -> Option<&UpstreamError> {
        match self {
            Self::Upstream(e) => Some(e),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::RateLimit.to_string(), "RATE_LIMIT");
        assert_eq!(ErrorCategory::Auth.to_string(), "AUTH");
        assert_eq!(ErrorCategory::ParseError.to_string(), "PARSE_ERROR");
    }

    #[test]
    fn test_classify_http_status() {
        assert_eq!(
            ErrorClassifier::classify_http_status(429),
            ErrorCategory::RateLimit
        );
        assert_eq!(ErrorClassifier::classify_http_status(401), ErrorCategory::Auth);
        assert_eq!(ErrorClassifier::classify_http_status(403), ErrorCategory::Auth);
        assert_eq!(
            ErrorClassifier::classify_http_status(503),
            ErrorCategory::Transient
        );
        for status in [501, 505, 520, 599] {
            assert_eq!(
                ErrorClassifier::classify_http_status(status),
                ErrorCategory::Transient,
                "HTTP {status}"
            );
        }
        assert_eq!(
            ErrorClassifier::classify_http_status(404),
            ErrorCategory::Unavailable
        );
        assert_eq!(
            ErrorClassifier::classify_http_status(418),
            ErrorCategory::Unknown
        );
    }

    #[test]
    fn test_classify_message() {
        assert_eq!(
            ErrorClassifier::classify("You exceeded your current quota"),
            ErrorCategory::RateLimit
        );
        assert_eq!(
            ErrorClassifier::classify("Incorrect API key provided"),
            ErrorCategory::Auth
        );
        assert_eq!(
            ErrorClassifier::classify("operation timed out"),
            ErrorCategory::Network
        );
        assert_eq!(
            ErrorClassifier::classify("Something weird happened"),
            ErrorCategory::Unknown
        );
    }

    #[test]
    fn test_from_http_extracts_api_message() {
        let body = r#"{"error": {"message": "Request had invalid authentication credentials.", "code": 401}}"#;
        let err = ErrorClassifier::from_http(Service::Documents, 401, body);
        assert_eq!(err.category, ErrorCategory::Auth);
        assert_eq!(err.status, Some(401));
        assert_eq!(
            err.message,
            "Request had invalid authentication credentials."
        );
    }

    #[test]
    fn test_from_http_plain_body() {
        let err = ErrorClassifier::from_http(Service::Drive, 502, "  Bad Gateway\n");
        assert_eq!(err.category, ErrorCategory::Transient);
        assert_eq!(err.message, "Bad Gateway");
    }

    #[test]
    fn test_upstream_error_display() {
        let err = UpstreamError::new(Service::Completion, ErrorCategory::Network, "connect refused");
        assert_eq!(err.to_string(), "[completion:NETWORK] connect refused");

        let err = UpstreamError::new(Service::Drive, ErrorCategory::Auth, "forbidden")
            .with_status(403)
            .context("attach to folder");
        assert_eq!(
            err.to_string(),
            "[drive:AUTH] HTTP 403: attach to folder: forbidden"
        );
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError {
            missing: vec!["Brand", "Business Goal"],
        };
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields (missing: Brand, Business Goal)"
        );
    }
}
