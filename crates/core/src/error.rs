//! Error types for the HelpDoc domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each external collaborator has its own error enum; the top-level
//! [`Error`] wraps them so `sync` and `answer` can propagate either unchanged.

use thiserror::Error;

/// The top-level error type for all HelpDoc operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Document source errors ---
    #[error("Document source error: {0}")]
    Source(#[from] SourceError),

    // --- Answer generation errors ---
    #[error("Answer generation failed: {0}")]
    Generation(#[from] GenerationError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification used by boundary layers to pick user-facing guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AccessDenied,
    NotFound,
    FetchFailed,
    GenerationFailed,
    Config,
    Internal,
}

impl Error {
    /// The taxonomy kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Source(e) => e.kind(),
            Error::Generation(_) => ErrorKind::GenerationFailed,
            Error::Config { .. } => ErrorKind::Config,
            Error::Internal(_) => ErrorKind::Internal,
        }
    }
}

// --- Bounded context errors ---

/// Failures reported by a [`DocumentSource`](crate::source::DocumentSource).
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("Document is not publicly accessible: {0}")]
    AccessDenied(String),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Failed to fetch document: {message}")]
    FetchFailed {
        status_code: Option<u16>,
        message: String,
    },
}

impl SourceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SourceError::AccessDenied(_) => ErrorKind::AccessDenied,
            SourceError::NotFound(_) => ErrorKind::NotFound,
            SourceError::FetchFailed { .. } => ErrorKind::FetchFailed,
        }
    }
}

/// Failures reported by an [`AnswerGenerator`](crate::generator::AnswerGenerator).
///
/// Every variant is a `GenerationFailed` in the taxonomy; the variants only
/// exist so logs say what went wrong upstream.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_error_displays_correctly() {
        let err = Error::Source(SourceError::FetchFailed {
            status_code: Some(500),
            message: "Internal Server Error (500)".into(),
        });
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("Failed to fetch"));
    }

    #[test]
    fn kinds_follow_the_taxonomy() {
        assert_eq!(
            Error::from(SourceError::AccessDenied("doc".into())).kind(),
            ErrorKind::AccessDenied
        );
        assert_eq!(
            Error::from(SourceError::NotFound("doc".into())).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            Error::from(GenerationError::RateLimited { retry_after_secs: 5 }).kind(),
            ErrorKind::GenerationFailed
        );
        assert_eq!(
            Error::Config { message: "x".into() }.kind(),
            ErrorKind::Config
        );
    }

    #[test]
    fn generation_error_displays_correctly() {
        let err = Error::Generation(GenerationError::ApiError {
            status_code: 529,
            message: "Overloaded".into(),
        });
        assert!(err.to_string().contains("529"));
        assert!(err.to_string().contains("Overloaded"));
    }
}
