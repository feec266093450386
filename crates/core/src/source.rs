//! DocumentSource trait — where the reference document's plain text comes from.
//!
//! The pipeline only consumes the returned text; how many transport variants a
//! source tries before giving up is its own business.

use async_trait::async_trait;

use crate::error::SourceError;

#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// The source name (e.g., "google_docs").
    fn name(&self) -> &str;

    /// Fetch the current plain-text export of `document_id`.
    ///
    /// Fails with `AccessDenied` for private documents, `NotFound` for an
    /// invalid identifier and `FetchFailed` for anything else.
    async fn fetch_document_text(
        &self,
        document_id: &str,
    ) -> std::result::Result<String, SourceError>;
}
