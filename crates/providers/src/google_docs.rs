//! Google Docs document source.
//!
//! Reads publicly shared documents through the plain-text export endpoint.
//! No OAuth: the document must be shared as "Anyone with the link can view".
//! Several export URL shapes are tried in order since Google has served
//! plain text from each of them at different times.

use async_trait::async_trait;
use helpdoc_core::error::SourceError;
use helpdoc_core::source::DocumentSource;
use tracing::{debug, info, warn};

const DEFAULT_BASE_URL: &str = "https://docs.google.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const ERROR_BODY_CHARS: usize = 200;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const ACCEPT: &str = "text/plain, text/*, */*";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Fetches document text from the Google Docs export endpoint.
pub struct GoogleDocsSource {
    base_url: String,
    client: reqwest::Client,
}

impl GoogleDocsSource {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            client: build_client(timeout_secs),
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Export URLs for a document, in the order they are tried.
    pub fn export_urls(&self, document_id: &str) -> Vec<String> {
        let base = format!("{}/document/d/{document_id}/export", self.base_url);
        vec![
            format!("{base}?format=txt"),
            format!("{base}?format=txt&id={document_id}"),
            format!("{base}?format=plaintext"),
        ]
    }

    async fn fetch_one(&self, url: &str, document_id: &str) -> Result<String, SourceError> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT)
            .header("Accept-Language", ACCEPT_LANGUAGE)
            .header("Cache-Control", "no-store")
            .send()
            .await
            .map_err(|e| SourceError::FetchFailed {
                status_code: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "Export response");

        if status.is_success() {
            return response.text().await.map_err(|e| SourceError::FetchFailed {
                status_code: Some(status.as_u16()),
                message: format!("Failed to read export body: {e}"),
            });
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response".into());

        Err(match status.as_u16() {
            403 => SourceError::AccessDenied(format!(
                "{document_id}. Share it publicly (Anyone with the link can view)"
            )),
            404 => SourceError::NotFound(format!(
                "verify the document ID is correct: {document_id}"
            )),
            code => SourceError::FetchFailed {
                status_code: Some(code),
                message: format!(
                    "{} ({code}). Response: {}",
                    status.canonical_reason().unwrap_or("Unknown status"),
                    body.chars().take(ERROR_BODY_CHARS).collect::<String>()
                ),
            },
        })
    }
}

impl Default for GoogleDocsSource {
    fn default() -> Self {
        Self::new()
    }
}

fn build_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .expect("Failed to create HTTP client")
}

#[async_trait]
impl DocumentSource for GoogleDocsSource {
    fn name(&self) -> &str {
        "google_docs"
    }

    /// Try each export URL; the first success wins, otherwise the last error.
    async fn fetch_document_text(&self, document_id: &str) -> Result<String, SourceError> {
        let mut last_error = None;

        for url in self.export_urls(document_id) {
            match self.fetch_one(&url, document_id).await {
                Ok(text) => {
                    info!(document_id, chars = text.chars().count(), "Fetched document export");
                    return Ok(text);
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "Export attempt failed, trying next format");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| SourceError::FetchFailed {
            status_code: None,
            message: "All export URL formats failed. Check document sharing settings".into(),
        }))
    }
}
