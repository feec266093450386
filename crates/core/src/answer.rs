//! Values returned by the retrieval pipeline to its callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::section::Citation;

/// Advisory text returned while the knowledge base holds no sections.
pub const EMPTY_KNOWLEDGE_BASE_MESSAGE: &str =
    "The knowledge base is currently being synced. Please try again in a few moments.";

/// Advisory text returned when no section matches the question.
pub const NO_RELEVANT_CONTENT_MESSAGE: &str = "I couldn't find relevant information in the documentation to answer your question. Please try rephrasing your query or contact support for assistance.";

/// How an answer came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// The generator produced the answer from retrieved context.
    Answered,
    /// Nothing has been synced and fetch-on-miss did not help.
    EmptyKnowledgeBase,
    /// Sections exist but none matched the query.
    NoRelevantContent,
}

/// The chat entry point's response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
    pub citations: Vec<Citation>,
    pub outcome: AnswerOutcome,
}

impl ChatAnswer {
    pub fn empty_knowledge_base() -> Self {
        Self {
            answer: EMPTY_KNOWLEDGE_BASE_MESSAGE.into(),
            citations: Vec::new(),
            outcome: AnswerOutcome::EmptyKnowledgeBase,
        }
    }

    pub fn no_relevant_content() -> Self {
        Self {
            answer: NO_RELEVANT_CONTENT_MESSAGE.into(),
            citations: Vec::new(),
            outcome: AnswerOutcome::NoRelevantContent,
        }
    }
}

/// Result of a successful sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub sections_count: usize,
}

/// Read-only view of the cache state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub sections_count: usize,
    pub last_sync_time: Option<DateTime<Utc>>,
    pub is_synced: bool,
}
