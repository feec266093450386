//! The retrieval pipeline — answers questions from the cached document.
//!
//! `answer` reads the store, ranks sections against the query, assembles the
//! best ones into context, asks the generator, and maps the reply back to the
//! sections it drew from. `sync` refreshes the store from the document source.

use std::sync::Arc;

use helpdoc_core::answer::{AnswerOutcome, ChatAnswer, SyncReport, SyncStatus};
use helpdoc_core::error::{Error, Result};
use helpdoc_core::generator::AnswerGenerator;
use helpdoc_core::section::DocumentSection;
use helpdoc_core::source::DocumentSource;
use helpdoc_core::store::{KnowledgeStore, SyncState};
use tracing::{debug, info, warn};

use crate::assembler::ContextAssembler;
use crate::citation::extract_citations;
use crate::parser;
use crate::ranker::{self, DEFAULT_LIMIT};

/// Instruction sent with every generation request.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a helpful customer service assistant. Your role is to answer questions based on the provided documentation.

Guidelines:
- Answer questions accurately using only the provided documentation
- Keep responses to a maximum of 2 paragraphs
- Always cite the specific section when referencing information (e.g., \"According to Section X: [Title]...\")
- If information is not in the documentation, clearly state that
- Use a professional tone
- Be concise and helpful";

/// The user turn: retrieved context first, then the question.
pub fn build_user_content(context: &str, query: &str) -> String {
    format!("Documentation Context:\n\n{context}\n\nUser Question: {query}")
}

/// Composes store, ranker, assembler, generator and citation extraction.
pub struct RetrievalPipeline {
    /// Holds the current section set
    store: Arc<dyn KnowledgeStore>,

    /// Where document text comes from on sync and fetch-on-miss
    source: Arc<dyn DocumentSource>,

    /// Produces answers from context
    generator: Arc<dyn AnswerGenerator>,

    /// Document used by fetch-on-miss and `sync_configured`
    document_id: Option<String>,

    /// Whether an empty store triggers one synchronous fetch
    fetch_on_miss: bool,

    /// Sections placed into context per answer
    max_sections: usize,

    assembler: ContextAssembler,

    system_instruction: String,
}

impl RetrievalPipeline {
    pub fn new(
        store: Arc<dyn KnowledgeStore>,
        source: Arc<dyn DocumentSource>,
        generator: Arc<dyn AnswerGenerator>,
    ) -> Self {
        Self {
            store,
            source,
            generator,
            document_id: None,
            fetch_on_miss: true,
            max_sections: DEFAULT_LIMIT,
            assembler: ContextAssembler::new(),
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
        }
    }

    /// Set the document that fetch-on-miss and `sync_configured` use.
    pub fn with_document_id(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    /// Enable or disable the fetch-on-miss step.
    pub fn with_fetch_on_miss(mut self, enabled: bool) -> Self {
        self.fetch_on_miss = enabled;
        self
    }

    /// Set how many ranked sections go into context. Zero is treated as one.
    pub fn with_max_sections(mut self, max: usize) -> Self {
        self.max_sections = max.max(1);
        self
    }

    /// Cap the assembled context at `max_chars` characters.
    pub fn with_context_budget(mut self, max_chars: usize) -> Self {
        self.assembler = ContextAssembler::with_max_chars(max_chars);
        self
    }

    /// Replace the system instruction sent to the generator.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    pub fn store(&self) -> &Arc<dyn KnowledgeStore> {
        &self.store
    }

    /// Answer a question from the cached document.
    ///
    /// Errors only when the generator fails. An empty store and an
    /// unmatched query are ordinary answers with advisory text.
    pub async fn answer(&self, query: &str) -> Result<ChatAnswer> {
        let mut snapshot = self.store.snapshot();

        if snapshot.sections.is_empty() {
            if self.fetch_on_miss().await {
                snapshot = self.store.snapshot();
            }
            if snapshot.sections.is_empty() {
                info!("Knowledge base empty, returning sync advisory");
                return Ok(ChatAnswer::empty_knowledge_base());
            }
        }

        let ranked = ranker::rank_scored(query, &snapshot.sections, self.max_sections);
        if ranked.iter().all(|scored| scored.score == 0) {
            debug!(query_len = query.len(), "No section matched the query");
            return Ok(ChatAnswer::no_relevant_content());
        }

        debug!(
            top_score = ranked[0].score,
            top_section = ranked[0].section.section_index,
            considered = ranked.len(),
            "Sections ranked"
        );

        let ranked: Vec<DocumentSection> = ranked.into_iter().map(|s| s.section).collect();
        let context = self.assembler.assemble(&ranked);
        let user_content = build_user_content(&context.text, query);

        let answer = self
            .generator
            .generate_answer(&self.system_instruction, &user_content)
            .await?;

        let citations = extract_citations(&answer, &context.sections);
        info!(
            generator = self.generator.name(),
            store = self.store.name(),
            sections = context.sections.len(),
            citations = citations.len(),
            "Answer generated"
        );

        Ok(ChatAnswer {
            answer,
            citations,
            outcome: AnswerOutcome::Answered,
        })
    }

    /// Fetch-on-miss: one synchronous fetch and parse of the configured
    /// document. Failures are logged and swallowed.
    ///
    /// Returns true when the store was populated.
    async fn fetch_on_miss(&self) -> bool {
        if !self.fetch_on_miss {
            return false;
        }
        let Some(document_id) = self.document_id.as_deref() else {
            debug!("Fetch-on-miss skipped, no document configured");
            return false;
        };

        info!(document_id, "Knowledge base empty, fetching document on demand");
        match self.fetch_sections(document_id).await {
            Ok(sections) if !sections.is_empty() => {
                let count = sections.len();
                self.store.set_sections(sections);
                info!(document_id, sections = count, "Fetch-on-miss populated knowledge base");
                true
            }
            Ok(_) => {
                warn!(document_id, "Fetch-on-miss produced no sections");
                false
            }
            Err(e) => {
                warn!(document_id, error = %e, "Fetch-on-miss failed");
                false
            }
        }
    }

    /// Fetch and parse a document without touching the store.
    pub async fn fetch_sections(&self, document_id: &str) -> Result<Vec<DocumentSection>> {
        let text = self.source.fetch_document_text(document_id).await?;
        debug!(
            source = self.source.name(),
            document_id,
            chars = text.chars().count(),
            "Document fetched"
        );
        Ok(parser::parse(&text))
    }

    /// Fetch, parse and replace the store contents.
    ///
    /// A document that parses to nothing leaves the store untouched and
    /// reports zero sections.
    pub async fn sync(&self, document_id: &str) -> Result<SyncReport> {
        info!(document_id, "Syncing document");
        let sections = self.fetch_sections(document_id).await?;

        if sections.is_empty() {
            warn!(document_id, "Document produced no sections, store unchanged");
            return Ok(SyncReport { sections_count: 0 });
        }

        let sections_count = sections.len();
        self.store.set_sections(sections);
        info!(
            document_id,
            store = self.store.name(),
            sections = sections_count,
            "Document synced"
        );

        Ok(SyncReport { sections_count })
    }

    /// [`sync`](Self::sync) the configured document.
    pub async fn sync_configured(&self) -> Result<SyncReport> {
        let document_id = self.document_id.as_deref().ok_or_else(|| Error::Config {
            message: "No document ID configured. Set GOOGLE_DOC_ID or document.document_id".into(),
        })?;
        self.sync(document_id).await
    }

    /// Whether the generator backend reports itself usable.
    pub async fn generator_ready(&self) -> bool {
        match self.generator.health_check().await {
            Ok(ready) => ready,
            Err(e) => {
                warn!(
                    generator = self.generator.name(),
                    error = %e,
                    "Generator health check failed"
                );
                false
            }
        }
    }

    pub fn status(&self) -> SyncStatus {
        let snapshot = self.store.snapshot();
        SyncStatus {
            sections_count: snapshot.sections.len(),
            last_sync_time: snapshot.last_sync_time,
            is_synced: snapshot.state() == SyncState::Ready,
        }
    }
}
