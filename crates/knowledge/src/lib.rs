//! # HelpDoc Knowledge
//!
//! The document retrieval pipeline: splitting exported text into sections,
//! caching them, ranking them against a question, assembling prompt context,
//! and tracing an answer back to its sources.
//!
//! Parsing, ranking, assembly and citation extraction are pure functions.
//! The only I/O happens in [`RetrievalPipeline`], through the
//! [`DocumentSource`](helpdoc_core::DocumentSource) and
//! [`AnswerGenerator`](helpdoc_core::AnswerGenerator) traits.

pub mod assembler;
pub mod cache;
pub mod citation;
pub mod parser;
pub mod pipeline;
pub mod ranker;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use assembler::{AssembledContext, ContextAssembler};
pub use cache::InMemoryStore;
pub use citation::extract_citations;
pub use parser::parse;
pub use pipeline::{RetrievalPipeline, DEFAULT_SYSTEM_INSTRUCTION};
pub use ranker::{rank, rank_scored, ScoredSection};
