//! # HelpDoc Core
//!
//! Domain types, traits, and error definitions for the HelpDoc document
//! assistant. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator is defined as a trait here: the document
//! source, the answer generator and the section store. Implementations live in
//! their respective crates, so tests can swap in scripted stand-ins and the
//! in-process store can be replaced by a shared one.

pub mod answer;
pub mod error;
pub mod generator;
pub mod section;
pub mod source;
pub mod store;

// Re-export key types at crate root for ergonomics
pub use answer::{AnswerOutcome, ChatAnswer, SyncReport, SyncStatus};
pub use error::{Error, ErrorKind, GenerationError, Result, SourceError};
pub use generator::AnswerGenerator;
pub use section::{Citation, DocumentSection};
pub use source::DocumentSource;
pub use store::{KnowledgeSnapshot, KnowledgeStore, SyncState};
