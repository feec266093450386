//! In-memory knowledge store — one independent section cache per process.

use chrono::Utc;
use helpdoc_core::section::DocumentSection;
use helpdoc_core::store::{KnowledgeSnapshot, KnowledgeStore};
use std::sync::{Arc, RwLock};

/// A store that keeps the current snapshot behind an `Arc`.
///
/// Readers clone the `Arc` and never see a half-written section set;
/// writers build a fresh snapshot and swap it in.
pub struct InMemoryStore {
    current: RwLock<Arc<KnowledgeSnapshot>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(KnowledgeSnapshot::default())),
        }
    }

    /// A store already holding `sections`, stamped now.
    pub fn with_sections(sections: Vec<DocumentSection>) -> Self {
        let store = Self::new();
        store.set_sections(sections);
        store
    }

    fn swap(&self, next: KnowledgeSnapshot) {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(next);
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn snapshot(&self) -> Arc<KnowledgeSnapshot> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    fn set_sections(&self, sections: Vec<DocumentSection>) {
        if sections.is_empty() {
            self.clear();
            return;
        }

        let count = sections.len();
        self.swap(KnowledgeSnapshot {
            sections,
            last_sync_time: Some(Utc::now()),
        });
        tracing::debug!(sections = count, "Knowledge store replaced");
    }

    fn clear(&self) {
        self.swap(KnowledgeSnapshot::default());
    }
}
