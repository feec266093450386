//! KnowledgeStore trait — the holder of the current section set.
//!
//! A store is either UNSYNCED (no sections, no timestamp) or READY (sections
//! from one successful parse plus the time they were stored). Writers replace
//! the whole set at once; readers always get a complete snapshot.
//!
//! The in-process implementation lives in `helpdoc-knowledge`. A store backed
//! by a shared external service can be swapped in behind the same trait.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::section::DocumentSection;

/// Lifecycle state of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    Unsynced,
    Ready,
}

/// An immutable view of a store at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeSnapshot {
    pub sections: Vec<DocumentSection>,
    pub last_sync_time: Option<DateTime<Utc>>,
}

impl KnowledgeSnapshot {
    pub fn state(&self) -> SyncState {
        if self.last_sync_time.is_some() && !self.sections.is_empty() {
            SyncState::Ready
        } else {
            SyncState::Unsynced
        }
    }
}

/// The core KnowledgeStore trait.
///
/// Implementations: in-memory (`InMemoryStore`).
pub trait KnowledgeStore: Send + Sync {
    /// The backend name (e.g., "in_memory").
    fn name(&self) -> &str;

    /// The current snapshot. Never fails.
    fn snapshot(&self) -> Arc<KnowledgeSnapshot>;

    /// Atomically replace every section and stamp the sync time.
    ///
    /// Storing an empty set resets the store to UNSYNCED.
    fn set_sections(&self, sections: Vec<DocumentSection>);

    /// Reset to UNSYNCED.
    fn clear(&self);

    /// Copy of the current sections (possibly empty).
    fn sections(&self) -> Vec<DocumentSection> {
        self.snapshot().sections.clone()
    }

    fn last_sync_time(&self) -> Option<DateTime<Utc>> {
        self.snapshot().last_sync_time
    }

    fn state(&self) -> SyncState {
        self.snapshot().state()
    }
}
