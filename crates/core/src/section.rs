//! Document sections and the citations that point back at them.

use serde::{Deserialize, Serialize};

/// Number of content characters kept in a citation excerpt.
pub const EXCERPT_CHARS: usize = 200;

/// A titled, contiguous span of the source document — the unit of retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSection {
    /// Header text the section was opened with.
    pub title: String,

    /// Trimmed body text. Never empty.
    pub content: String,

    /// Zero-based position in document order. Contiguous across a parse.
    pub section_index: usize,
}

impl DocumentSection {
    pub fn new(title: impl Into<String>, content: impl Into<String>, section_index: usize) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            section_index,
        }
    }

    /// One-based label used in prompts and in answers, e.g. `Section 2`.
    pub fn label(&self) -> String {
        format!("Section {}", self.section_index + 1)
    }
}

/// A post-hoc pointer from a generated answer back to a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    /// Title of the cited section.
    pub section: String,

    /// Leading slice of the section content followed by `...`.
    pub excerpt: String,

    pub section_index: usize,
}

impl Citation {
    /// Build the citation for a section: first 200 characters, trimmed, plus an ellipsis.
    pub fn for_section(section: &DocumentSection) -> Self {
        let head: String = section.content.chars().take(EXCERPT_CHARS).collect();
        Self {
            section: section.title.clone(),
            excerpt: format!("{}...", head.trim()),
            section_index: section.section_index,
        }
    }
}
