//! Citation extraction: which context sections does an answer point back at?
//!
//! Matching is a best-effort heuristic. A section is cited when the answer
//! names it by title (any case) or by its `Section N` label (exact case).

use helpdoc_core::section::{Citation, DocumentSection};

/// Citations for the sections in `considered` that `answer` refers to.
///
/// Output follows `considered` order with at most one citation per section.
pub fn extract_citations(answer: &str, considered: &[DocumentSection]) -> Vec<Citation> {
    let lowered = answer.to_lowercase();

    considered
        .iter()
        .filter(|section| {
            lowered.contains(&section.title.to_lowercase()) || answer.contains(&section.label())
        })
        .map(Citation::for_section)
        .collect()
}
