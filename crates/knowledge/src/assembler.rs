//! Context assembly: ranked sections into the text block handed to the model.

use helpdoc_core::section::DocumentSection;

/// Placed between section blocks.
pub const SECTION_DELIMITER: &str = "\n---\n\n";

/// One section block: `[Section N: Title]` then the content.
pub fn format_section(section: &DocumentSection) -> String {
    format!(
        "[{}: {}]\n{}\n",
        section.label(),
        section.title,
        section.content
    )
}

/// Join every section into one context string, in the order given.
pub fn assemble(sections: &[DocumentSection]) -> String {
    sections
        .iter()
        .map(format_section)
        .collect::<Vec<_>>()
        .join(SECTION_DELIMITER)
}

/// The assembled text plus the sections it actually contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledContext {
    pub text: String,
    /// Sections placed into `text`, in order.
    pub sections: Vec<DocumentSection>,
    /// How many trailing sections did not fit the budget.
    pub dropped: usize,
}

/// Builds prompt context with an optional character budget.
///
/// Under a budget, whole sections are dropped from the lowest-ranked end.
/// The first section is always kept even if it alone exceeds the budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextAssembler {
    max_chars: Option<usize>,
}

impl ContextAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_chars(max_chars: usize) -> Self {
        Self {
            max_chars: Some(max_chars),
        }
    }

    pub fn max_chars(&self) -> Option<usize> {
        self.max_chars
    }

    pub fn assemble(&self, ranked: &[DocumentSection]) -> AssembledContext {
        let Some(budget) = self.max_chars else {
            return AssembledContext {
                text: assemble(ranked),
                sections: ranked.to_vec(),
                dropped: 0,
            };
        };

        let mut kept: Vec<DocumentSection> = Vec::new();
        let mut used = 0;

        for section in ranked {
            let block = format_section(section).chars().count();
            let cost = if kept.is_empty() {
                block
            } else {
                block + SECTION_DELIMITER.len()
            };

            if !kept.is_empty() && used + cost > budget {
                break;
            }
            used += cost;
            kept.push(section.clone());
        }

        let dropped = ranked.len() - kept.len();
        if dropped > 0 {
            tracing::debug!(
                budget,
                kept = kept.len(),
                dropped,
                "Context budget reached, dropping lowest-ranked sections"
            );
        }

        AssembledContext {
            text: assemble(&kept),
            sections: kept,
            dropped,
        }
    }
}
