//! Section parser — splits exported plain text into titled sections.
//!
//! The export carries no reliable markup, so headers are recognised by shape.
//! A non-blank trimmed line shorter than 100 characters is a header when any
//! of these hold:
//!
//! 1. it is its own upper-case form and 4–49 characters long (`SHIPPING`);
//! 2. the next line is a separator of 3+ `-`/`=` characters, which is consumed;
//! 3. it is under 80 characters, has no `.`, and follows a blank line.
//!
//! The heuristic misfires on some short standalone sentences. That is accepted
//! behaviour and must not be tightened without re-evaluating retrieval quality.

use helpdoc_core::section::DocumentSection;

/// Title of the single section emitted when no header is recognised.
pub const FALLBACK_TITLE: &str = "Document Content";

const MAX_HEADER_CHARS: usize = 100;
const MAX_STANDALONE_CHARS: usize = 80;
const MIN_CAPS_CHARS: usize = 4;
const MAX_CAPS_CHARS: usize = 49;
const MIN_SEPARATOR_CHARS: usize = 3;

/// A section still receiving body lines.
struct OpenSection<'a> {
    title: &'a str,
    body: Vec<&'a str>,
}

impl<'a> OpenSection<'a> {
    fn new(title: &'a str) -> Self {
        Self {
            title,
            body: Vec::new(),
        }
    }

    /// Push the finished section unless its trimmed content is empty.
    ///
    /// Indices are handed out here so dropped sections leave no gaps.
    fn close_into(self, sections: &mut Vec<DocumentSection>) {
        let content = self.body.join("\n");
        let content = content.trim();
        if content.is_empty() {
            return;
        }
        let index = sections.len();
        sections.push(DocumentSection::new(self.title, content, index));
    }
}

/// Parse raw document text into ordered sections.
///
/// Non-blank input always yields at least one section.
pub fn parse(text: &str) -> Vec<DocumentSection> {
    let normalized = text.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    let mut sections = Vec::new();
    let mut current: Option<OpenSection<'_>> = None;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();
        let underlined = lines.get(i + 1).is_some_and(|next| is_separator(next.trim()));
        let after_blank = i > 0 && lines[i - 1].trim().is_empty();

        if is_header(line, underlined, after_blank) {
            if let Some(open) = current.take() {
                open.close_into(&mut sections);
            }
            current = Some(OpenSection::new(line));
            if underlined {
                i += 1;
            }
        } else if let Some(open) = current.as_mut() {
            if !line.is_empty() {
                open.body.push(lines[i]);
            }
        }

        i += 1;
    }

    if let Some(open) = current.take() {
        open.close_into(&mut sections);
    }

    let trimmed = normalized.trim();
    if sections.is_empty() && !trimmed.is_empty() {
        sections.push(DocumentSection::new(FALLBACK_TITLE, trimmed, 0));
    }

    sections
}

fn is_header(line: &str, underlined: bool, after_blank: bool) -> bool {
    let len = line.chars().count();
    if len == 0 || len >= MAX_HEADER_CHARS {
        return false;
    }

    let all_caps = (MIN_CAPS_CHARS..=MAX_CAPS_CHARS).contains(&len) && line.to_uppercase() == line;
    let standalone = len < MAX_STANDALONE_CHARS && !line.contains('.') && after_blank;

    all_caps || underlined || standalone
}

/// `---`, `====`, `-=-` and friends.
fn is_separator(line: &str) -> bool {
    line.chars().count() >= MIN_SEPARATOR_CHARS && line.chars().all(|c| c == '-' || c == '=')
}
