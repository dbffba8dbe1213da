//! Link text construction for a matched target.

use crate::index::{EntryKind, IndexEntry};

/// Build the wikilink that replaces `phrase` for a matched `entry`.
///
/// - Title: `[[target]]`, or `[[target|phrase]]` when the phrase differs
/// - Heading: `[[source_title#heading|phrase]]`
/// - Block: `[[source_title#^block|phrase]]`
/// - Tag: the entry's display text, e.g. `#travel`
pub fn resolve_link_text(entry: &IndexEntry, phrase: &str) -> String {
    match entry.kind {
        EntryKind::Title => wikilink(&entry.target, phrase),
        EntryKind::Heading => {
            wikilink(&format!("{}#{}", entry.source_title, entry.target), phrase)
        }
        EntryKind::Block => {
            wikilink(&format!("{}#^{}", entry.source_title, entry.target), phrase)
        }
        EntryKind::Tag => entry.display_text.clone(),
    }
}

fn wikilink(destination: &str, phrase: &str) -> String {
    if phrase.is_empty() || phrase == destination {
        format!("[[{destination}]]")
    } else {
        format!("[[{destination}|{phrase}]]")
    }
}

/// A text edit for the host editor: replace `span_start..span_end` of the
/// line with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TextReplacement {
    pub span_start: usize,
    pub span_end: usize,
    pub replacement: String,
}

impl TextReplacement {
    /// Apply the edit to `line`. Returns `None` if the span does not fit.
    pub fn apply(&self, line: &str) -> Option<String> {
        let head = line.get(..self.span_start)?;
        let tail = line.get(self.span_end..)?;
        Some(format!("{head}{}{tail}", self.replacement))
    }
}
