//! Index data types for link targets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Kind of linkable target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// The note itself, addressed by its title (or one of its aliases).
    Title,
    /// A heading inside a note.
    Heading,
    /// A block carrying an explicit `^id` marker.
    Block,
    /// A tag used anywhere in a note.
    Tag,
}

impl EntryKind {
    pub const ALL: [EntryKind; 4] = [Self::Title, Self::Heading, Self::Block, Self::Tag];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Heading => "heading",
            Self::Block => "block",
            Self::Tag => "tag",
        }
    }

    /// Parse kind from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "title" | "note" => Some(Self::Title),
            "heading" => Some(Self::Heading),
            "block" => Some(Self::Block),
            "tag" => Some(Self::Tag),
            _ => None,
        }
    }
}

/// A single linkable target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub kind: EntryKind,
    /// Opaque identifier of the owning document.
    pub source_id: String,
    /// Human-readable title of the owning document.
    pub source_title: String,
    /// Identifier used inside the produced link: note title, heading text,
    /// block id, or tag name.
    pub target: String,
    /// Label shown in suggestions.
    pub display_text: String,
}

impl IndexEntry {
    /// Uniqueness key within a bucket and across match results.
    pub fn identity(&self) -> (EntryKind, &str, &str) {
        (self.kind, &self.source_id, &self.target)
    }
}

/// Structural metadata extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub title: String,
    /// Alternative names, each indexed as an extra title entry.
    pub aliases: Vec<String>,
    /// Tag names without the leading `#`.
    pub tags: BTreeSet<String>,
    /// Heading texts in document order.
    pub headings: Vec<String>,
    /// Block ids without the leading `^`.
    pub block_ids: BTreeSet<String>,
}

impl DocumentMetadata {
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Default::default() }
    }

    /// Derive the index entries for this document, paired with the text
    /// their key is normalized from.
    pub fn entries(&self, source_id: &str) -> Vec<(String, IndexEntry)> {
        let entry = |kind, target: &str, display: String| IndexEntry {
            kind,
            source_id: source_id.to_string(),
            source_title: self.title.clone(),
            target: target.to_string(),
            display_text: display,
        };

        let mut out = Vec::with_capacity(
            1 + self.aliases.len() + self.tags.len() + self.headings.len() + self.block_ids.len(),
        );

        out.push((self.title.clone(), entry(EntryKind::Title, &self.title, self.title.clone())));
        for alias in &self.aliases {
            out.push((alias.clone(), entry(EntryKind::Title, &self.title, alias.clone())));
        }
        for tag in &self.tags {
            out.push((tag.clone(), entry(EntryKind::Tag, tag, format!("#{tag}"))));
        }
        for heading in &self.headings {
            out.push((heading.clone(), entry(EntryKind::Heading, heading, heading.clone())));
        }
        for block_id in &self.block_ids {
            out.push((block_id.clone(), entry(EntryKind::Block, block_id, format!("^{block_id}"))));
        }

        out
    }
}

/// A document as listed by a [`crate::index::DocumentSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub id: String,
    pub metadata: DocumentMetadata,
}

impl SourceDocument {
    pub fn new(id: impl Into<String>, metadata: DocumentMetadata) -> Self {
        Self { id: id.into(), metadata }
    }
}
