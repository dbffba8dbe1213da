//! Link-target index and lookup.
//!
//! This module provides:
//! - The entry model (titles, headings, blocks, tags) and document metadata
//! - [`LinkIndex`], the normalized key to entries mapping
//! - [`find_matches`], ranked prefix and fuzzy lookup
//! - [`IndexBuilder`], full builds from a [`DocumentSource`]
//!
//! # Example
//!
//! ```
//! use phraselink_core::index::{DocumentMetadata, LinkIndex, find_matches};
//!
//! let mut index = LinkIndex::new();
//! index.insert_document("paris.md", &DocumentMetadata::titled("Paris"));
//!
//! let matches = find_matches(&index, "par");
//! assert_eq!(matches[0].entry.target, "Paris");
//! ```

pub mod builder;
pub mod matcher;
pub mod source;
pub mod store;
pub mod types;

pub use builder::{IndexBuilder, IndexStats, ProgressCallback};
pub use matcher::{MAX_RESULTS, Match, MatchRank, find_matches};
pub use source::{DocumentSource, SourceError};
pub use store::LinkIndex;
pub use types::{DocumentMetadata, EntryKind, IndexEntry, SourceDocument};
