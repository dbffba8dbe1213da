//! Markdown vault adapter: file discovery and metadata extraction.

pub mod extractor;
pub mod source;
pub mod walker;

pub use extractor::extract_metadata;
pub use source::VaultSource;
pub use walker::{VaultWalker, VaultWalkerError, WalkedFile, document_id};
