//! Inbound interface to the document store.

use thiserror::Error;

use super::types::{DocumentMetadata, SourceDocument};
use crate::vault::VaultWalkerError;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    #[error("vault walker error: {0}")]
    Walker(#[from] VaultWalkerError),

    #[error("failed to read document {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A collection of documents the index can be built from.
pub trait DocumentSource {
    /// Every document with its structural metadata.
    fn list_all_documents(&self) -> Result<Vec<SourceDocument>, SourceError>;

    /// Metadata of a single document, `None` if it no longer exists.
    fn load_document(&self, id: &str) -> Result<Option<DocumentMetadata>, SourceError> {
        Ok(self
            .list_all_documents()?
            .into_iter()
            .find(|doc| doc.id == id)
            .map(|doc| doc.metadata))
    }
}

/// In-memory source, mainly for hosts that already hold extracted metadata.
impl DocumentSource for Vec<SourceDocument> {
    fn list_all_documents(&self) -> Result<Vec<SourceDocument>, SourceError> {
        Ok(self.clone())
    }
}
