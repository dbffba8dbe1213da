//! Full index builds from a document source.

use std::time::Instant;

use super::source::{DocumentSource, SourceError};
use super::store::LinkIndex;
use super::types::EntryKind;

/// Statistics from a build.
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    /// Number of documents listed by the source.
    pub documents: usize,
    /// Number of entries in the index after the build.
    pub entries: usize,
    /// Number of distinct keys after the build.
    pub keys: usize,
    /// Entries per kind.
    pub by_kind: Vec<(EntryKind, usize)>,
    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Progress callback for builds.
/// Parameters: (current, total, document id)
pub type ProgressCallback = Box<dyn Fn(usize, usize, &str)>;

/// Populates a [`LinkIndex`] from a [`DocumentSource`].
pub struct IndexBuilder<'a> {
    source: &'a dyn DocumentSource,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(source: &'a dyn DocumentSource) -> Self {
        Self { source }
    }

    /// Clear `index` and rebuild it from every document of the source.
    ///
    /// The index is only touched once the source listed its documents, so a
    /// failing source leaves the previous contents in place.
    pub fn full_rebuild(
        &self,
        index: &mut LinkIndex,
        progress: Option<ProgressCallback>,
    ) -> Result<IndexStats, SourceError> {
        let start = Instant::now();
        let documents = self.source.list_all_documents()?;

        index.clear();
        for (i, doc) in documents.iter().enumerate() {
            if let Some(ref cb) = progress {
                cb(i + 1, documents.len(), &doc.id);
            }
            index.insert_document(&doc.id, &doc.metadata);
        }

        let stats = IndexStats {
            documents: documents.len(),
            entries: index.entry_count(),
            keys: index.key_count(),
            by_kind: index.counts_by_kind().to_vec(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            documents = stats.documents,
            entries = stats.entries,
            keys = stats.keys,
            duration_ms = stats.duration_ms,
            "link index rebuilt"
        );
        Ok(stats)
    }
}
