//! [`DocumentSource`] over a markdown vault on disk.

use std::fs;
use std::path::{Path, PathBuf};

use super::extractor::extract_metadata;
use super::walker::{VaultWalker, WalkedFile};
use crate::config::ResolvedConfig;
use crate::index::{DocumentMetadata, DocumentSource, SourceDocument, SourceError};

pub struct VaultSource {
    walker: VaultWalker,
}

impl VaultSource {
    pub fn new(root: &Path, excluded_folders: Vec<PathBuf>) -> Result<Self, SourceError> {
        Ok(Self { walker: VaultWalker::with_exclusions(root, excluded_folders)? })
    }

    pub fn from_config(cfg: &ResolvedConfig) -> Result<Self, SourceError> {
        Self::new(&cfg.vault_root, cfg.excluded_folders.clone())
    }

    pub fn root(&self) -> &Path {
        self.walker.root()
    }

    fn read(&self, file: &WalkedFile) -> Result<DocumentMetadata, SourceError> {
        let content = fs::read_to_string(&file.absolute_path).map_err(|source| {
            SourceError::FileRead { path: file.absolute_path.display().to_string(), source }
        })?;
        Ok(extract_metadata(&content, &file.relative_path))
    }
}

impl DocumentSource for VaultSource {
    fn list_all_documents(&self) -> Result<Vec<SourceDocument>, SourceError> {
        let files = self.walker.walk()?;
        let mut documents = Vec::with_capacity(files.len());

        for file in &files {
            match self.read(file) {
                Ok(metadata) => documents.push(SourceDocument::new(file.document_id(), metadata)),
                // One unreadable note must not hide the rest of the vault.
                Err(e) => tracing::warn!(error = %e, "skipping document"),
            }
        }

        tracing::debug!(root = %self.root().display(), documents = documents.len(), "vault listed");
        Ok(documents)
    }

    fn load_document(&self, id: &str) -> Result<Option<DocumentMetadata>, SourceError> {
        let Some(file) = self.walker.resolve(id)? else {
            return Ok(None);
        };
        if !file.absolute_path.is_file() {
            return Ok(None);
        }
        self.read(&file).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vault() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("paris.md"), "---\ntitle: Paris\ntags: travel\n---\n# Museums\n")
            .unwrap();
        fs::create_dir_all(root.join("trips/2024")).unwrap();
        fs::write(root.join("trips/2024/rome.md"), "Pasta ^carbonara\n").unwrap();
        fs::create_dir_all(root.join("templates")).unwrap();
        fs::write(root.join("templates/daily.md"), "# Daily\n").unwrap();
        dir
    }

    #[test]
    fn test_lists_documents_with_metadata() {
        let dir = vault();
        let source = VaultSource::new(dir.path(), vec![PathBuf::from("templates")]).unwrap();
        let docs = source.list_all_documents().unwrap();

        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["paris.md", "trips/2024/rome.md"]);

        assert_eq!(docs[0].metadata.title, "Paris");
        assert_eq!(docs[0].metadata.headings, vec!["Museums"]);
        assert!(docs[0].metadata.tags.contains("travel"));
        assert_eq!(docs[1].metadata.title, "rome");
        assert!(docs[1].metadata.block_ids.contains("carbonara"));
    }

    #[test]
    fn test_load_document() {
        let dir = vault();
        let source = VaultSource::new(dir.path(), vec![PathBuf::from("templates")]).unwrap();

        let meta = source.load_document("trips/2024/rome.md").unwrap().unwrap();
        assert_eq!(meta.title, "rome");
        assert!(source.load_document("missing.md").unwrap().is_none());
        assert!(source.load_document("templates/daily.md").unwrap().is_none());
        assert!(source.load_document("../outside.md").is_err());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let err = VaultSource::new(Path::new("/nonexistent/vault"), Vec::new()).err().unwrap();
        assert!(matches!(err, SourceError::Walker(_)));
    }
}
