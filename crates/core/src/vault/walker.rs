//! Recursive vault directory walker.

use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum VaultWalkerError {
    #[error("vault root does not exist: {0}")]
    MissingRoot(String),

    #[error("failed to walk vault directory {0}: {1}")]
    WalkError(String, #[source] walkdir::Error),

    #[error("invalid document id '{0}'")]
    InvalidId(String),
}

/// A markdown document found under the vault root.
#[derive(Debug, Clone)]
pub struct WalkedFile {
    /// Absolute path to the file.
    pub absolute_path: PathBuf,
    /// Path relative to vault root.
    pub relative_path: PathBuf,
}

impl WalkedFile {
    /// Stable document id: the relative path with `/` separators.
    pub fn document_id(&self) -> String {
        document_id(&self.relative_path)
    }
}

/// Join the components of a relative path with `/`.
pub fn document_id(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Lists the markdown documents of one vault.
#[derive(Debug)]
pub struct VaultWalker {
    root: PathBuf,
    excluded_folders: Vec<PathBuf>,
}

impl VaultWalker {
    pub fn new(root: &Path) -> Result<Self, VaultWalkerError> {
        Self::with_exclusions(root, Vec::new())
    }

    /// Walker that also prunes `excluded_folders`, given relative to the
    /// vault root or as absolute paths inside it.
    pub fn with_exclusions(
        root: &Path,
        excluded_folders: Vec<PathBuf>,
    ) -> Result<Self, VaultWalkerError> {
        let root = root
            .canonicalize()
            .map_err(|_| VaultWalkerError::MissingRoot(root.display().to_string()))?;

        // Stored relative to the canonical root.
        let excluded_folders = excluded_folders
            .into_iter()
            .map(|p| p.strip_prefix(&root).map(Path::to_path_buf).unwrap_or(p))
            .collect();

        Ok(Self { root, excluded_folders })
    }

    /// All markdown documents in the vault, sorted by relative path.
    pub fn walk(&self) -> Result<Vec<WalkedFile>, VaultWalkerError> {
        let mut files = Vec::new();
        let walk = WalkDir::new(&self.root).follow_links(false).into_iter();

        for entry in walk.filter_entry(|e| !self.is_excluded(e)) {
            let entry = entry
                .map_err(|e| VaultWalkerError::WalkError(self.root.display().to_string(), e))?;
            let path = entry.path();
            if entry.file_type().is_file()
                && is_markdown_file(path)
                && let Ok(relative) = path.strip_prefix(&self.root)
            {
                files.push(WalkedFile {
                    absolute_path: path.to_path_buf(),
                    relative_path: relative.to_path_buf(),
                });
            }
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(files)
    }

    /// Resolve a document id to a markdown file the walk would include.
    ///
    /// Returns `Ok(None)` when the id names an excluded location or a file
    /// that is not markdown. Ids escaping the vault root are rejected.
    pub fn resolve(&self, id: &str) -> Result<Option<WalkedFile>, VaultWalkerError> {
        let relative = PathBuf::from(id);
        if id.is_empty()
            || relative.components().any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(VaultWalkerError::InvalidId(id.to_string()));
        }

        let skipped = relative.iter().any(|part| is_skipped_name(&part.to_string_lossy()))
            || self.excluded_folders.iter().any(|ex| relative.starts_with(ex));
        if skipped || !is_markdown_file(&relative) {
            return Ok(None);
        }

        Ok(Some(WalkedFile { absolute_path: self.root.join(&relative), relative_path: relative }))
    }

    fn is_excluded(&self, entry: &walkdir::DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        is_skipped_name(&entry.file_name().to_string_lossy())
            || entry
                .path()
                .strip_prefix(&self.root)
                .is_ok_and(|relative| self.excluded_folders.iter().any(|ex| relative.starts_with(ex)))
    }

    /// Canonical vault root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Hidden entries and common non-vault directories.
fn is_skipped_name(name: &str) -> bool {
    name.starts_with('.') || matches!(name, "node_modules" | "target" | "__pycache__" | "venv")
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e == "md")
}
