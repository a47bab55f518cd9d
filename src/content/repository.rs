//! Content repository - enumerates and reads entries on disk

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ContentConfig;
use crate::error::ContentError;

/// Filesystem-backed store of content entries
///
/// One `{id}.md` file per entry, one level deep under the content root.
/// Entries are read fresh on every call; nothing is cached and nothing is
/// ever written.
pub struct ContentRepository {
    root: PathBuf,
    extension: String,
}

impl ContentRepository {
    /// Create a repository over the configured content directory
    pub fn new(config: &ContentConfig) -> Self {
        Self {
            root: config.content_dir.clone(),
            extension: config.extension.clone(),
        }
    }

    /// The content root this repository reads from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Enumerate the ids of all content entries. Order is unspecified;
    /// ordering is the catalog's concern.
    pub fn list_entry_ids(&self) -> Result<Vec<String>, ContentError> {
        let mut ids = Vec::new();

        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::from(io::ErrorKind::Other));
                ContentError::Repository {
                    path: self.root.clone(),
                    source,
                }
            })?;

            let path = entry.path();
            if entry.file_type().is_file() && self.is_content_file(path) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }

        tracing::debug!("Found {} content entries under {:?}", ids.len(), self.root);
        Ok(ids)
    }

    /// Read the raw text of the entry `{id}.md`
    pub fn read_raw(&self, id: &str) -> Result<String, ContentError> {
        // Ids are slugs, never paths
        if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(ContentError::NotFound { id: id.to_string() });
        }

        let path = self.entry_path(id);
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ContentError::NotFound { id: id.to_string() },
            _ => ContentError::Repository { path, source: e },
        })
    }

    fn entry_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.{}", id, self.extension))
    }

    fn is_content_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e == self.extension)
            .unwrap_or(false)
    }
}
