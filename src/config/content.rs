//! Content pipeline configuration

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Where and how content entries live on disk.
///
/// The content root is always injected explicitly; the pipeline never reads
/// a working-directory-relative path on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding the `{id}.md` content files
    pub content_dir: PathBuf,

    /// File extension that marks a content entry
    pub extension: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content/blog"),
            extension: "md".to_string(),
        }
    }
}

impl ContentConfig {
    /// Create a config rooted at an explicit content directory
    pub fn with_content_dir<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            content_dir: dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: ContentConfig = serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }
}
