//! Error taxonomy for the content pipeline

use std::path::PathBuf;

use thiserror::Error;

use crate::content::{FrontMatterError, RenderError};

/// Errors surfaced to the calling collaborator.
///
/// Every variant propagates unchanged: the pipeline performs no retries, no
/// partial recovery and no default substitution. Mapping `NotFound` to a
/// "not found" response (or failing a static build loudly) is the caller's
/// job.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The content directory is missing or unreadable. Indicates a
    /// deployment/configuration fault, not a transient condition.
    #[error("content directory {path:?} cannot be read")]
    Repository {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No content entry with the requested id.
    #[error("no content entry named `{id}`")]
    NotFound { id: String },

    /// The entry's front-matter block is malformed.
    #[error("malformed front-matter in `{id}`")]
    Metadata {
        id: String,
        #[source]
        source: FrontMatterError,
    },

    /// The renderer itself failed. Malformed markdown content never lands
    /// here; it degrades to literal text inside the renderer.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ContentError {
    /// Whether this error maps to a "not found" response at the boundary.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}
