//! Post models assembled by the catalog

use serde::{Deserialize, Serialize};

use super::FrontMatter;

/// A fully assembled post, including rendered HTML
///
/// Serializes as `{id, contentHtml, ...metadata}`: the front-matter fields
/// are flattened alongside the id, so collaborators see one flat record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// External identifier (slug), the filename without extension
    pub id: String,

    /// Rendered body HTML
    pub content_html: String,

    /// All front-matter fields
    #[serde(flatten)]
    pub meta: FrontMatter,
}

/// A listing entry: the same record minus the rendered content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: String,

    #[serde(flatten)]
    pub meta: FrontMatter,
}

impl PostSummary {
    /// Raw publish-date string, as listings order by it
    pub fn date(&self) -> Option<&str> {
        self.meta.date.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.meta.title.as_deref()
    }
}
