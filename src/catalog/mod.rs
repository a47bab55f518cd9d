//! Post catalog - the public contract over the content pipeline
//!
//! Every operation is a stateless read-transform-return over the files on
//! disk; concurrent calls share no mutable state.

use crate::config::ContentConfig;
use crate::content::{ContentRepository, FrontMatter, MarkdownRenderer, Post, PostSummary};
use crate::error::ContentError;

/// Composes the repository, front-matter parser, and markdown renderer
pub struct PostCatalog {
    repository: ContentRepository,
    renderer: MarkdownRenderer,
}

impl PostCatalog {
    /// Create a catalog over the configured content directory
    pub fn new(config: &ContentConfig) -> Result<Self, ContentError> {
        Ok(Self {
            repository: ContentRepository::new(config),
            renderer: MarkdownRenderer::new()?,
        })
    }

    /// Metadata for every post, newest first
    ///
    /// Bodies are split off and discarded; listings never pay for
    /// rendering. Ordering compares the raw `date` strings descending;
    /// entries without a date sort last, and equal dates keep enumeration
    /// order.
    pub fn list_summaries(&self) -> Result<Vec<PostSummary>, ContentError> {
        let mut summaries = Vec::new();

        for id in self.repository.list_entry_ids()? {
            let raw = self.repository.read_raw(&id)?;
            let (meta, _body) = FrontMatter::parse(&raw).map_err(|source| {
                ContentError::Metadata {
                    id: id.clone(),
                    source,
                }
            })?;
            summaries.push(PostSummary { id, meta });
        }

        summaries.sort_by(|a, b| b.meta.date.cmp(&a.meta.date));

        tracing::debug!("Listed {} post summaries", summaries.len());
        Ok(summaries)
    }

    /// A single post with its body rendered to HTML
    pub async fn get_post(&self, id: &str) -> Result<Post, ContentError> {
        let raw = self.repository.read_raw(id)?;
        let (meta, body) = FrontMatter::parse(&raw).map_err(|source| {
            ContentError::Metadata {
                id: id.to_string(),
                source,
            }
        })?;
        let content_html = self.renderer.render(body).await?;

        tracing::debug!("Assembled post `{}`", id);
        Ok(Post {
            id: id.to_string(),
            content_html,
            meta,
        })
    }

    /// Every routable id; cheaper than a full listing
    pub fn list_all_ids(&self) -> Result<Vec<String>, ContentError> {
        self.repository.list_entry_ids()
    }
}
