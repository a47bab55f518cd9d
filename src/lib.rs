//! postern: a markdown content pipeline for file-based blogs
//!
//! This crate turns a directory of markdown files with front-matter into a
//! sorted, queryable post collection: the repository enumerates and reads
//! entries, the front-matter parser splits metadata from the body, the
//! renderer produces GFM HTML with heading ids and anchor links, and the
//! catalog composes the three into the contract a routing/page layer
//! consumes. The pipeline is a pure read path: content files are never
//! written, and nothing is cached between calls.

pub mod catalog;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;

pub use catalog::PostCatalog;
pub use config::ContentConfig;
pub use content::{
    AuthorSocial, ContentRepository, FrontMatter, FrontMatterError, MarkdownRenderer, Post,
    PostSummary, RenderError,
};
pub use error::ContentError;
