//! Front-matter parsing

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::helpers::parse_date_string;

/// Front-matter parse failures
///
/// The parser itself does not know which entry it is working on; the catalog
/// attaches the offending id when it propagates one of these.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unterminated JSON front-matter")]
    UnterminatedJson,
}

/// Author social links, nested under `authorSocial`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorSocial {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

/// Front-matter data from a content entry
///
/// No schema is enforced. The fields below are the ones consumers recognize;
/// everything else passes through `extra` unmodified, so new optional keys
/// can appear in content files without pipeline changes. `extra` keeps
/// insertion order so serialization stays deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrontMatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Publish date, kept verbatim; listings sort on the raw string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_bio: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_social: Option<AuthorSocial>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time_minutes: Option<u32>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_body)
    ///
    /// A file without any front-matter delimiter parses to empty metadata
    /// with the entire input as body. Malformed structured data between the
    /// delimiters is an error; broken content should be caught at build
    /// time, not silently lose its metadata.
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start();

        // YAML front-matter (---)
        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        // JSON front-matter (;;; or a leading object)
        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let rest = &content[3..]; // Skip opening ---

        if let Some(end_pos) = rest.find("\n---") {
            let yaml_content = &rest[..end_pos];
            let remaining = &rest[end_pos + 4..]; // Skip \n---
            let remaining = remaining.trim_start_matches(['\n', '\r']);

            if yaml_content.trim().is_empty() {
                return Ok((FrontMatter::default(), remaining));
            }

            let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)?;
            Ok((fm, remaining))
        } else {
            // No closing ---, treat as no front-matter
            Ok((FrontMatter::default(), content))
        }
    }

    fn parse_json(content: &str) -> Result<(Self, &str), FrontMatterError> {
        // JSON front-matter fenced by ;;;
        if let Some(rest) = content.strip_prefix(";;;") {
            return match rest.find(";;;") {
                Some(end_pos) => {
                    let json_content = &rest[..end_pos];
                    let remaining = &rest[end_pos + 3..];
                    let remaining = remaining.trim_start_matches(['\n', '\r']);

                    let fm: FrontMatter = serde_json::from_str(json_content)?;
                    Ok((fm, remaining))
                }
                None => Err(FrontMatterError::UnterminatedJson),
            };
        }

        // A bare JSON object at the start of the file
        let mut depth = 0;
        let mut end_pos = 0;
        for (i, c) in content.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end_pos = i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }

        if end_pos == 0 {
            return Err(FrontMatterError::UnterminatedJson);
        }

        let json_content = &content[..end_pos];
        let remaining = content[end_pos..].trim_start_matches(['\n', '\r']);

        let fm: FrontMatter = serde_json::from_str(json_content)?;
        Ok((fm, remaining))
    }

    /// Parse the date string into a point in time, when possible
    pub fn parse_date(&self) -> Option<chrono::NaiveDateTime> {
        self.date.as_deref().and_then(parse_date_string)
    }
}
