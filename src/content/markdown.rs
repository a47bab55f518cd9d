//! Markdown rendering
//!
//! Bodies go through a fixed chain of passes: GFM parse, bare-URL
//! autolinking, heading-id assignment, heading-anchor injection, HTML
//! serialization. The chain yields cooperatively between passes so long
//! renders share the executor with other work.
//!
//! Raw HTML embedded in the markdown passes through verbatim. Content files
//! are authored by trusted writers, not user-submitted; if this renderer is
//! ever pointed at untrusted input, a sanitization pass must be added.

use std::collections::HashSet;

use pulldown_cmark::{html, CowStr, Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd};
use regex::Regex;
use thiserror::Error;
use tokio::task::yield_now;

/// Renderer pipeline failures
///
/// Malformed markdown is not a failure: unparseable fragments degrade to
/// literal text. Only resource problems while setting up the pass chain
/// land here.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to initialize autolink pass: {0}")]
    AutolinkPattern(#[from] regex::Error),
}

/// Markdown renderer with GFM extensions and heading anchors
pub struct MarkdownRenderer {
    autolink: Regex,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Result<Self, RenderError> {
        let autolink = Regex::new(r"https?://[^\s<>]+")?;
        Ok(Self { autolink })
    }

    /// Render a markdown body to an HTML string
    ///
    /// Deterministic: the same body always yields byte-identical output.
    pub async fn render(&self, body: &str) -> Result<String, RenderError> {
        let events = parse_gfm(body);
        yield_now().await;

        let events = self.autolink_pass(events);
        yield_now().await;

        let events = heading_id_pass(events);
        yield_now().await;

        let events = anchor_pass(events);
        yield_now().await;

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        Ok(html_output)
    }

    /// Turn bare `http(s)://` URLs in prose into links
    ///
    /// Text inside code blocks or existing links is left alone. Trailing
    /// punctuation and unbalanced closing parens stay outside the link, the
    /// GFM autolink convention.
    fn autolink_pass<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut out = Vec::with_capacity(events.len());
        let mut in_code_block = false;
        let mut link_depth = 0usize;

        for event in events {
            match event {
                Event::Start(tag @ Tag::CodeBlock(_)) => {
                    in_code_block = true;
                    out.push(Event::Start(tag));
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    out.push(Event::End(TagEnd::CodeBlock));
                }
                Event::Start(tag @ Tag::Link { .. }) => {
                    link_depth += 1;
                    out.push(Event::Start(tag));
                }
                Event::End(TagEnd::Link) => {
                    link_depth -= 1;
                    out.push(Event::End(TagEnd::Link));
                }
                Event::Text(text)
                    if !in_code_block && link_depth == 0 && self.autolink.is_match(&text) =>
                {
                    self.link_bare_urls(&text, &mut out);
                }
                other => out.push(other),
            }
        }

        out
    }

    fn link_bare_urls<'a>(&self, text: &str, out: &mut Vec<Event<'a>>) {
        let mut last = 0;

        for m in self.autolink.find_iter(text) {
            let url = trim_url(m.as_str());
            if url.is_empty() {
                continue;
            }

            if m.start() > last {
                out.push(Event::Text(text[last..m.start()].to_string().into()));
            }

            out.push(Event::Start(Tag::Link {
                link_type: LinkType::Autolink,
                dest_url: CowStr::from(url.to_string()),
                title: "".into(),
                id: "".into(),
            }));
            out.push(Event::Text(url.to_string().into()));
            out.push(Event::End(TagEnd::Link));

            last = m.start() + url.len();
        }

        if last < text.len() {
            out.push(Event::Text(text[last..].to_string().into()));
        }
    }
}

/// Parse a body with the GFM extension set enabled
fn parse_gfm(body: &str) -> Vec<Event<'_>> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM;
    Parser::new_ext(body, options).collect()
}

/// Strip trailing punctuation a sentence contributed to a matched URL
fn trim_url(raw: &str) -> &str {
    let mut url = raw;
    loop {
        let trimmed = url.trim_end_matches(['.', ',', ';', ':', '!', '?', '\'', '"']);
        let trimmed = if trimmed.ends_with(')')
            && trimmed.matches(')').count() > trimmed.matches('(').count()
        {
            &trimmed[..trimmed.len() - 1]
        } else {
            trimmed
        };
        if trimmed.len() == url.len() {
            return trimmed;
        }
        url = trimmed;
    }
}

struct HeadingBuffer<'a> {
    level: HeadingLevel,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    inner: Vec<Event<'a>>,
    text: String,
}

/// Give every heading a deterministic `id` derived from its text
fn heading_id_pass(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());
    let mut used: HashSet<String> = HashSet::new();
    let mut buffer: Option<HeadingBuffer> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading {
                level,
                classes,
                attrs,
                ..
            }) => {
                buffer = Some(HeadingBuffer {
                    level,
                    classes,
                    attrs,
                    inner: Vec::new(),
                    text: String::new(),
                });
            }
            Event::End(TagEnd::Heading(level)) => {
                // Parser invariant: headings do not nest, so the buffer is
                // present whenever the end tag arrives
                if let Some(buf) = buffer.take() {
                    let id = unique_heading_id(&buf.text, &mut used);
                    out.push(Event::Start(Tag::Heading {
                        level: buf.level,
                        id: Some(CowStr::from(id)),
                        classes: buf.classes,
                        attrs: buf.attrs,
                    }));
                    out.extend(buf.inner);
                }
                out.push(Event::End(TagEnd::Heading(level)));
            }
            other => match buffer.as_mut() {
                Some(buf) => {
                    match &other {
                        Event::Text(t) => buf.text.push_str(t),
                        Event::Code(t) => buf.text.push_str(t),
                        _ => {}
                    }
                    buf.inner.push(other);
                }
                None => out.push(other),
            },
        }
    }

    out
}

fn unique_heading_id(text: &str, used: &mut HashSet<String>) -> String {
    let base = slug::slugify(text);
    let base = if base.is_empty() {
        "section".to_string()
    } else {
        base
    };

    let mut id = base.clone();
    let mut suffix = 1;
    while used.contains(&id) {
        id = format!("{}-{}", base, suffix);
        suffix += 1;
    }
    used.insert(id.clone());

    id
}

/// Inject a self-referencing anchor link at the front of each heading
fn anchor_pass(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());

    for event in events {
        match event {
            Event::Start(Tag::Heading {
                level,
                id: Some(id),
                classes,
                attrs,
            }) => {
                let anchor = format!(
                    r##"<a class="anchor" aria-hidden="true" href="#{}"></a>"##,
                    id
                );
                out.push(Event::Start(Tag::Heading {
                    level,
                    id: Some(id),
                    classes,
                    attrs,
                }));
                out.push(Event::Html(CowStr::from(anchor)));
            }
            other => out.push(other),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> MarkdownRenderer {
        MarkdownRenderer::new().unwrap()
    }

    #[tokio::test]
    async fn test_render_basic_markdown() {
        let html = renderer()
            .render("# Hello World\n\nThis is a test.")
            .await
            .unwrap();
        assert!(html.contains(r#"<h1 id="hello-world">"#));
        assert!(html.contains("Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[tokio::test]
    async fn test_render_is_deterministic() {
        let body = "# Title\n\nSome *text* with https://example.com and a | table |.";
        let r = renderer();
        let first = r.render(body).await.unwrap();
        let second = r.render(body).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_gfm_table() {
        let html = renderer()
            .render("| a | b |\n|---|---|\n| 1 | 2 |")
            .await
            .unwrap();
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
        assert!(!html.contains("| a |"));
    }

    #[tokio::test]
    async fn test_gfm_strikethrough() {
        let html = renderer().render("~~old~~ new").await.unwrap();
        assert!(html.contains("<del>old</del>"));
    }

    #[tokio::test]
    async fn test_gfm_task_list() {
        let html = renderer()
            .render("- [ ] open item\n- [x] done item")
            .await
            .unwrap();
        assert!(html.contains(r#"type="checkbox""#));
        assert!(html.contains("disabled"));
        assert!(html.contains("checked"));
    }

    #[tokio::test]
    async fn test_autolink_bare_url() {
        let html = renderer()
            .render("Docs live at https://example.com/docs. Enjoy.")
            .await
            .unwrap();
        assert!(html.contains(r#"<a href="https://example.com/docs">https://example.com/docs</a>"#));
        // The sentence period stays outside the link
        assert!(!html.contains(r#"href="https://example.com/docs.""#));
    }

    #[tokio::test]
    async fn test_autolink_parenthesized() {
        let html = renderer()
            .render("(see https://example.com/a_(b))")
            .await
            .unwrap();
        // Balanced parens belong to the URL, the closing one does not
        assert!(html.contains(r#"href="https://example.com/a_(b)""#));
    }

    #[tokio::test]
    async fn test_autolink_skips_code() {
        let html = renderer()
            .render("Inline `https://example.com` and\n\n```\nhttps://example.com\n```")
            .await
            .unwrap();
        assert!(!html.contains("<a href"));
    }

    #[tokio::test]
    async fn test_heading_ids_unique() {
        let html = renderer()
            .render("# Introduction\n\ntext\n\n## Introduction")
            .await
            .unwrap();
        assert!(html.contains(r#"<h1 id="introduction">"#));
        assert!(html.contains(r#"<h2 id="introduction-1">"#));
    }

    #[tokio::test]
    async fn test_heading_anchor_injected() {
        let html = renderer().render("## Getting Started").await.unwrap();
        assert!(html.contains(
            r##"<a class="anchor" aria-hidden="true" href="#getting-started"></a>"##
        ));
    }

    #[tokio::test]
    async fn test_heading_keeps_inline_markup() {
        let html = renderer().render("# Hello *World* `now`").await.unwrap();
        assert!(html.contains(r#"<h1 id="hello-world-now">"#));
        assert!(html.contains("<em>World</em>"));
        assert!(html.contains("<code>now</code>"));
    }

    #[tokio::test]
    async fn test_punctuation_only_heading() {
        let html = renderer().render("# !!!\n\n# ???").await.unwrap();
        assert!(html.contains(r#"<h1 id="section">"#));
        assert!(html.contains(r#"<h1 id="section-1">"#));
    }

    #[tokio::test]
    async fn test_inline_html_passes_through() {
        let html = renderer()
            .render("before\n\n<div class=\"note\">kept as-is</div>\n\nafter")
            .await
            .unwrap();
        assert!(html.contains("<div class=\"note\">kept as-is</div>"));
    }

    #[tokio::test]
    async fn test_malformed_markdown_degrades() {
        let html = renderer()
            .render("[unclosed link( and **dangling\n\n| not | a table")
            .await
            .unwrap();
        assert!(html.contains("unclosed link"));
        assert!(html.contains("not"));
    }

    #[test]
    fn test_trim_url() {
        assert_eq!(trim_url("https://a.b/c."), "https://a.b/c");
        assert_eq!(trim_url("https://a.b/c),"), "https://a.b/c");
        assert_eq!(trim_url("https://a.b/(c)"), "https://a.b/(c)");
        assert_eq!(trim_url("https://a.b/c"), "https://a.b/c");
    }
}
