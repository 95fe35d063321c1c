// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! README rendering
//!
//! Rendering is a pluggable capability. When no renderer is available the
//! viewer shows the raw markdown instead of dropping it.

use std::sync::Arc;

use crate::config::ViewerConfig;

/// Converts markdown to HTML
pub trait MarkdownRenderer: Send + Sync {
    fn name(&self) -> &'static str;

    fn render(&self, markdown: &str) -> String;
}

/// CommonMark renderer with the GitHub extensions READMEs tend to use.
///
/// Its output is inserted into the page unescaped. Raw HTML in the markdown
/// (including `<script>`) is shown as escaped text unless `with_raw_html(true)`
/// is set, which treats READMEs as trusted content.
#[cfg(feature = "markdown")]
pub struct CmarkRenderer {
    options: pulldown_cmark::Options,
    raw_html: bool,
}

#[cfg(feature = "markdown")]
impl CmarkRenderer {
    pub fn new() -> Self {
        use pulldown_cmark::Options;

        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_FOOTNOTES);
        Self {
            options,
            raw_html: false,
        }
    }

    /// Pass HTML blocks and inline HTML through untouched
    pub fn with_raw_html(mut self, raw_html: bool) -> Self {
        self.raw_html = raw_html;
        self
    }
}

#[cfg(feature = "markdown")]
impl Default for CmarkRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "markdown")]
impl MarkdownRenderer for CmarkRenderer {
    fn name(&self) -> &'static str {
        "pulldown-cmark"
    }

    fn render(&self, markdown: &str) -> String {
        use pulldown_cmark::Event;

        let raw_html = self.raw_html;
        let parser = pulldown_cmark::Parser::new_ext(markdown, self.options).map(|event| match event {
            Event::Html(html) | Event::InlineHtml(html) if !raw_html => Event::Text(html),
            event => event,
        });
        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut html, parser);
        html
    }
}

/// Renderer selected by configuration and compiled features
pub fn renderer_for(config: &ViewerConfig) -> Option<Arc<dyn MarkdownRenderer>> {
    if !config.render_markdown {
        return None;
    }
    compiled_renderer(config)
}

#[cfg(feature = "markdown")]
fn compiled_renderer(config: &ViewerConfig) -> Option<Arc<dyn MarkdownRenderer>> {
    Some(Arc::new(CmarkRenderer::new().with_raw_html(config.allow_raw_html)))
}

#[cfg(not(feature = "markdown"))]
fn compiled_renderer(_config: &ViewerConfig) -> Option<Arc<dyn MarkdownRenderer>> {
    tracing::warn!("Built without the 'markdown' feature; READMEs will be shown raw");
    None
}

/// Escape text for inclusion in HTML
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_disabled_in_config() {
        let config = ViewerConfig {
            render_markdown: false,
            ..ViewerConfig::default()
        };
        assert!(renderer_for(&config).is_none());
    }

    #[cfg(feature = "markdown")]
    #[test]
    fn test_cmark_renders_heading_and_table() {
        let renderer = CmarkRenderer::new();
        assert_eq!(renderer.render("# Hi").trim(), "<h1>Hi</h1>");

        let table = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(table.contains("<table>"));
        assert!(table.contains("<td>2</td>"));
    }

    #[cfg(feature = "markdown")]
    #[test]
    fn test_cmark_escapes_raw_html() {
        let renderer = CmarkRenderer::new();
        let html = renderer.render("# Demo\n\n<script>alert(1)</script>\n\nPress <kbd>Space</kbd>.\n");

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&lt;kbd&gt;Space&lt;/kbd&gt;"));
        assert!(html.contains("<h1>Demo</h1>"));
    }

    #[cfg(feature = "markdown")]
    #[test]
    fn test_cmark_raw_html_when_trusted() {
        let config = ViewerConfig {
            allow_raw_html: true,
            ..ViewerConfig::default()
        };
        let renderer = renderer_for(&config).unwrap();
        assert!(renderer.render("<details>more</details>\n").contains("<details>more</details>"));
    }
}
