// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Project loader/viewer
//!
//! Owns everything the project detail page shows: header, demo link, the
//! code pane with its tabs, and the documentation pane. Loading fans out one
//! fetch per known file and waits for all of them to settle; each failure
//! degrades to fallback text for that file only.

pub mod files;

use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

pub use files::{FileEntry, FileKey, FileSet, FileState, Tab};

use crate::markdown::{escape_html, MarkdownRenderer};
use crate::project::ProjectReference;
use crate::source::ContentSource;
use crate::{AppConfig, Result};

/// Documentation pane text when the page origin cannot fetch
pub const LOCAL_FILE_WARNING: &str = "<div class=\"warning\"><strong>Warning:</strong> \
    You are opening this file directly. Browsers block fetching local files (CORS). \
    Please use a local server (e.g., Live Server in VS Code) to view the code and README.</div>";

/// Code pane text when the page origin cannot fetch
pub const LOCAL_FILE_CODE: &str =
    "// Cannot fetch code via file:// protocol.\n// Please use a local server.";

/// Serializable view of the whole page state
#[derive(Debug, Serialize)]
pub struct ViewerSnapshot<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub demo_link: &'a str,
    pub content_path: &'a str,
    pub active_tab: Tab,
    pub code: &'a str,
    pub documentation: &'a str,
    pub files: Vec<(FileKey, &'a FileEntry)>,
}

/// The project detail view
pub struct ProjectViewer {
    reference: ProjectReference,
    title: String,
    description: String,
    demo_link: String,
    content_path: String,
    files: FileSet,
    active: Tab,
    code_pane: String,
    docs_pane: String,
    renderer: Option<Arc<dyn MarkdownRenderer>>,
}

impl ProjectViewer {
    /// Set up the header, demo link and default tab. No I/O happens here, so
    /// the header is populated even if loading later fails outright.
    pub fn new(reference: ProjectReference, config: &AppConfig) -> Self {
        let base_dir = &config.content.base_dir;
        let files = FileSet::loading();

        let mut viewer = Self {
            title: reference.display_title(&config.viewer.default_title).to_string(),
            description: reference.description(),
            demo_link: reference.demo_link(base_dir),
            content_path: reference.content_path(base_dir),
            docs_pane: format!("<p>{}</p>", FileKey::Readme.loading_text()),
            code_pane: String::new(),
            active: Tab::Html,
            files,
            reference,
            renderer: crate::markdown::renderer_for(&config.viewer),
        };
        viewer.show_tab(FileKey::Html);
        viewer
    }

    /// Replace the markdown renderer (`None` shows READMEs raw)
    pub fn with_renderer(mut self, renderer: Option<Arc<dyn MarkdownRenderer>>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Fetch all project files and populate both panes.
    ///
    /// Never fails: per-file errors become fallback text, and anything else
    /// is reported in the documentation pane.
    pub async fn load(&mut self, source: &dyn ContentSource) {
        if let Err(e) = source.check_access() {
            warn!("Not fetching project files: {}", e);
            self.docs_pane = LOCAL_FILE_WARNING.to_string();
            self.code_pane = LOCAL_FILE_CODE.to_string();
            return;
        }

        if let Err(e) = self.fetch_all(source).await {
            error!("Error loading project files: {}", e);
            self.docs_pane = format!(
                "<p>Error loading project files: {}</p>",
                escape_html(&e.to_string())
            );
        }
    }

    async fn fetch_all(&mut self, source: &dyn ContentSource) -> Result<()> {
        let location = source.locate(&self.content_path)?;
        info!(
            "Fetching files for: {} at path: {} ({})",
            self.reference.folder(),
            location,
            source.name()
        );

        let content_path = self.content_path.as_str();
        let (html, css, js, readme) = tokio::join!(
            fetch_file(source, content_path, FileKey::Html),
            fetch_file(source, content_path, FileKey::Css),
            fetch_file(source, content_path, FileKey::Js),
            fetch_file(source, content_path, FileKey::Readme),
        );

        self.files.record(FileKey::Html, &html);
        self.files.record(FileKey::Css, &css);
        self.files.record(FileKey::Js, &js);
        self.files.record(FileKey::Readme, &readme);
        self.docs_pane = self.render_readme(&readme);

        self.show_tab(FileKey::Html);
        Ok(())
    }

    fn render_readme(&self, outcome: &Result<String>) -> String {
        match (outcome, &self.renderer) {
            (Ok(markdown), Some(renderer)) => renderer.render(markdown),
            (Ok(markdown), None) => format!(
                "<p>Error: Markdown parser not loaded.</p><pre>{}</pre>",
                escape_html(markdown)
            ),
            (Err(e), _) => format!(
                "<p>{}</p><small class=\"error\">{}</small>",
                FileKey::Readme.fallback_text(),
                escape_html(&e.to_string())
            ),
        }
    }

    /// Show `key` in the code pane and mark its tab active.
    ///
    /// Returns `false` and changes nothing when `key` is not a tab or has no
    /// stored content.
    pub fn show_tab(&mut self, key: FileKey) -> bool {
        let Some(tab) = Tab::from_key(key) else {
            return false;
        };
        let content = self.files.content(key);
        if content.is_empty() {
            return false;
        }

        self.code_pane = content.to_string();
        self.active = tab;
        true
    }

    /// `show_tab` for a tab name such as `"css"`; unknown names are a no-op
    pub fn select(&mut self, name: &str) -> bool {
        match name.parse::<Tab>() {
            Ok(tab) => self.show_tab(tab.key()),
            Err(_) => false,
        }
    }

    pub fn reference(&self) -> &ProjectReference {
        &self.reference
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn demo_link(&self) -> &str {
        &self.demo_link
    }

    pub fn content_path(&self) -> &str {
        &self.content_path
    }

    pub fn files(&self) -> &FileSet {
        &self.files
    }

    pub fn active_tab(&self) -> Tab {
        self.active
    }

    /// Tab controls in display order, each with whether it is active
    pub fn tabs(&self) -> [(Tab, bool); 3] {
        Tab::ALL.map(|tab| (tab, tab == self.active))
    }

    /// Text currently in the code pane
    pub fn code(&self) -> &str {
        &self.code_pane
    }

    /// HTML currently in the documentation pane
    pub fn documentation(&self) -> &str {
        &self.docs_pane
    }

    pub fn snapshot(&self) -> ViewerSnapshot<'_> {
        ViewerSnapshot {
            title: &self.title,
            description: &self.description,
            demo_link: &self.demo_link,
            content_path: &self.content_path,
            active_tab: self.active,
            code: &self.code_pane,
            documentation: &self.docs_pane,
            files: self.files.iter().collect(),
        }
    }
}

async fn fetch_file(source: &dyn ContentSource, content_path: &str, key: FileKey) -> Result<String> {
    let path = format!("{}/{}", content_path, key.file_name());
    let outcome = source.fetch_text(&path).await;
    if let Err(ref e) = outcome {
        warn!("{} fetch failed: {}", key.file_name(), e);
    }
    outcome
}

impl std::fmt::Debug for ProjectViewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectViewer")
            .field("reference", &self.reference)
            .field("active", &self.active)
            .field("renderer", &self.renderer.as_ref().map(|r| r.name()))
            .finish()
    }
}
