// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Project references derived from page query parameters

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::{FolioError, Result};

/// Characters left untouched by `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Which sub-project to show, and under what label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectReference {
    folder: String,
    title: Option<String>,
}

impl ProjectReference {
    /// Build a reference from an already-decoded folder name and optional title
    pub fn new(folder: impl Into<String>, title: Option<String>) -> Result<Self> {
        let folder = folder.into();
        match folder.as_str() {
            "" => Err(FolioError::InvalidReference(
                "missing 'project' parameter".to_string(),
            )),
            "." | ".." => Err(FolioError::InvalidReference(format!(
                "'{}' is not a project folder",
                folder
            ))),
            _ => Ok(Self {
                folder,
                title: title.filter(|t| !t.is_empty()),
            }),
        }
    }

    /// Parse a query string such as `?project=snake-game&title=Snake`
    pub fn from_query(query: &str) -> Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut folder = None;
        let mut title = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "project" if folder.is_none() => folder = Some(value.into_owned()),
                "title" if title.is_none() => title = Some(value.into_owned()),
                _ => {}
            }
        }

        Self::new(folder.unwrap_or_default(), title)
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Title to show in the header, falling back to `default`
    pub fn display_title<'a>(&'a self, default: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(default)
    }

    /// Subtitle naming the folder being viewed
    pub fn description(&self) -> String {
        format!("Viewing source for {}", self.folder)
    }

    /// `<base_dir>/<encoded folder>`
    pub fn content_path(&self, base_dir: &str) -> String {
        format!(
            "{}/{}",
            base_dir.trim_end_matches('/'),
            utf8_percent_encode(&self.folder, COMPONENT)
        )
    }

    /// Link to the project's live demo. Not checked for existence.
    pub fn demo_link(&self, base_dir: &str) -> String {
        format!("{}/index.html", self.content_path(base_dir))
    }
}
