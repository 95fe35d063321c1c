// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! The four known project files and their load state

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::{FolioError, Result};

/// Logical file keys. Fixed by the viewer, never discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKey {
    Html,
    Css,
    Js,
    Readme,
}

impl FileKey {
    pub const ALL: [FileKey; 4] = [FileKey::Html, FileKey::Css, FileKey::Js, FileKey::Readme];

    /// File name under the project's content path
    pub fn file_name(self) -> &'static str {
        match self {
            FileKey::Html => "index.html",
            FileKey::Css => "style.css",
            FileKey::Js => "script.js",
            FileKey::Readme => "README.md",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileKey::Html => "html",
            FileKey::Css => "css",
            FileKey::Js => "js",
            FileKey::Readme => "readme",
        }
    }

    /// Text shown while the fetch is in flight
    pub fn loading_text(self) -> &'static str {
        match self {
            FileKey::Html => "Loading...",
            FileKey::Css => "/* Loading... */",
            FileKey::Js => "// Loading...",
            FileKey::Readme => "Loading README...",
        }
    }

    /// Text substituted when the fetch fails
    pub fn fallback_text(self) -> &'static str {
        match self {
            FileKey::Html => "<!-- index.html not found -->",
            FileKey::Css => "/* style.css not found or inline styles used */",
            FileKey::Js => "// script.js not found or inline scripts used",
            FileKey::Readme => "No README.md found or could not be loaded.",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code views the user can switch between. README is never a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Html,
    Css,
    Js,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Html, Tab::Css, Tab::Js];

    pub fn key(self) -> FileKey {
        match self {
            Tab::Html => FileKey::Html,
            Tab::Css => FileKey::Css,
            Tab::Js => FileKey::Js,
        }
    }

    pub fn from_key(key: FileKey) -> Option<Tab> {
        match key {
            FileKey::Html => Some(Tab::Html),
            FileKey::Css => Some(Tab::Css),
            FileKey::Js => Some(Tab::Js),
            FileKey::Readme => None,
        }
    }

    /// Label on the tab control
    pub fn label(self) -> &'static str {
        match self {
            Tab::Html => "HTML",
            Tab::Css => "CSS",
            Tab::Js => "JS",
        }
    }

    pub fn as_str(self) -> &'static str {
        self.key().as_str()
    }
}

impl FromStr for Tab {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "html" => Ok(Tab::Html),
            "css" => Ok(Tab::Css),
            "js" => Ok(Tab::Js),
            other => Err(FolioError::InvalidReference(format!("unknown tab '{}'", other))),
        }
    }
}

/// Load state of one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FileState {
    Loading,
    Loaded,
    NotFound { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    #[serde(flatten)]
    pub state: FileState,
    pub content: String,
}

/// Content for every `FileKey`. Always complete: placeholder, fallback or real.
#[derive(Debug, Clone)]
pub struct FileSet {
    entries: [FileEntry; 4],
}

impl FileSet {
    /// All four keys in `Loading` with their placeholder text
    pub fn loading() -> Self {
        Self {
            entries: FileKey::ALL.map(|key| FileEntry {
                state: FileState::Loading,
                content: key.loading_text().to_string(),
            }),
        }
    }

    pub fn entry(&self, key: FileKey) -> &FileEntry {
        &self.entries[key.index()]
    }

    pub fn content(&self, key: FileKey) -> &str {
        &self.entry(key).content
    }

    pub fn state(&self, key: FileKey) -> &FileState {
        &self.entry(key).state
    }

    /// Record the outcome of fetching `key`. Fetched text is stored verbatim.
    pub fn record(&mut self, key: FileKey, outcome: &Result<String>) {
        self.entries[key.index()] = match outcome {
            Ok(text) => FileEntry {
                state: FileState::Loaded,
                content: text.clone(),
            },
            Err(e) => FileEntry {
                state: FileState::NotFound { reason: e.to_string() },
                content: key.fallback_text().to_string(),
            },
        };
    }

    pub fn iter(&self) -> impl Iterator<Item = (FileKey, &FileEntry)> {
        FileKey::ALL.into_iter().zip(self.entries.iter())
    }
}

impl Default for FileSet {
    fn default() -> Self {
        Self::loading()
    }
}
