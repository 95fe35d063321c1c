// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Folio: Portfolio Project Viewer
//!
//! Loads a sub-project's `index.html`, `style.css`, `script.js` and
//! `README.md` from a static content host and presents them as a tabbed code
//! viewer with rendered documentation, tolerating any subset being missing.

pub mod assets;
pub mod config;
pub mod error;
pub mod markdown;
pub mod project;
pub mod source;
pub mod viewer;
pub mod web;

pub use config::AppConfig;
pub use error::{FolioError, Result};
pub use project::ProjectReference;
pub use viewer::{FileKey, ProjectViewer, Tab};
