// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Error types for Folio

use thiserror::Error;

/// Result type alias for Folio operations
pub type Result<T> = std::result::Result<T, FolioError>;

/// Folio error types
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The content host answered, but not with a success status
    #[error("Status {status}")]
    NotFound { status: u16 },

    /// Content origin cannot be fetched from (local `file:` scheme)
    #[error("Unsupported access mode: {0}")]
    UnsupportedAccessMode(String),

    #[error("Invalid project reference: {0}")]
    InvalidReference(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Server error: {0}")]
    Server(String),
}
