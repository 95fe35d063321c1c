// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Content sources: where project files are fetched from

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::ContentConfig;
use crate::{FolioError, Result};

/// A static file host holding project folders
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Name of this source
    fn name(&self) -> &'static str;

    /// Fail with `UnsupportedAccessMode` if this source cannot fetch at all
    fn check_access(&self) -> Result<()> {
        Ok(())
    }

    /// Resolve a content path to the location that will be read
    fn locate(&self, content_path: &str) -> Result<String>;

    /// Fetch a file as text. Non-success statuses are errors.
    async fn fetch_text(&self, path: &str) -> Result<String>;
}

/// Fetches over HTTP from a base URL
pub struct HttpSource {
    client: Client,
    origin: Url,
}

impl HttpSource {
    /// Create a new HTTP source rooted at `origin`
    pub fn new(origin: &str, timeout: Duration) -> Result<Self> {
        let mut origin = Url::parse(origin)?;

        // Relative joins replace the last segment unless the base ends in '/'
        if !origin.path().ends_with('/') {
            let path = format!("{}/", origin.path());
            origin.set_path(&path);
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, origin })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        Ok(self.origin.join(path)?)
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    fn name(&self) -> &'static str {
        "http"
    }

    fn check_access(&self) -> Result<()> {
        if self.origin.scheme() == "file" {
            return Err(FolioError::UnsupportedAccessMode(self.origin.to_string()));
        }
        Ok(())
    }

    fn locate(&self, content_path: &str) -> Result<String> {
        Ok(self.resolve(&format!("{}/", content_path))?.to_string())
    }

    async fn fetch_text(&self, path: &str) -> Result<String> {
        let url = self.resolve(path)?;
        debug!("Requesting: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FolioError::NotFound {
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Reads straight from a directory on disk, as a local static server would
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Map a URL-style path onto the root, refusing anything that escapes it
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let mut resolved = self.root.clone();

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let decoded = percent_decode_str(segment)
                .decode_utf8()
                .map_err(|e| FolioError::InvalidReference(format!("{}: {}", segment, e)))?;

            if decoded == "." || decoded == ".." || decoded.contains(['/', '\\']) {
                return Err(FolioError::InvalidReference(format!(
                    "refusing path segment '{}'",
                    decoded
                )));
            }
            resolved.push(decoded.as_ref());
        }

        Ok(resolved)
    }
}

#[async_trait]
impl ContentSource for DirSource {
    fn name(&self) -> &'static str {
        "directory"
    }

    fn locate(&self, content_path: &str) -> Result<String> {
        if !self.root.is_dir() {
            return Err(FolioError::FileSystem(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("content root {:?} is not a directory", self.root),
            )));
        }
        Ok(self.resolve(content_path)?.display().to_string())
    }

    async fn fetch_text(&self, path: &str) -> Result<String> {
        let file = self.resolve(path)?;
        debug!("Reading: {:?}", file);

        match tokio::fs::read_to_string(&file).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FolioError::NotFound { status: 404 })
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Build the content source described by configuration
pub fn from_config(config: &ContentConfig) -> Result<Arc<dyn ContentSource>> {
    match config.origin {
        Some(ref origin) => Ok(Arc::new(HttpSource::new(
            origin,
            Duration::from_secs(config.timeout_secs),
        )?)),
        None => Ok(Arc::new(DirSource::new(&config.root))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    fn write_project(root: &std::path::Path, folder: &str, files: &[(&str, &str)]) {
        let dir = root.join("smallprojects").join(folder);
        std::fs::create_dir_all(&dir).unwrap();
        for (name, text) in files {
            std::fs::write(dir.join(name), text).unwrap();
        }
    }

    async fn serve_dir(root: PathBuf) -> SocketAddr {
        let app = axum::Router::new().fallback_service(tower_http::services::ServeDir::new(root));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn test_http_source_fetches_and_reports_status() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path(), "snake game", &[("index.html", "<h1>Snake</h1>")]);
        let addr = serve_dir(dir.path().to_path_buf()).await;

        let source = HttpSource::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
        assert!(source.check_access().is_ok());

        let text = source.fetch_text("smallprojects/snake%20game/index.html").await.unwrap();
        assert_eq!(text, "<h1>Snake</h1>");

        let missing = source.fetch_text("smallprojects/snake%20game/README.md").await;
        match missing {
            Err(e @ FolioError::NotFound { status: 404 }) => assert_eq!(e.to_string(), "Status 404"),
            other => panic!("expected 404, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_source_transport_error() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpSource::new(&format!("http://{}/", addr), Duration::from_secs(2)).unwrap();
        let result = source.fetch_text("smallprojects/x/index.html").await;
        assert!(matches!(result, Err(FolioError::Http(_))));
    }

    #[test]
    fn test_http_source_joins_under_origin_path() {
        let source = HttpSource::new("https://example.org/portfolio", Duration::from_secs(1)).unwrap();
        assert_eq!(source.origin().as_str(), "https://example.org/portfolio/");
        assert_eq!(
            source.locate("smallprojects/react-demo").unwrap(),
            "https://example.org/portfolio/smallprojects/react-demo/"
        );
    }

    #[test]
    fn test_file_origin_is_unsupported() {
        let source = HttpSource::new("file:///home/me/site/", Duration::from_secs(1)).unwrap();
        assert!(matches!(
            source.check_access(),
            Err(FolioError::UnsupportedAccessMode(_))
        ));
    }

    #[tokio::test]
    async fn test_dir_source_reads_and_maps_missing_to_404() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path(), "clock", &[("style.css", "body {}")]);
        let source = DirSource::new(dir.path());

        assert_eq!(source.fetch_text("smallprojects/clock/style.css").await.unwrap(), "body {}");
        assert!(matches!(
            source.fetch_text("smallprojects/clock/script.js").await,
            Err(FolioError::NotFound { status: 404 })
        ));
    }

    #[tokio::test]
    async fn test_dir_source_refuses_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirSource::new(dir.path());

        for path in ["smallprojects/../secret.txt", "smallprojects/a%2F..%2F..%2Fetc/passwd"] {
            assert!(matches!(
                source.fetch_text(path).await,
                Err(FolioError::InvalidReference(_))
            ));
        }
    }

    #[test]
    fn test_dir_source_locate_requires_root() {
        let source = DirSource::new("/definitely/not/here");
        assert!(matches!(
            source.locate("smallprojects/x"),
            Err(FolioError::FileSystem(_))
        ));
    }
}
