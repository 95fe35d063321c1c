// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Configuration management for Folio

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    /// Where project content is fetched from
    #[serde(default)]
    pub content: ContentConfig,

    /// Project viewer behaviour
    #[serde(default)]
    pub viewer: ViewerConfig,

    /// Web UI settings
    #[serde(default)]
    pub web: WebConfig,

    /// Image optimisation jobs
    #[serde(default)]
    pub assets: AssetConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ContentConfig {
    /// Base URL of a static host serving the content. When unset, files are
    /// read from `root` on disk.
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default = "default_root")]
    pub root: String,
    #[serde(default = "default_base_dir")]
    pub base_dir: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ViewerConfig {
    #[serde(default = "default_title")]
    pub default_title: String,
    /// Render READMEs as markdown. When false, READMEs are shown raw.
    #[serde(default = "default_true")]
    pub render_markdown: bool,
    /// Let raw HTML in READMEs through to the page. Off: it is shown escaped.
    #[serde(default)]
    pub allow_raw_html: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WebConfig {
    #[serde(default = "default_web_host")]
    pub host: String,
    #[serde(default = "default_web_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AssetConfig {
    #[serde(default = "default_assets_dir")]
    pub dir: String,
    /// WebP quality (0-100) for jobs without their own
    #[serde(default = "default_asset_quality")]
    pub quality: f32,
    #[serde(default = "default_asset_jobs")]
    pub jobs: Vec<AssetJob>,
}

/// A single image to convert to WebP
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AssetJob {
    pub file: String,
    #[serde(default)]
    pub max_width: Option<u32>,
    #[serde(default)]
    pub quality: Option<f32>,
}

impl AssetJob {
    pub fn quality_or(&self, default: f32) -> f32 {
        self.quality.unwrap_or(default)
    }
}

// Default value functions
fn default_root() -> String { ".".to_string() }
fn default_base_dir() -> String { "smallprojects".to_string() }
fn default_timeout() -> u64 { 30 }
fn default_title() -> String { "Project Details".to_string() }
fn default_true() -> bool { true }
fn default_web_host() -> String { "127.0.0.1".to_string() }
fn default_web_port() -> u16 { 8080 }
fn default_assets_dir() -> String { "assets".to_string() }
fn default_asset_quality() -> f32 { 80.0 }

fn default_asset_jobs() -> Vec<AssetJob> {
    [
        ("avatar.jpeg", 500, Some(75.0)),
        ("StuConnect.png", 800, None),
        ("Rgitx.png", 800, None),
        ("glassy-home.png", 800, None),
    ]
    .into_iter()
    .map(|(file, width, quality)| AssetJob {
        file: file.to_string(),
        max_width: Some(width),
        quality,
    })
    .collect()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            origin: None,
            root: default_root(),
            base_dir: default_base_dir(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            default_title: default_title(),
            render_markdown: true,
            allow_raw_html: false,
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            dir: default_assets_dir(),
            quality: default_asset_quality(),
            jobs: default_asset_jobs(),
        }
    }
}

impl ContentConfig {
    /// Directory on disk holding the project folders
    pub fn projects_dir(&self) -> PathBuf {
        Path::new(&self.root).join(&self.base_dir)
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| crate::FolioError::Config(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings that would make every page fail
    pub fn validate(&self) -> crate::Result<()> {
        let base = self.content.base_dir.trim_matches('/');
        if base.is_empty() || base.split('/').any(|s| s == "..") {
            return Err(crate::FolioError::Config(format!(
                "content.base_dir must be a relative directory, got '{}'",
                self.content.base_dir
            )));
        }
        if let Some(ref origin) = self.content.origin {
            url::Url::parse(origin)?;
        }
        let qualities = std::iter::once(self.assets.quality)
            .chain(self.assets.jobs.iter().filter_map(|job| job.quality));
        for quality in qualities {
            if !(0.0..=100.0).contains(&quality) {
                return Err(crate::FolioError::Config(format!(
                    "asset quality must be between 0 and 100, got {}",
                    quality
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"web": {"port": 9000}}"#).unwrap();
        assert_eq!(config.web.port, 9000);
        assert_eq!(config.web.host, "127.0.0.1");
        assert_eq!(config.content.base_dir, "smallprojects");
        assert_eq!(config.viewer.default_title, "Project Details");
        assert_eq!(config.assets.jobs.len(), 4);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("nope.json")).unwrap();
        assert!(config.content.origin.is_none());
        assert!(config.viewer.render_markdown);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.json");

        let mut config = AppConfig::default();
        config.content.origin = Some("http://localhost:5500/".to_string());
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.content.origin.as_deref(), Some("http://localhost:5500/"));
    }

    #[test]
    fn test_validate_rejects_escaping_base_dir() {
        let mut config = AppConfig::default();
        config.content.base_dir = "../elsewhere".to_string();
        assert!(config.validate().is_err());

        config.content.base_dir = "/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_origin() {
        let mut config = AppConfig::default();
        config.content.origin = Some("not a url".to_string());
        assert!(matches!(config.validate(), Err(crate::FolioError::Url(_))));
    }

    #[test]
    fn test_asset_quality_defaults_and_overrides() {
        let config = AppConfig::default();
        assert_eq!(config.assets.quality, 80.0);
        let avatar = &config.assets.jobs[0];
        assert_eq!(avatar.file, "avatar.jpeg");
        assert_eq!(avatar.quality_or(config.assets.quality), 75.0);
        assert_eq!(config.assets.jobs[1].quality_or(config.assets.quality), 80.0);

        let config: AppConfig = serde_json::from_str(
            r#"{"assets": {"quality": 60, "jobs": [{"file": "a.png", "max_width": 100}]}}"#,
        )
        .unwrap();
        assert_eq!(config.assets.quality, 60.0);
        assert_eq!(config.assets.jobs[0].quality, None);
    }

    #[test]
    fn test_validate_rejects_out_of_range_quality() {
        let mut config = AppConfig::default();
        config.assets.jobs[2].quality = Some(120.0);
        assert!(matches!(config.validate(), Err(crate::FolioError::Config(_))));

        config.assets.jobs[2].quality = None;
        config.assets.quality = -1.0;
        assert!(config.validate().is_err());
    }
}
