//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub description: String,
    pub default_locale: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Rendering
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Image pipeline
    #[serde(default)]
    pub images: ImagesConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Penna".to_string(),
            author: String::new(),
            description: String::new(),
            default_locale: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),

            highlight: HighlightConfig::default(),
            images: ImagesConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply environment overrides.
    ///
    /// `BASE_PATH` replaces the configured URL root, so the same site
    /// can be deployed under a sub-path (e.g. project pages) without
    /// editing `_config.yml`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base) = std::env::var("BASE_PATH") {
            let trimmed = base.trim_matches('/');
            self.root = if trimmed.is_empty() {
                "/".to_string()
            } else {
                format!("/{}", trimmed)
            };
        }
        self
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

/// Image pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Directory walked for images, relative to the site base.
    pub source_dir: String,
    /// Directory the mirrored tree is written to, relative to the site base.
    pub target_dir: String,
    /// Lossy WebP quality (0-100).
    pub quality: u8,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            source_dir: "content".to_string(),
            target_dir: "public/images".to_string(),
            quality: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Penna");
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.root, "/");
        assert_eq!(config.images.quality, 60);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Atelier Notes
author: Mara
url: https://atelier.example
default_locale: de
images:
  quality: 75
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Atelier Notes");
        assert_eq!(config.author, "Mara");
        assert_eq!(config.default_locale, "de");
        assert_eq!(config.images.quality, 75);
        // Untouched sections keep their defaults
        assert_eq!(config.images.target_dir, "public/images");
        assert_eq!(config.content_dir, "content");
    }

    #[test]
    fn test_partial_images_section() {
        let yaml = "images:\n  source_dir: assets\n";
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.images.source_dir, "assets");
        assert_eq!(config.images.quality, 60);
    }
}
