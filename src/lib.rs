//! penna: a minimal static blog generator
//!
//! Loads markdown posts and pages from a content tree, renders them
//! through Tera templates into a fully static site with an Atom feed,
//! and converts source images to WebP at build time.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod images;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main Penna application
#[derive(Clone)]
pub struct Penna {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content directory
    pub content_dir: std::path::PathBuf,
    /// Posts directory (content/posts)
    pub posts_dir: std::path::PathBuf,
    /// Pages directory (content/pages)
    pub pages_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Penna {
    /// Create a new Penna instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        }
        .with_env_overrides();

        let content_dir = base_dir.join(&config.content_dir);
        let posts_dir = content_dir.join("posts");
        let pages_dir = content_dir.join("pages");
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            posts_dir,
            pages_dir,
            public_dir,
        })
    }

    /// Initialize a new site
    pub fn init(&self) -> Result<()> {
        commands::init::run(self)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Convert and mirror images into the public tree
    pub fn process_images(&self) -> Result<()> {
        commands::images::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post (or page) skeleton
    pub fn new_content(&self, title: &str, page: bool) -> Result<()> {
        commands::new::run(self, title, page)
    }
}
