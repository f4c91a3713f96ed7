//! Content loader - loads posts and pages from the content tree

use anyhow::{anyhow, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{frontmatter, MarkdownRenderer, Page, Post};
use crate::helpers;
use crate::Penna;

/// Loads posts and pages from the content directory.
///
/// Content units are directories holding one markdown file per locale:
/// `content/posts/<slug>/en.md`. Only the default-locale file is read.
pub struct ContentLoader<'a> {
    site: &'a Penna,
    renderer: MarkdownRenderer,
    locale_file: String,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Penna) -> Self {
        let renderer = MarkdownRenderer::with_theme(&site.config.highlight.theme);
        let locale_file = format!("{}.md", site.config.default_locale);
        Self {
            site,
            renderer,
            locale_file,
        }
    }

    /// Load all posts from content/posts.
    ///
    /// Units without a usable front-matter block are not part of the
    /// site and are excluded without an error. Files that cannot be
    /// read or rendered are logged at warn level and skipped.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let posts_dir = &self.site.posts_dir;
        if !posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(posts_dir)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && self.is_content_file(path) {
                match self.load_post(path) {
                    Ok(Some(post)) => posts.push(post),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(posts)
    }

    /// Load a single post.
    ///
    /// `Ok(None)` means the file has no front-matter block (or one
    /// that does not deserialize) and the unit should be left out.
    fn load_post(&self, path: &Path) -> Result<Option<Post>> {
        let raw = fs::read_to_string(path)?;
        let (fm, body) = frontmatter::extract(&raw);

        let Some(fm) = fm else {
            tracing::debug!("No usable front matter in {:?}, excluding", path);
            return Ok(None);
        };

        let slug = slug_from_path(path)?;
        let datetime = helpers::parse_datetime(&fm.datetime)?;
        let date = helpers::display_date(&datetime, &self.site.config.default_locale);
        let content = self.renderer.render(body)?;

        Ok(Some(Post {
            title: fm.title,
            datetime,
            date,
            description: fm.description,
            slug,
            tags: fm.tags,
            materials: fm.materials,
            pinned: fm.pinned,
            source: path.to_path_buf(),
            content,
        }))
    }

    /// Load all pages from content/pages
    pub fn load_pages(&self) -> Result<Vec<Page>> {
        let pages_dir = &self.site.pages_dir;
        if !pages_dir.exists() {
            return Ok(Vec::new());
        }

        let mut pages = Vec::new();

        for entry in WalkDir::new(pages_dir)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && self.is_content_file(path) {
                match self.load_page(path) {
                    Ok(page) => pages.push(page),
                    Err(e) => {
                        tracing::warn!("Failed to load page {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(pages)
    }

    /// Load a single page.
    ///
    /// Pages carry no metadata of their own; a front-matter block, if
    /// present, is stripped and ignored.
    fn load_page(&self, path: &Path) -> Result<Page> {
        let raw = fs::read_to_string(path)?;
        let (_, body) = frontmatter::extract(&raw);

        let slug = slug_from_path(path)?;
        let content = self.renderer.render(body)?;

        Ok(Page {
            slug,
            source: path.to_path_buf(),
            content,
        })
    }

    /// True for the default-locale markdown file of a content unit
    fn is_content_file(&self, path: &Path) -> bool {
        path.file_name().and_then(|n| n.to_str()) == Some(self.locale_file.as_str())
    }
}

/// Derive the slug from the unit's directory name, minus any extension.
fn slug_from_path(path: &Path) -> Result<String> {
    path.parent()
        .and_then(|dir| dir.file_stem())
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow!("cannot derive slug from path {:?}", path))
}
