//! Startup-built content store backing slug lookups

use anyhow::Result;
use std::collections::HashMap;
use thiserror::Error;

use super::{ContentLoader, Page, Post};
use crate::Penna;

/// Lookup failure for an unknown slug.
///
/// Deliberately carries no cause: a slug that never existed and a unit
/// that was excluded at load time look the same to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Page Not Found")]
pub struct NotFound;

/// Order posts for the index listing: newest first, pinned on top.
///
/// Two stable passes. The second pass only moves records across the
/// pinned boundary, so within each group the recency order from the
/// first pass is preserved.
pub fn sort_for_index(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.datetime.cmp(&a.datetime));
    posts.sort_by(|a, b| b.pinned.cmp(&a.pinned));
}

/// All loaded content, indexed by slug
pub struct ContentStore {
    posts: Vec<Post>,
    posts_by_slug: HashMap<String, usize>,
    pages: HashMap<String, Page>,
}

impl ContentStore {
    /// Load every post and page once and build the slug indexes
    pub fn load(site: &Penna) -> Result<Self> {
        let loader = ContentLoader::new(site);

        let mut posts = loader.load_posts()?;
        sort_for_index(&mut posts);

        let mut posts_by_slug = HashMap::new();
        for (i, post) in posts.iter().enumerate() {
            if posts_by_slug.insert(post.slug.clone(), i).is_some() {
                tracing::warn!("Duplicate post slug {:?}", post.slug);
            }
        }

        let mut pages = HashMap::new();
        for page in loader.load_pages()? {
            if let Some(old) = pages.insert(page.slug.clone(), page) {
                tracing::warn!("Duplicate page slug {:?}", old.slug);
            }
        }

        Ok(Self {
            posts,
            posts_by_slug,
            pages,
        })
    }

    /// Posts in index order (pinned first, then newest first)
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Fetch a single post by slug
    pub fn post(&self, slug: &str) -> Result<&Post, NotFound> {
        self.posts_by_slug
            .get(slug)
            .map(|&i| &self.posts[i])
            .ok_or(NotFound)
    }

    /// Fetch a single page by slug
    pub fn page(&self, slug: &str) -> Result<&Page, NotFound> {
        self.pages.get(slug).ok_or(NotFound)
    }

    /// Iterate all pages
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }
}
