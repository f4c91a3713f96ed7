//! Post and page records produced by the content loader

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::path::PathBuf;

/// A fully loaded blog post, ready for sorting and rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub title: String,
    /// Parsed publication instant, used for ordering and the feed.
    pub datetime: DateTime<FixedOffset>,
    /// Display date in the site locale, e.g. "Jan 15, 2024".
    pub date: String,
    pub description: Option<String>,
    pub slug: String,
    pub tags: Vec<String>,
    pub materials: Vec<String>,
    pub pinned: bool,
    /// Markdown file this post was loaded from.
    #[serde(skip)]
    pub source: PathBuf,
    /// Rendered HTML body.
    pub content: String,
}

impl Post {
    /// Site-relative permalink, e.g. `posts/brush-care/`.
    pub fn permalink(&self) -> String {
        format!("posts/{}/", self.slug)
    }
}

/// A standalone page such as `imprint` or `home`.
///
/// Pages carry no metadata of their own beyond the slug; any
/// front-matter block in the source file is stripped and ignored.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub slug: String,
    #[serde(skip)]
    pub source: PathBuf,
    /// Rendered HTML body.
    pub content: String,
}

impl Page {
    /// Site-relative permalink, e.g. `imprint/`.
    pub fn permalink(&self) -> String {
        format!("{}/", self.slug)
    }
}
