//! Create a new post or page

use anyhow::Result;
use std::fs;

use crate::Penna;

/// Create a new content unit under content/posts (or content/pages).
///
/// The slug comes from the title; the unit gets one markdown file
/// named after the default locale, with post front-matter pre-filled.
pub fn run(site: &Penna, title: &str, page: bool) -> Result<()> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}", title);
    }

    let parent = if page {
        &site.pages_dir
    } else {
        &site.posts_dir
    };
    let unit_dir = parent.join(&slug);
    let file_path = unit_dir.join(format!("{}.md", site.config.default_locale));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::create_dir_all(&unit_dir)?;

    let content = if page {
        format!("# {}\n", title)
    } else {
        let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        format!(
            "---\ntitle: {}\ndatetime: {}\ntags: []\nmaterials: []\npinned: false\n---\n\n",
            title, now
        )
    };

    fs::write(&file_path, content)?;
    println!("Created: {:?}", file_path);

    Ok(())
}
