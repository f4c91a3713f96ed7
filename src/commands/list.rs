//! List site content

use anyhow::Result;

use crate::content::{sort_for_index, ContentLoader};
use crate::Penna;

/// List site content by type
pub fn run(site: &Penna, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(site);

    match content_type {
        "post" | "posts" => {
            let mut posts = loader.load_posts()?;
            sort_for_index(&mut posts);
            println!("Posts ({}):", posts.len());
            for post in posts {
                let marker = if post.pinned { " [pinned]" } else { "" };
                println!("  {} - {}{}", post.date, post.title, marker);
            }
        }
        "page" | "pages" => {
            let pages = loader.load_pages()?;
            println!("Pages ({}):", pages.len());
            for page in pages {
                println!("  {} [{}]", page.slug, page.source.display());
            }
        }
        "tag" | "tags" => {
            let posts = loader.load_posts()?;
            let mut tags: std::collections::HashMap<String, usize> =
                std::collections::HashMap::new();
            for post in &posts {
                for tag in &post.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, page, tag", content_type);
        }
    }

    Ok(())
}
