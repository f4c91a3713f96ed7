//! Generator module - renders the static site from the content store

mod feed;

use anyhow::Result;
use std::fs;
use tera::Context;

use crate::content::ContentStore;
use crate::helpers::url_for;
use crate::templates::{TemplateRenderer, STYLESHEET};
use crate::Penna;

/// Static site generator using Tera templates
pub struct Generator {
    site: Penna,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Penna) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        Ok(Self {
            site: site.clone(),
            renderer,
        })
    }

    /// Generate the entire site from the loaded store
    pub fn generate(&self, store: &ContentStore) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)?;

        self.write_stylesheet()?;
        self.generate_index(store)?;
        self.generate_post_pages(store)?;
        self.generate_page_pages(store)?;
        self.generate_not_found()?;
        feed::generate(&self.site, store.posts())?;

        Ok(())
    }

    /// Base context shared by every route
    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site.config);
        // Normalized to always end with a slash
        context.insert("root", &url_for(&self.site.config, ""));
        context
    }

    /// Render the front page: the `home` page's content, if that page
    /// exists, followed by the post listing in index order.
    fn generate_index(&self, store: &ContentStore) -> Result<()> {
        let mut context = self.base_context();
        context.insert("posts", store.posts());
        context.insert("home", &store.page("home").ok());

        let html = self.renderer.render("index.html", &context)?;

        let output_path = self.site.public_dir.join("index.html");
        fs::write(&output_path, html)?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(())
    }

    /// Render one posts/<slug>/index.html per post route
    fn generate_post_pages(&self, store: &ContentStore) -> Result<()> {
        let routes: Vec<String> = store.posts().iter().map(|p| p.slug.clone()).collect();

        for slug in &routes {
            let post = store.post(slug)?;

            let mut context = self.base_context();
            context.insert("post", post);

            let html = self.renderer.render("post.html", &context)?;

            let output_path = self
                .site
                .public_dir
                .join(post.permalink())
                .join("index.html");
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_path, html)?;
            tracing::debug!("Generated post: {:?}", output_path);
        }

        Ok(())
    }

    /// Render one <slug>/index.html per standalone page
    fn generate_page_pages(&self, store: &ContentStore) -> Result<()> {
        let mut routes: Vec<String> = store.pages().map(|p| p.slug.clone()).collect();
        routes.sort();

        for slug in &routes {
            let page = store.page(slug)?;

            let mut context = self.base_context();
            context.insert("page", page);

            let html = self.renderer.render("page.html", &context)?;

            let output_path = self
                .site
                .public_dir
                .join(page.permalink())
                .join("index.html");
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_path, html)?;
            tracing::debug!("Generated page: {:?}", output_path);
        }

        Ok(())
    }

    /// Render the fallback document served for unknown routes
    fn generate_not_found(&self) -> Result<()> {
        let context = self.base_context();
        let html = self.renderer.render("404.html", &context)?;

        let output_path = self.site.public_dir.join("404.html");
        fs::write(&output_path, html)?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(())
    }

    fn write_stylesheet(&self) -> Result<()> {
        let css_dir = self.site.public_dir.join("css");
        fs::create_dir_all(&css_dir)?;
        fs::write(css_dir.join("style.css"), STYLESHEET)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_unit(root: &Path, kind: &str, slug: &str, body: &str) {
        let dir = root.join("content").join(kind).join(slug);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("en.md"), body).unwrap();
    }

    fn generate_site(root: &Path) -> Penna {
        let site = Penna::new(root).unwrap();
        let store = ContentStore::load(&site).unwrap();
        Generator::new(&site).unwrap().generate(&store).unwrap();
        site
    }

    #[test]
    fn test_generate_full_site() {
        let tmp = TempDir::new().unwrap();
        write_unit(
            tmp.path(),
            "posts",
            "varnish",
            "---\ntitle: Varnish\ndatetime: 2024-02-01\n---\n\nWait a year.",
        );
        write_unit(
            tmp.path(),
            "posts",
            "pinned-intro",
            "---\ntitle: Intro\ndatetime: 2023-01-01\npinned: true\n---\n\nStart here.",
        );
        write_unit(tmp.path(), "pages", "home", "Welcome to the atelier.");
        write_unit(tmp.path(), "pages", "imprint", "Legal text.");

        let site = generate_site(tmp.path());

        assert!(site.public_dir.join("index.html").exists());
        assert!(site.public_dir.join("posts/varnish/index.html").exists());
        assert!(site
            .public_dir
            .join("posts/pinned-intro/index.html")
            .exists());
        assert!(site.public_dir.join("home/index.html").exists());
        assert!(site.public_dir.join("imprint/index.html").exists());
        assert!(site.public_dir.join("404.html").exists());
        assert!(site.public_dir.join("atom.xml").exists());
        assert!(site.public_dir.join("css/style.css").exists());
    }

    #[test]
    fn test_index_embeds_home_and_orders_posts() {
        let tmp = TempDir::new().unwrap();
        write_unit(
            tmp.path(),
            "posts",
            "newest",
            "---\ntitle: Newest\ndatetime: 2024-02-01\n---\n\nbody",
        );
        write_unit(
            tmp.path(),
            "posts",
            "pinned-old",
            "---\ntitle: Pinned Old\ndatetime: 2023-01-01\npinned: true\n---\n\nbody",
        );
        write_unit(tmp.path(), "pages", "home", "Welcome to the atelier.");

        let site = generate_site(tmp.path());

        let index = fs::read_to_string(site.public_dir.join("index.html")).unwrap();
        assert!(index.contains("Welcome to the atelier."));

        // Pinned post is listed before the newer unpinned one
        let pinned_at = index.find("/posts/pinned-old/").unwrap();
        let newest_at = index.find("/posts/newest/").unwrap();
        assert!(pinned_at < newest_at);

        // Home content sits above the listing
        let home_at = index.find("Welcome to the atelier.").unwrap();
        assert!(home_at < pinned_at);
    }

    #[test]
    fn test_post_page_contains_rendered_body() {
        let tmp = TempDir::new().unwrap();
        write_unit(
            tmp.path(),
            "posts",
            "brush-care",
            "---\ntitle: Brush Care\ndatetime: 2024-01-15T09:30:00Z\n---\n\nRinse *well*.",
        );

        let site = generate_site(tmp.path());

        let html =
            fs::read_to_string(site.public_dir.join("posts/brush-care/index.html")).unwrap();
        assert!(html.contains("Brush Care"));
        assert!(html.contains("<em>well</em>"));
        assert!(html.contains("Jan 15, 2024"));
    }

    #[test]
    fn test_generate_empty_site() {
        let tmp = TempDir::new().unwrap();
        let site = generate_site(tmp.path());

        assert!(site.public_dir.join("index.html").exists());
        assert!(site.public_dir.join("404.html").exists());

        let not_found = fs::read_to_string(site.public_dir.join("404.html")).unwrap();
        assert!(not_found.contains("Page Not Found"));
    }
}
