//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded directly in the binary, so a site
//! checkout needs no theme directory.

use anyhow::Result;
use tera::{Context, Tera};

/// Stylesheet shipped alongside the built-in templates
pub const STYLESHEET: &str = include_str!("builtin/style.css");

/// Template renderer with the embedded built-in templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Post and page bodies arrive as already-rendered HTML
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("builtin/layout.html")),
            ("index.html", include_str!("builtin/index.html")),
            ("post.html", include_str!("builtin/post.html")),
            ("page.html", include_str!("builtin/page.html")),
            ("404.html", include_str!("builtin/404.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with the given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}
