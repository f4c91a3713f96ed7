//! Markdown rendering with syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Markdown renderer with syntax highlighting and heading anchors
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl MarkdownRenderer {
    /// Create a renderer using the given syntect theme.
    pub fn with_theme(theme: &str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
        }
    }

    /// Render markdown to HTML.
    ///
    /// Fenced code blocks are replaced with syntect-highlighted HTML;
    /// headings without an explicit id get one slugified from their
    /// text, deduplicated with `-1`, `-2` suffixes, plus a `#` link
    /// pointing at the heading itself. Paragraphs holding nothing but
    /// images lose their wrapper so images are not styled as body text.
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_lang: Option<String> = None;
        let mut code_buf = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_buf.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    let highlighted = self.highlight_code(&code_buf, code_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    code_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_buf.push_str(&text);
                }
                other => events.push(other),
            }
        }

        assign_heading_ids(&mut events);
        let events = append_heading_anchors(events);
        let events = unwrap_image_paragraphs(events);

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        Ok(html_output)
    }

    /// Highlight a code block, falling back to an escaped plain block
    /// when no theme is available or highlighting fails.
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let Some(theme) = theme else {
            return plain_code_block(code, lang);
        };

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => highlighted,
            Err(_) => plain_code_block(code, lang),
        }
    }
}

fn plain_code_block(code: &str, lang: &str) -> String {
    format!(
        r#"<pre><code class="language-{}">{}</code></pre>"#,
        lang,
        html_escape(code)
    )
}

/// Give every heading without an explicit id a slug derived from its
/// text, so section links survive rebuilds.
fn assign_heading_ids(events: &mut [Event]) {
    let mut seen: HashMap<String, usize> = HashMap::new();

    let mut i = 0;
    while i < events.len() {
        let needs_id = matches!(&events[i], Event::Start(Tag::Heading { id: None, .. }));
        if needs_id {
            let mut text = String::new();
            for event in events[i + 1..].iter() {
                match event {
                    Event::End(TagEnd::Heading(_)) => break,
                    Event::Text(t) | Event::Code(t) => text.push_str(t),
                    _ => {}
                }
            }

            let base = slug::slugify(&text);
            if !base.is_empty() {
                let n = seen.entry(base.clone()).or_insert(0);
                let anchor = if *n == 0 {
                    base.clone()
                } else {
                    format!("{}-{}", base, n)
                };
                *n += 1;

                if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                    *id = Some(CowStr::from(anchor));
                }
            }
        }
        i += 1;
    }
}

/// Append a `#` link inside each id-carrying heading so readers can
/// grab a direct link to the section.
fn append_heading_anchors(events: Vec<Event>) -> Vec<Event> {
    let mut out: Vec<Event> = Vec::with_capacity(events.len());
    let mut pending_anchor: Option<String> = None;

    for event in events {
        match &event {
            Event::Start(Tag::Heading { id: Some(id), .. }) => {
                pending_anchor = Some(id.to_string());
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(id) = pending_anchor.take() {
                    out.push(Event::Html(CowStr::from(format!(
                        r##"<a class="heading-anchor" href="#{}">#</a>"##,
                        id
                    ))));
                }
            }
            _ => {}
        }
        out.push(event);
    }

    out
}

/// Drop the paragraph wrapper around paragraphs holding only images.
fn unwrap_image_paragraphs(events: Vec<Event>) -> Vec<Event> {
    let mut out: Vec<Event> = Vec::with_capacity(events.len());
    let mut i = 0;

    while i < events.len() {
        if matches!(events[i], Event::Start(Tag::Paragraph)) {
            if let Some(end) = image_only_paragraph_end(&events[i..]) {
                out.extend_from_slice(&events[i + 1..i + end]);
                i += end + 1;
                continue;
            }
        }
        out.push(events[i].clone());
        i += 1;
    }

    out
}

/// Offset of the paragraph's end tag, when the slice opens with a
/// paragraph holding nothing but images and line breaks.
fn image_only_paragraph_end(events: &[Event]) -> Option<usize> {
    let mut in_image = false;
    let mut saw_image = false;

    for (offset, event) in events.iter().enumerate().skip(1) {
        match event {
            Event::Start(Tag::Image { .. }) => {
                in_image = true;
                saw_image = true;
            }
            Event::End(TagEnd::Image) => in_image = false,
            Event::End(TagEnd::Paragraph) if !in_image => {
                return saw_image.then_some(offset);
            }
            Event::SoftBreak | Event::HardBreak if !in_image => {}
            // Alt text and formatting inside the image span
            _ if in_image => {}
            _ => return None,
        }
    }

    None
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> MarkdownRenderer {
        MarkdownRenderer::with_theme("base16-ocean.dark")
    }

    #[test]
    fn test_render_basic_markdown() {
        let html = renderer()
            .render("# Hello World\n\nThis is a test.")
            .unwrap();
        assert!(html.contains("Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block_is_highlighted() {
        let html = renderer().render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains("<pre"));
        assert!(html.contains("style="));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_headings_get_slug_ids() {
        let html = renderer().render("## Brush Care Basics").unwrap();
        assert!(html.contains(r#"<h2 id="brush-care-basics">"#));
    }

    #[test]
    fn test_headings_get_anchor_links() {
        let html = renderer().render("## Brush Care Basics").unwrap();
        assert!(html.contains(r##"<a class="heading-anchor" href="#brush-care-basics">#</a>"##));
        // The link sits inside the heading element
        assert!(html.contains("#</a></h2>"));
    }

    #[test]
    fn test_duplicate_headings_deduplicated() {
        let html = renderer().render("## Notes\n\ntext\n\n## Notes").unwrap();
        assert!(html.contains(r#"id="notes""#));
        assert!(html.contains(r#"id="notes-1""#));
    }

    #[test]
    fn test_explicit_heading_id_kept() {
        let html = renderer().render("## Notes { #custom }").unwrap();
        assert!(html.contains(r#"id="custom""#));
        assert!(!html.contains(r#"id="notes""#));
    }

    #[test]
    fn test_render_table() {
        let html = renderer()
            .render("| a | b |\n|---|---|\n| 1 | 2 |")
            .unwrap();
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_standalone_image_loses_paragraph_wrapper() {
        let html = renderer()
            .render("Some text.\n\n![studio desk](desk.png)\n\nMore text.")
            .unwrap();
        assert!(html.contains(r#"<img src="desk.png" alt="studio desk""#));
        assert!(!html.contains("<p><img"));
        assert!(html.contains("<p>Some text.</p>"));
    }

    #[test]
    fn test_inline_image_keeps_paragraph_wrapper() {
        let html = renderer()
            .render("The desk: ![studio desk](desk.png) as of today.")
            .unwrap();
        assert!(html.contains("<p>The desk: <img"));
    }
}
