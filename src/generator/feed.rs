//! Atom feed generation

use anyhow::Result;
use std::fs;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::full_url_for;
use crate::Penna;

/// How many of the newest posts the feed carries
const FEED_LIMIT: usize = 20;

/// Write public/atom.xml
pub fn generate(site: &Penna, posts: &[Post]) -> Result<()> {
    let feed = render(&site.config, posts);

    let output_path = site.public_dir.join("atom.xml");
    fs::write(&output_path, feed)?;
    tracing::info!("Generated atom.xml");

    Ok(())
}

fn render(config: &SiteConfig, posts: &[Post]) -> String {
    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    feed.push('\n');
    feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
    feed.push('\n');
    feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
    feed.push_str(&format!(
        "  <link href=\"{}\" rel=\"self\"/>\n",
        full_url_for(config, "atom.xml")
    ));
    feed.push_str(&format!("  <link href=\"{}\"/>\n", full_url_for(config, "")));

    // The feed timestamp follows the newest post so repeated builds of
    // unchanged content stay byte-identical
    let updated = posts
        .iter()
        .map(|p| p.datetime)
        .max()
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());
    feed.push_str(&format!("  <updated>{}</updated>\n", updated));

    feed.push_str(&format!("  <id>{}</id>\n", full_url_for(config, "")));
    feed.push_str(&format!(
        "  <author><name>{}</name></author>\n",
        escape_xml(&config.author)
    ));

    for post in posts.iter().take(FEED_LIMIT) {
        let link = full_url_for(config, &post.permalink());
        feed.push_str("  <entry>\n");
        feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
        feed.push_str(&format!("    <link href=\"{}\"/>\n", link));
        feed.push_str(&format!("    <id>{}</id>\n", link));
        feed.push_str(&format!(
            "    <published>{}</published>\n",
            post.datetime.to_rfc3339()
        ));
        feed.push_str(&format!(
            "    <updated>{}</updated>\n",
            post.datetime.to_rfc3339()
        ));
        if let Some(description) = &post.description {
            feed.push_str(&format!(
                "    <summary>{}</summary>\n",
                escape_xml(description)
            ));
        }
        let clean_content = strip_invalid_xml_chars(&post.content);
        feed.push_str(&format!(
            "    <content type=\"html\"><![CDATA[{}]]></content>\n",
            clean_content
        ));
        feed.push_str("  </entry>\n");
    }

    feed.push_str("</feed>\n");
    feed
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Strip characters outside XML 1.0's Char production
/// (#x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF])
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}
