//! Front-matter extraction

use serde::Deserialize;

/// Metadata block from the top of a post's markdown file.
///
/// `title` and `datetime` are required. The collection fields default
/// to empty at deserialization time, so a freshly built record never
/// carries an "absent" state that downstream code has to patch up.
#[derive(Debug, Clone, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    /// ISO-8601 publication instant, kept as authored; parsing happens
    /// in the loader.
    pub datetime: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub pinned: bool,
}

/// Split a source file into its leading `---` fenced YAML block and
/// the remaining body. Returns `None` when there is no block.
fn split_block(source: &str) -> Option<(&str, &str)> {
    let trimmed = source.trim_start();
    let rest = trimmed.strip_prefix("---")?;
    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    let rest = rest.strip_prefix('\n')?;

    let end = rest.find("\n---")?;
    let block = &rest[..end];
    let body = rest[end + 4..].trim_start_matches(['\n', '\r']);
    Some((block, body))
}

/// Extract front-matter from a source file.
///
/// Returns the parsed metadata and the body with the block stripped.
/// A file without a block, or with a block that does not deserialize,
/// yields `None`; callers treat such a unit as having no metadata.
pub fn extract(source: &str) -> (Option<FrontMatter>, &str) {
    let Some((block, body)) = split_block(source) else {
        return (None, source);
    };

    match serde_yaml::from_str::<FrontMatter>(block) {
        Ok(fm) => (Some(fm), body),
        Err(e) => {
            tracing::debug!("front-matter block did not deserialize: {}", e);
            (None, body)
        }
    }
}
