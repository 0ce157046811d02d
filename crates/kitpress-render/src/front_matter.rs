//! Front matter handling for editorial files.

use serde::Deserialize;
use tracing::debug;

/// Metadata recognized at the top of an editorial markdown file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditorialMeta {
    /// Page title; when absent the humanized file name is used.
    #[serde(default)]
    pub title: Option<String>,

    /// Optional description carried into the page meta tags.
    #[serde(default)]
    pub description: Option<String>,
}

/// Split a leading `---` delimited front-matter block from the body.
///
/// Returns `None` when the content does not open with a block.
pub fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let trimmed = content.trim_start();
    let after = trimmed.strip_prefix("---")?;
    let close = after.find("\n---")?;

    let front = after[..close].trim();
    let body = after[close + 4..].trim_start();
    Some((front, body))
}

/// Extract editorial metadata and the markdown body.
///
/// Malformed front matter degrades to defaults with the full block dropped;
/// rendering must always produce a page.
pub fn parse_editorial(content: &str) -> (EditorialMeta, &str) {
    match split_front_matter(content) {
        Some((front, body)) => {
            let meta = serde_yaml::from_str(front).unwrap_or_else(|e| {
                debug!(error = %e, "unparseable front matter, using defaults");
                EditorialMeta::default()
            });
            (meta, body)
        }
        None => (EditorialMeta::default(), content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_front_matter() {
        let content = "---\ntitle: Launch Notes\n---\n\nBody text.";

        let (front, body) = split_front_matter(content).expect("split");
        assert!(front.contains("title:"));
        assert_eq!(body, "Body text.");
    }

    #[test]
    fn test_split_without_front_matter() {
        assert!(split_front_matter("Just body text.").is_none());
    }

    #[test]
    fn test_split_unclosed_block() {
        assert!(split_front_matter("---\ntitle: Oops\n\nNo closing line.").is_none());
    }

    #[test]
    fn test_parse_editorial() {
        let content = "---\ntitle: Press Release\ndescription: Launch day\n---\n\n# Heading\n";

        let (meta, body) = parse_editorial(content);
        assert_eq!(meta.title.as_deref(), Some("Press Release"));
        assert_eq!(meta.description.as_deref(), Some("Launch day"));
        assert!(body.starts_with("# Heading"));
    }

    #[test]
    fn test_parse_editorial_malformed_degrades() {
        let content = "---\n: : not yaml : :\n---\n\nStill the body.";

        let (meta, body) = parse_editorial(content);
        assert!(meta.title.is_none());
        assert_eq!(body, "Still the body.");
    }

    #[test]
    fn test_parse_editorial_no_block_keeps_content() {
        let (meta, body) = parse_editorial("Plain body.");
        assert!(meta.title.is_none());
        assert_eq!(body, "Plain body.");
    }
}
