//! Slug normalization for kit identifiers.

use std::path::Path;

/// Maximum slug length in characters.
const MAX_LEN: usize = 64;

/// Fallback slug when nothing survives normalization.
const FALLBACK: &str = "kit";

/// Normalize free text into a URL-safe slug.
///
/// Lowercases, collapses every run of non-alphanumerics to a single hyphen,
/// trims edge hyphens, and caps the result at 64 characters. Returns
/// `"kit"` when nothing survives.
pub fn slugify(text: &str) -> String {
    let slug = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    let slug: String = slug.chars().take(MAX_LEN).collect();
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        FALLBACK.to_string()
    } else {
        slug.to_string()
    }
}

/// Derive the candidate slug for an uploaded archive from its filename.
///
/// Drops the extension, strips the conventional `campaign-kit` suffix and
/// surrounding separators, then normalizes via [`slugify`].
pub fn slug_from_filename(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    let stripped = stem.replace("campaign-kit", "");
    let stripped = stripped.trim_matches(|c| c == '-' || c == '_');

    slugify(if stripped.is_empty() { FALLBACK } else { stripped })
}
