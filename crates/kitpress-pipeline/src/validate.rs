//! Structural validation of an extracted kit tree.
//!
//! Pure function of the filesystem; the tree is never mutated. Rules are
//! evaluated independently and accumulated, not short-circuited, so a
//! report carries every problem at once.

use std::path::Path;

use kitpress_core::ValidationReport;

/// Conventional top-level folder inside every kit archive.
pub const KIT_ROOT: &str = "campaign-kit";

/// Relative paths that must all exist for a kit to pass.
pub const REQUIRED_FILES: [&str; 4] = [
    "campaign-kit/landing/index.html",
    "campaign-kit/seo/meta.json",
    "campaign-kit/seo/jsonld.json",
    "campaign-kit/manifest.json",
];

const MIN_BANNERS: usize = 6;
const MIN_EMAIL: usize = 2;
const MIN_EDITORIAL: usize = 2;

/// Validate an extracted kit tree.
///
/// Counts are always populated, pass or fail, so progress displays can
/// show "4 of 6 banners present". An empty or missing assets directory is
/// a warning, never a blocker.
pub fn validate(extracted_root: &Path) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for required in REQUIRED_FILES {
        if !extracted_root.join(required).exists() {
            errors.push(format!("Missing required file: {required}"));
        }
    }

    let kit = extracted_root.join(KIT_ROOT);

    let banner_count = count_entries(&kit.join("banners"), None);
    if banner_count < MIN_BANNERS {
        errors.push(format!(
            "banners/: need {MIN_BANNERS} files, found {banner_count}"
        ));
    }

    let email_count = count_entries(&kit.join("email"), None);
    if email_count < MIN_EMAIL {
        errors.push(format!("email/: need {MIN_EMAIL} files, found {email_count}"));
    }

    let editorial_count = count_entries(&kit.join("editorial"), Some("md"));
    if editorial_count < MIN_EDITORIAL {
        errors.push(format!(
            "editorial/: need {MIN_EDITORIAL} markdown files, found {editorial_count}"
        ));
    }

    let assets = kit.join("assets");
    if assets.is_dir() {
        if count_entries(&assets, None) == 0 {
            warnings.push("assets/ directory is empty".to_string());
        }
    } else {
        warnings.push("assets/ directory not found".to_string());
    }

    let mut report = ValidationReport::new(errors, warnings);
    report.banner_count = banner_count;
    report.email_count = email_count;
    report.editorial_count = editorial_count;
    report
}

/// Count directory entries, optionally filtered by extension. A missing or
/// unreadable directory counts as zero.
fn count_entries(dir: &Path, extension: Option<&str>) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .filter(|entry| match extension {
            Some(ext) => entry.path().extension().and_then(|e| e.to_str()) == Some(ext),
            None => true,
        })
        .count()
}
