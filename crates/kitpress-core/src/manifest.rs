//! Kit manifest records and validation reports.
//!
//! One `_manifest.json` sidecar is written per imported kit version; it is
//! the only durable record the pipeline keeps.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File name of the manifest sidecar inside a kit workspace.
pub const MANIFEST_FILE: &str = "_manifest.json";

/// Lifecycle status of an imported kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KitStatus {
    /// Imported and validated, not yet live.
    Imported,
    /// Copied into the published tree.
    Published,
}

/// Structural validation result for an extracted kit.
///
/// Computed by the validator and embedded in the manifest; never persisted
/// on its own. `passed` is true iff `errors` is empty; warnings never
/// affect it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether the kit satisfies every hard structural rule.
    pub passed: bool,

    /// Blocking problems, one entry per failed rule.
    #[serde(default)]
    pub errors: Vec<String>,

    /// Non-fatal observations.
    #[serde(default)]
    pub warnings: Vec<String>,

    /// Banner files found, reported even on failure for progress display.
    #[serde(default)]
    pub banner_count: usize,

    /// Email module files found.
    #[serde(default)]
    pub email_count: usize,

    /// Editorial markdown files found.
    #[serde(default)]
    pub editorial_count: usize,
}

impl ValidationReport {
    /// Assemble a report, deriving `passed` from the error list.
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            passed: errors.is_empty(),
            errors,
            warnings,
            ..Self::default()
        }
    }
}

/// One JSON record per imported kit version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitManifest {
    /// Generated unique id.
    pub id: String,

    /// Human-derived slug; many manifests may share one slug, one per
    /// import timestamp.
    pub slug: String,

    /// Import timestamp string, `YYYYMMDD_HHMMSS`; doubles as the version
    /// discriminator and the workspace directory name.
    pub timestamp: String,

    /// Original name of the uploaded archive.
    pub filename: String,

    /// Lifecycle status.
    pub status: KitStatus,

    /// Workspace directory for this version.
    pub kit_path: PathBuf,

    /// Extraction root (`source/` inside the workspace).
    pub source_path: PathBuf,

    /// Live directory this kit publishes to.
    pub published_path: PathBuf,

    /// Embedded validation result.
    pub validation: ValidationReport,

    /// When the import happened.
    pub imported_at: DateTime<Utc>,

    /// When the kit last went live; `None` until published.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl KitManifest {
    /// Path of this manifest's JSON sidecar.
    pub fn manifest_path(&self) -> PathBuf {
        self.kit_path.join(MANIFEST_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_passed_tracks_errors() {
        let report = ValidationReport::new(vec![], vec!["assets/ directory is empty".into()]);
        assert!(report.passed);

        let report = ValidationReport::new(vec!["Missing required file: x".into()], vec![]);
        assert!(!report.passed);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&KitStatus::Imported).unwrap(),
            "\"imported\""
        );
        assert_eq!(
            serde_json::to_string(&KitStatus::Published).unwrap(),
            "\"published\""
        );
    }

    #[test]
    fn test_manifest_round_trip() {
        let manifest = KitManifest {
            id: "id-1".into(),
            slug: "spring-sale".into(),
            timestamp: "20260301_120000".into(),
            filename: "spring-sale.zip".into(),
            status: KitStatus::Imported,
            kit_path: PathBuf::from("/kits/spring-sale/20260301_120000"),
            source_path: PathBuf::from("/kits/spring-sale/20260301_120000/source"),
            published_path: PathBuf::from("/published/spring-sale"),
            validation: ValidationReport::new(vec![], vec![]),
            imported_at: Utc::now(),
            published_at: None,
        };

        let json = serde_json::to_string_pretty(&manifest).unwrap();
        let back: KitManifest = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, manifest.id);
        assert_eq!(back.slug, manifest.slug);
        assert_eq!(back.status, KitStatus::Imported);
        assert_eq!(back.validation, manifest.validation);
        assert!(back.published_at.is_none());
    }

    #[test]
    fn test_manifest_path() {
        let manifest = KitManifest {
            id: "id-1".into(),
            slug: "s".into(),
            timestamp: "t".into(),
            filename: "s.zip".into(),
            status: KitStatus::Imported,
            kit_path: PathBuf::from("/kits/s/t"),
            source_path: PathBuf::from("/kits/s/t/source"),
            published_path: PathBuf::from("/published/s"),
            validation: ValidationReport::default(),
            imported_at: Utc::now(),
            published_at: None,
        };
        assert_eq!(
            manifest.manifest_path(),
            PathBuf::from("/kits/s/t/_manifest.json")
        );
    }
}
