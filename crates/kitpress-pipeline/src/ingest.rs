//! Archive ingestion.
//!
//! Unpacks an uploaded kit archive into an isolated per-version workspace
//! under `{kits_root}/{slug}/{timestamp}/`, validates the extracted tree,
//! and persists the manifest sidecar. The raw upload is retained for audit.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use kitpress_core::{
    Config, KitError, KitManifest, KitStatus, Result, slug_from_filename, slugify,
};
use tracing::{debug, info, warn};
use uuid::Uuid;
use zip::result::ZipError;

use crate::store::ManifestStore;
use crate::validate::{KIT_ROOT, validate};

/// Name of the retained raw upload inside a workspace.
const UPLOAD_FILE: &str = "upload.zip";

/// Extraction subdirectory inside a workspace.
const SOURCE_DIR: &str = "source";

/// Imports uploaded archives into per-version kit workspaces.
#[derive(Debug)]
pub struct KitImporter {
    config: Config,
    store: ManifestStore,
}

impl KitImporter {
    /// Create a new importer over the configured kits root.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let store = ManifestStore::new(config.storage.kits_root.clone());
        Self { config, store }
    }

    /// Import one uploaded archive.
    ///
    /// Always creates a workspace: a failed validation still yields a
    /// persisted, inspectable (but unpublishable) manifest. Only a
    /// malformed container aborts the import, removing the workspace
    /// again so no record is left behind.
    pub fn import(&self, archive_bytes: &[u8], original_filename: &str) -> Result<KitManifest> {
        let id = Uuid::new_v4().to_string();
        let mut slug = slug_from_filename(original_filename);
        let timestamp = unique_timestamp(&self.config.storage.kits_root, &slug, &id);

        let mut kit_dir = self.config.storage.kit_dir(&slug, &timestamp);
        let mut source_dir = kit_dir.join(SOURCE_DIR);
        fs::create_dir_all(&source_dir)?;
        fs::write(kit_dir.join(UPLOAD_FILE), archive_bytes)?;

        if let Err(err) = extract_archive(&kit_dir.join(UPLOAD_FILE), &source_dir) {
            let _ = fs::remove_dir_all(&kit_dir);
            return Err(err);
        }

        // An embedded descriptor slug overrides the filename-derived one;
        // the workspace moves so every subsequent path agrees with it.
        if let Some(embedded) = embedded_slug(&source_dir) {
            if embedded != slug {
                let new_dir = self.config.storage.kit_dir(&embedded, &timestamp);
                if let Some(parent) = new_dir.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::rename(&kit_dir, &new_dir)?;
                if let Some(old_slug_dir) = kit_dir.parent() {
                    // Only succeeds when this was the slug's sole version.
                    let _ = fs::remove_dir(old_slug_dir);
                }
                debug!(from = %slug, to = %embedded, "embedded descriptor overrides slug");
                slug = embedded;
                kit_dir = new_dir;
                source_dir = kit_dir.join(SOURCE_DIR);
            }
        }

        let validation = validate(&source_dir);
        if !validation.passed {
            warn!(
                slug = %slug,
                errors = validation.errors.len(),
                "kit imported but failed validation"
            );
        }

        let manifest = KitManifest {
            id,
            slug: slug.clone(),
            timestamp,
            filename: original_filename.to_string(),
            status: KitStatus::Imported,
            kit_path: kit_dir,
            source_path: source_dir,
            published_path: self.config.storage.published_dir(&slug),
            validation,
            imported_at: Utc::now(),
            published_at: None,
        };
        self.store.put(&manifest)?;

        info!(
            slug = %manifest.slug,
            id = %manifest.id,
            passed = manifest.validation.passed,
            "imported kit"
        );
        Ok(manifest)
    }
}

/// Workspace directory name for this import: the UTC second, suffixed from
/// the kit id when two imports of one slug land in the same second.
fn unique_timestamp(kits_root: &Path, slug: &str, id: &str) -> String {
    let base = Utc::now().format("%Y%m%d_%H%M%S").to_string();
    if !kits_root.join(slug).join(&base).exists() {
        return base;
    }
    let suffix: String = id.chars().take(6).collect();
    format!("{base}_{suffix}")
}

/// Extract every entry whose resolved path stays inside `dest`.
///
/// Entries escaping the extraction root (absolute paths, `..` traversal)
/// are silently skipped, not reported. An invalid container
/// fails the whole extraction.
fn extract_archive(archive_path: &Path, dest: &Path) -> Result<()> {
    let file = fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(map_zip_err)?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(map_zip_err)?;
        let Some(relative) = entry.enclosed_name() else {
            debug!(entry = entry.name(), "skipping entry escaping the extraction root");
            continue;
        };
        let target: PathBuf = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = fs::File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
    }
    Ok(())
}

fn map_zip_err(err: ZipError) -> KitError {
    match err {
        ZipError::Io(io_err) => KitError::Io(io_err),
        other => KitError::malformed(other.to_string()),
    }
}

/// Slug declared by the kit's own descriptor, if present and non-empty.
fn embedded_slug(source_dir: &Path) -> Option<String> {
    let descriptor = source_dir.join(KIT_ROOT).join("manifest.json");
    let text = fs::read_to_string(descriptor).ok()?;
    let value: serde_json::Value = serde_json::from_str(&text).ok()?;
    let declared = value.get("slug")?.as_str()?.trim();
    if declared.is_empty() {
        None
    } else {
        Some(slugify(declared))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_unique_timestamp_suffixes_on_collision() {
        let dir = TempDir::new().unwrap();
        let base = Utc::now().format("%Y%m%d_%H%M%S").to_string();
        fs::create_dir_all(dir.path().join("kit").join(&base)).unwrap();

        let ts = unique_timestamp(dir.path(), "kit", "abcdef12-3456");
        assert_ne!(ts, base);
        assert!(ts.starts_with(&base));
        assert!(ts.ends_with("abcdef"));
    }

    #[test]
    fn test_map_zip_err_classifies_bad_container() {
        let err = map_zip_err(ZipError::InvalidArchive("truncated".into()));
        assert!(matches!(err, KitError::MalformedArchive { .. }));

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(map_zip_err(ZipError::Io(io_err)), KitError::Io(_)));
    }

    #[test]
    fn test_embedded_slug_normalizes() {
        let dir = TempDir::new().unwrap();
        let kit = dir.path().join(KIT_ROOT);
        fs::create_dir_all(&kit).unwrap();
        fs::write(kit.join("manifest.json"), r#"{"slug": "Rebrand Launch!"}"#).unwrap();

        assert_eq!(embedded_slug(dir.path()).as_deref(), Some("rebrand-launch"));
    }

    #[test]
    fn test_embedded_slug_absent_or_blank() {
        let dir = TempDir::new().unwrap();
        assert!(embedded_slug(dir.path()).is_none());

        let kit = dir.path().join(KIT_ROOT);
        fs::create_dir_all(&kit).unwrap();
        fs::write(kit.join("manifest.json"), r#"{"slug": "  "}"#).unwrap();
        assert!(embedded_slug(dir.path()).is_none());

        fs::write(kit.join("manifest.json"), "not json").unwrap();
        assert!(embedded_slug(dir.path()).is_none());
    }
}
