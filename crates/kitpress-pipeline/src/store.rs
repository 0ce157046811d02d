//! Filesystem-backed manifest store.
//!
//! The JSON sidecars are the durable source of truth; there is no index.
//! Lookup by id is a deliberate linear scan, fine at the expected
//! cardinality of tens of kits. A larger fleet would want an id → path
//! index maintained beside the sidecars, with the sidecar staying
//! authoritative.

use std::fs;
use std::path::{Path, PathBuf};

use kitpress_core::{KitManifest, Result, manifest::MANIFEST_FILE};
use tracing::debug;

/// Read access and in-place updates for kit manifest sidecars.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    kits_root: PathBuf,
}

impl ManifestStore {
    /// Create a store over a kits root directory.
    #[must_use]
    pub fn new(kits_root: impl Into<PathBuf>) -> Self {
        Self {
            kits_root: kits_root.into(),
        }
    }

    /// Latest manifest per slug, slugs in sorted name order.
    ///
    /// "Latest" is the lexicographically-last timestamp directory under a
    /// slug that holds a readable sidecar; unreadable sidecars are
    /// skipped, never fatal.
    pub fn list(&self) -> Vec<KitManifest> {
        let mut kits = Vec::new();
        for slug_dir in sorted_dirs(&self.kits_root) {
            let mut versions = sorted_dirs(&slug_dir);
            versions.reverse();
            for version_dir in versions {
                if let Some(manifest) = load_manifest(&version_dir) {
                    kits.push(manifest);
                    break; // latest only per slug
                }
            }
        }
        kits
    }

    /// Find a manifest by kit id, scanning every sidecar.
    pub fn get(&self, id: &str) -> Option<KitManifest> {
        for slug_dir in sorted_dirs(&self.kits_root) {
            for version_dir in sorted_dirs(&slug_dir) {
                if let Some(manifest) = load_manifest(&version_dir) {
                    if manifest.id == id {
                        return Some(manifest);
                    }
                }
            }
        }
        None
    }

    /// Overwrite a manifest sidecar in place.
    pub fn put(&self, manifest: &KitManifest) -> Result<()> {
        let json = serde_json::to_string_pretty(manifest)?;
        fs::write(manifest.manifest_path(), json)?;
        Ok(())
    }
}

/// Immediate subdirectories in name order; a missing root yields nothing.
fn sorted_dirs(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    dirs
}

/// Read one sidecar, tolerating absent or corrupt files.
fn load_manifest(version_dir: &Path) -> Option<KitManifest> {
    let path = version_dir.join(MANIFEST_FILE);
    let text = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&text) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "skipping unreadable manifest");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use kitpress_core::{KitStatus, ValidationReport};
    use tempfile::TempDir;

    use super::*;

    fn write_manifest(kits_root: &Path, slug: &str, timestamp: &str, id: &str) -> KitManifest {
        let kit_path = kits_root.join(slug).join(timestamp);
        fs::create_dir_all(&kit_path).unwrap();
        let manifest = KitManifest {
            id: id.to_string(),
            slug: slug.to_string(),
            timestamp: timestamp.to_string(),
            filename: format!("{slug}.zip"),
            status: KitStatus::Imported,
            kit_path: kit_path.clone(),
            source_path: kit_path.join("source"),
            published_path: PathBuf::from("/published").join(slug),
            validation: ValidationReport::new(vec![], vec![]),
            imported_at: Utc::now(),
            published_at: None,
        };
        let store = ManifestStore::new(kits_root);
        store.put(&manifest).unwrap();
        manifest
    }

    #[test]
    fn test_list_latest_per_slug_in_slug_order() {
        let dir = TempDir::new().unwrap();
        write_manifest(dir.path(), "beta", "20260301_100000", "b1");
        write_manifest(dir.path(), "alpha", "20260301_100000", "a1");
        write_manifest(dir.path(), "alpha", "20260301_110000", "a2");
        write_manifest(dir.path(), "alpha", "20260301_090000", "a0");

        let store = ManifestStore::new(dir.path());
        let kits = store.list();

        assert_eq!(kits.len(), 2);
        assert_eq!(kits[0].slug, "alpha");
        assert_eq!(kits[0].id, "a2");
        assert_eq!(kits[0].timestamp, "20260301_110000");
        assert_eq!(kits[1].slug, "beta");
    }

    #[test]
    fn test_list_skips_unreadable_sidecars() {
        let dir = TempDir::new().unwrap();
        write_manifest(dir.path(), "alpha", "20260301_100000", "a1");
        let broken = dir.path().join("alpha/20260301_110000");
        fs::create_dir_all(&broken).unwrap();
        fs::write(broken.join(MANIFEST_FILE), "{ corrupt").unwrap();

        let store = ManifestStore::new(dir.path());
        let kits = store.list();

        // Falls back to the older, readable version.
        assert_eq!(kits.len(), 1);
        assert_eq!(kits[0].id, "a1");
    }

    #[test]
    fn test_get_scans_every_version() {
        let dir = TempDir::new().unwrap();
        write_manifest(dir.path(), "alpha", "20260301_100000", "a1");
        write_manifest(dir.path(), "alpha", "20260301_110000", "a2");

        let store = ManifestStore::new(dir.path());
        assert_eq!(store.get("a1").unwrap().timestamp, "20260301_100000");
        assert_eq!(store.get("a2").unwrap().timestamp, "20260301_110000");
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_get_on_missing_root() {
        let store = ManifestStore::new("/nonexistent/kits");
        assert!(store.get("any").is_none());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_put_overwrites_in_place() {
        let dir = TempDir::new().unwrap();
        let mut manifest = write_manifest(dir.path(), "alpha", "20260301_100000", "a1");

        manifest.status = KitStatus::Published;
        manifest.published_at = Some(Utc::now());
        let store = ManifestStore::new(dir.path());
        store.put(&manifest).unwrap();

        let back = store.get("a1").unwrap();
        assert_eq!(back.status, KitStatus::Published);
        assert!(back.published_at.is_some());
    }
}
