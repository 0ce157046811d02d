//! Publishing: full rebuild of a kit's live directory tree.
//!
//! Every publish deletes the slug's published directory and recreates it
//! from the validated source tree; there is no incremental diffing, which
//! is what makes republishing idempotent.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use kitpress_core::{Config, KitError, KitManifest, KitStatus, Result};
use kitpress_render::{
    MarkdownEngine, banner_index_html, email_index_html, render_editorial, select_engine,
};
use tracing::{debug, info, warn};

use crate::fsutil::{copy_tree, file_names_with_ext};
use crate::store::ManifestStore;
use crate::validate::KIT_ROOT;

/// Editorial pages exposed at short extension-less published paths.
const ALIASED_PAGES: [&str; 2] = ["press-release", "sponsored-article"];

/// Copies a validated kit into the live published tree.
///
/// The publisher does not gate on the validation result; that policy
/// belongs to the calling layer, and operators may deliberately push a
/// partial kit. What it does guarantee: a full idempotent rebuild, and a
/// manifest that only transitions to `published` after every copy and
/// render step succeeded.
pub struct Publisher {
    config: Config,
    store: ManifestStore,
    engine: Box<dyn MarkdownEngine>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Publisher {
    /// Create a publisher; the markdown engine is selected here, once per
    /// process, from configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let engine = select_engine(config.render.markdown);
        let store = ManifestStore::new(config.storage.kits_root.clone());
        Self {
            config,
            store,
            engine,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the markdown engine.
    #[must_use]
    pub fn with_engine(mut self, engine: Box<dyn MarkdownEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Publish the kit with the given id.
    ///
    /// Fails with [`KitError::NotFound`] for an unknown id. Any filesystem
    /// failure during the rebuild surfaces as [`KitError::Publish`] and
    /// leaves the manifest in its pre-publish state, so the operation is
    /// safely retryable.
    pub fn publish(&self, kit_id: &str) -> Result<KitManifest> {
        let mut manifest = self
            .store
            .get(kit_id)
            .ok_or_else(|| KitError::not_found(kit_id))?;

        if !manifest.validation.passed {
            warn!(slug = %manifest.slug, id = %kit_id, "publishing a kit that failed validation");
        }

        // Per-slug critical section across delete, copy, render, and the
        // manifest write. Two concurrent publishes of one slug would
        // otherwise interleave their delete-then-recreate steps.
        let lock = self.slug_lock(&manifest.slug);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let published_dir = self.config.storage.published_dir(&manifest.slug);
        self.build_tree(&manifest, &published_dir)
            .map_err(|err| match err {
                KitError::Io(io_err) => KitError::publish_with_source(
                    format!("rebuilding {}", published_dir.display()),
                    io_err,
                ),
                other => other,
            })?;

        manifest.status = KitStatus::Published;
        manifest.published_at = Some(Utc::now());
        manifest.published_path = published_dir;
        self.store.put(&manifest)?;

        info!(slug = %manifest.slug, id = %manifest.id, "published kit");
        Ok(manifest)
    }

    /// Named lock for a slug, created on first use.
    fn slug_lock(&self, slug: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(slug.to_string()).or_default().clone()
    }

    /// Delete and rebuild the published tree from the validated source.
    fn build_tree(&self, manifest: &KitManifest, published_dir: &Path) -> Result<()> {
        let kit_src = manifest.source_path.join(KIT_ROOT);

        if published_dir.exists() {
            debug!(dir = %published_dir.display(), "removing previous publish");
            fs::remove_dir_all(published_dir)?;
        }
        fs::create_dir_all(published_dir)?;

        // The landing tree lands at the published root itself.
        let landing = kit_src.join("landing");
        if landing.is_dir() {
            copy_tree(&landing, published_dir)?;
        }

        let banners = kit_src.join("banners");
        if banners.is_dir() {
            let dest = published_dir.join("banners");
            copy_tree(&banners, &dest)?;
            let files = file_names_with_ext(&dest, &["html"]);
            fs::write(
                dest.join("index.html"),
                banner_index_html(&manifest.slug, &files),
            )?;
        }

        let email = kit_src.join("email");
        if email.is_dir() {
            let dest = published_dir.join("email");
            copy_tree(&email, &dest)?;
            let files = file_names_with_ext(&dest, &["html", "htm"]);
            fs::write(
                dest.join("index.html"),
                email_index_html(&manifest.slug, &files),
            )?;
        }

        let editorial = kit_src.join("editorial");
        if editorial.is_dir() {
            self.render_editorial_dir(&editorial, published_dir, &manifest.slug)?;
        }

        let assets = kit_src.join("assets");
        if assets.is_dir() {
            copy_tree(&assets, &published_dir.join("assets"))?;
        }

        let seo = kit_src.join("seo");
        if seo.is_dir() {
            copy_tree(&seo, &published_dir.join("seo"))?;
        }

        Ok(())
    }

    /// Render every editorial markdown file and expose the conventional
    /// pages at their short aliases.
    fn render_editorial_dir(
        &self,
        editorial_src: &Path,
        published_dir: &Path,
        slug: &str,
    ) -> Result<()> {
        let dest = published_dir.join("editorial");
        fs::create_dir_all(&dest)?;

        for entry in fs::read_dir(editorial_src)?.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            // Tolerate non-UTF-8 bytes; rendering must not fail on them.
            let content = String::from_utf8_lossy(&fs::read(&path)?).into_owned();
            let html = render_editorial(self.engine.as_ref(), stem, &content, slug);
            fs::write(dest.join(format!("{stem}.html")), html)?;
            debug!(file = %path.display(), "rendered editorial page");
        }

        for alias in ALIASED_PAGES {
            let rendered = dest.join(format!("{alias}.html"));
            if rendered.exists() {
                let alias_dir = published_dir.join(alias);
                fs::create_dir_all(&alias_dir)?;
                fs::copy(&rendered, alias_dir.join("index.html"))?;
            }
        }
        Ok(())
    }
}
