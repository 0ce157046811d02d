//! Pipeline configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KitError, Result};

/// Main configuration structure for kitpress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Storage root settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Rendering settings.
    #[serde(default)]
    pub render: RenderConfig,
}

/// Storage root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory holding one workspace per imported kit version.
    #[serde(default = "default_kits_root")]
    pub kits_root: PathBuf,

    /// Root directory of the live published trees, one per slug.
    #[serde(default = "default_published_root")]
    pub published_root: PathBuf,
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Render editorial markdown with the CommonMark engine. When disabled
    /// the preformatted fallback is used instead; pages still render.
    #[serde(default = "default_true")]
    pub markdown: bool,
}

// Default value functions
fn default_kits_root() -> PathBuf {
    PathBuf::from("/var/kitpress/kits")
}

fn default_published_root() -> PathBuf {
    PathBuf::from("/var/kitpress/published")
}

fn default_true() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kits_root: default_kits_root(),
            published_root: default_published_root(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { markdown: true }
    }
}

impl StorageConfig {
    /// Workspace directory for one imported kit version.
    pub fn kit_dir(&self, slug: &str, timestamp: &str) -> PathBuf {
        self.kits_root.join(slug).join(timestamp)
    }

    /// Live published directory for a slug.
    pub fn published_dir(&self, slug: &str) -> PathBuf {
        self.published_root.join(slug)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(KitError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment overrides.
    ///
    /// Reads the TOML file when given, then applies `KITPRESS`-prefixed
    /// environment variables (e.g. `KITPRESS_STORAGE__KITS_ROOT`). Falls
    /// back to built-in defaults when no file is given.
    pub fn load_with_env(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        let settings = builder
            .add_source(config::Environment::with_prefix("KITPRESS").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.storage.kits_root.as_os_str().is_empty() {
            return Err(KitError::config("storage.kits_root cannot be empty"));
        }
        if self.storage.published_root.as_os_str().is_empty() {
            return Err(KitError::config("storage.published_root cannot be empty"));
        }
        if self.storage.kits_root == self.storage.published_root {
            return Err(KitError::config(
                "storage.kits_root and storage.published_root must be distinct",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("kitpress.toml");
        std::fs::write(
            &config_path,
            r#"
[storage]
kits_root = "/srv/kits"
published_root = "/srv/published"

[render]
markdown = false
"#,
        )
        .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.storage.kits_root, PathBuf::from("/srv/kits"));
        assert_eq!(
            config.storage.published_root,
            PathBuf::from("/srv/published")
        );
        assert!(!config.render.markdown);
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();

        assert_eq!(
            config.storage.kits_root,
            PathBuf::from("/var/kitpress/kits")
        );
        assert_eq!(
            config.storage.published_root,
            PathBuf::from("/var/kitpress/published")
        );
        assert!(config.render.markdown);
    }

    #[test]
    fn test_storage_paths() {
        let storage = StorageConfig::default();

        assert_eq!(
            storage.kit_dir("spring-sale", "20260301_120000"),
            PathBuf::from("/var/kitpress/kits/spring-sale/20260301_120000")
        );
        assert_eq!(
            storage.published_dir("spring-sale"),
            PathBuf::from("/var/kitpress/published/spring-sale")
        );
    }

    #[test]
    fn test_config_rejects_shared_roots() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("kitpress.toml");
        std::fs::write(
            &config_path,
            r#"
[storage]
kits_root = "/srv/kits"
published_root = "/srv/kits"
"#,
        )
        .expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("distinct"));
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/kitpress.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }
}
