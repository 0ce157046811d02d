//! Error types for the kitpress core library.

use thiserror::Error;

/// Result type alias using `KitError`.
pub type Result<T> = std::result::Result<T, KitError>;

/// Core error types for the kit pipeline.
///
/// Validation failure is deliberately absent: a failed validation is data
/// (a [`crate::ValidationReport`] with `passed = false`), not an error.
#[derive(Error, Debug)]
pub enum KitError {
    /// The uploaded archive is not a valid zip container.
    #[error("Malformed archive: {message}")]
    MalformedArchive { message: String },

    /// No kit manifest matches the requested id.
    #[error("Kit not found: {id}")]
    NotFound { id: String },

    /// A filesystem step of the publish sequence failed. The manifest is
    /// left in its pre-publish state so the operation can be retried.
    #[error("Publish failed: {message}")]
    Publish {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration loading or validation error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl KitError {
    /// Create a new malformed-archive error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedArchive {
            message: message.into(),
        }
    }

    /// Create a new not-found error for a kit id.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a new publish error with a message.
    pub fn publish(message: impl Into<String>) -> Self {
        Self::Publish {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new publish error with source.
    pub fn publish_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Publish {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_error() {
        let err = KitError::malformed("not a zip");
        assert!(err.to_string().contains("Malformed archive"));
        assert!(err.to_string().contains("not a zip"));
    }

    #[test]
    fn test_not_found_error() {
        let err = KitError::not_found("abc-123");
        assert!(err.to_string().contains("Kit not found"));
        assert!(err.to_string().contains("abc-123"));
    }

    #[test]
    fn test_publish_error_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = KitError::publish_with_source("copying banners", io_err);
        assert!(err.to_string().contains("Publish failed"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: KitError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }
}
