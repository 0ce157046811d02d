//! Kitpress Pipeline Library
//!
//! Archive ingestion, structural validation, the manifest store, and
//! publishing for campaign kits.
//!
//! Control flow: [`KitImporter`] unpacks and validates an upload and
//! persists a manifest sidecar; on a separate operator action,
//! [`Publisher`] reads that manifest back, renders editorial content, and
//! rebuilds the live published tree.
//!
//! # Modules
//!
//! - [`ingest`] - Archive extraction into isolated per-version workspaces
//! - [`validate`] - Structural pass/fail rules over an extracted tree
//! - [`store`] - JSON sidecar manifest store
//! - [`publish`] - Full-rebuild publishing with a per-slug critical section
//! - [`fsutil`] - Verbatim tree-copy helpers

pub mod fsutil;
pub mod ingest;
pub mod publish;
pub mod store;
pub mod validate;

pub use ingest::KitImporter;
pub use publish::Publisher;
pub use store::ManifestStore;
pub use validate::{REQUIRED_FILES, validate};
