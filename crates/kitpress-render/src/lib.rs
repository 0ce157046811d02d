//! Kitpress Render Library
//!
//! Markdown rendering capability and HTML generation for published
//! campaign pages.
//!
//! # Modules
//!
//! - [`engine`] - Markdown capability interface with a degraded fallback
//! - [`front_matter`] - Editorial front-matter splitting and metadata
//! - [`page`] - Self-contained HTML shells for pages and asset indexes

pub mod engine;
pub mod front_matter;
pub mod page;

#[cfg(feature = "markdown")]
pub use engine::CommonMarkEngine;
pub use engine::{MarkdownEngine, PreformattedEngine, select_engine};
pub use front_matter::{EditorialMeta, parse_editorial, split_front_matter};
pub use page::{banner_index_html, email_index_html, humanize_title, render_editorial};
