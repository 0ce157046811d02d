//! Markdown rendering capability.
//!
//! The markdown engine sits behind [`MarkdownEngine`] with two
//! implementations: a CommonMark renderer and a literal preformatted
//! fallback. The engine is selected once at startup, never per call, so
//! behavior is deterministic within a process lifetime.

/// Capability interface for turning a markdown body into an HTML fragment.
///
/// Implementations must not fail: when a body cannot be rendered the engine
/// degrades, it does not error.
pub trait MarkdownEngine: Send + Sync {
    /// Engine name, for logs.
    fn name(&self) -> &'static str;

    /// Render a markdown body to an HTML fragment.
    fn render(&self, markdown: &str) -> String;
}

/// CommonMark renderer with tables and fenced code blocks enabled.
#[cfg(feature = "markdown")]
#[derive(Debug, Default)]
pub struct CommonMarkEngine;

#[cfg(feature = "markdown")]
impl CommonMarkEngine {
    /// Create a new CommonMark engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "markdown")]
impl MarkdownEngine for CommonMarkEngine {
    fn name(&self) -> &'static str {
        "commonmark"
    }

    fn render(&self, markdown: &str) -> String {
        use pulldown_cmark::{Options, Parser, html};

        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let parser = Parser::new_ext(markdown, options);
        let mut out = String::new();
        html::push_html(&mut out, parser);
        out
    }
}

/// Literal fallback used when no markdown capability is available: the body
/// is HTML-escaped and wrapped in a preformatted block, so pages still
/// render.
#[derive(Debug, Default)]
pub struct PreformattedEngine;

impl MarkdownEngine for PreformattedEngine {
    fn name(&self) -> &'static str {
        "preformatted"
    }

    fn render(&self, markdown: &str) -> String {
        format!("<pre>{}</pre>", html_escape(markdown))
    }
}

/// Select the engine for this process lifetime.
///
/// `use_markdown` comes from configuration; the CommonMark engine also
/// requires the `markdown` cargo feature. Everything else degrades to the
/// preformatted fallback.
pub fn select_engine(use_markdown: bool) -> Box<dyn MarkdownEngine> {
    #[cfg(feature = "markdown")]
    if use_markdown {
        return Box::new(CommonMarkEngine::new());
    }

    #[cfg(not(feature = "markdown"))]
    if use_markdown {
        tracing::warn!("markdown engine not compiled in, falling back to preformatted output");
    }

    Box::new(PreformattedEngine)
}

/// Escape HTML special characters.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
