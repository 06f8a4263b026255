//! The live page.
//!
//! [`Page`] owns the document being viewed together with its URL and the
//! [`Rendering`] host. Only the overlay pass mutates it; everything else
//! either reads it or works on a detached copy.

use url::Url;

use crate::dom::{self, Document};
use crate::render::{InlineStyles, Rendering};

/// A rendered page.
pub struct Page {
    document: Document,
    url: String,
    rendering: Box<dyn Rendering>,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("url", &self.url)
            .field("viewport", &self.rendering.viewport())
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Parse a snapshot, reading layout facts from inline styles.
    #[must_use]
    pub fn new(html: &str, url: &str) -> Self {
        Self::with_rendering(html, url, InlineStyles::default())
    }

    /// Parse a snapshot with a host that knows real computed styles.
    #[must_use]
    pub fn with_rendering(html: &str, url: &str, rendering: impl Rendering + 'static) -> Self {
        Self {
            document: dom::parse(html),
            url: url.to_string(),
            rendering: Box::new(rendering),
        }
    }

    /// Replace the document with a newer render of the same URL.
    pub fn reload(&mut self, html: &str) {
        self.document = dom::parse(html);
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The URL parsed, `None` for relative or malformed values.
    #[must_use]
    pub fn base_url(&self) -> Option<Url> {
        Url::parse(&self.url).ok()
    }

    #[must_use]
    pub fn rendering(&self) -> &dyn Rendering {
        self.rendering.as_ref()
    }
}

/// Supplies fresher renders while a viewer is still drawing.
pub trait RenderSource {
    /// The page's current HTML, or `None` when nothing changed since the
    /// last call.
    fn current_html(&mut self) -> Option<String>;
}

/// A source that never changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Frozen;

impl RenderSource for Frozen {
    fn current_html(&mut self) -> Option<String> {
        None
    }
}

impl<F> RenderSource for F
where
    F: FnMut() -> Option<String>,
{
    fn current_html(&mut self) -> Option<String> {
        self()
    }
}
