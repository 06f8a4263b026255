//! Main Content Selection
//!
//! Three tiers, tried in order until one returns an element:
//!
//! 1. [`semantic_probe`]: semantic tags and roles, first substantial match wins.
//! 2. [`class_pattern_probe`]: known content class names, same gate.
//! 3. [`density_fallback`]: density scoring over every container.
//!
//! `None` means no tier found anything; the caller then filters the whole
//! body instead.

use dom_query::{Document, Selection};
use tracing::debug;

use crate::options::Options;
use crate::render::Rendering;

pub mod content;
pub mod density;
pub mod utils;

pub use content::{class_pattern_probe, semantic_probe};
pub use density::density_fallback;

/// Return the element most likely to hold the main content.
///
/// # Example
///
/// ```rust
/// use fit_content::{dom, selector, InlineStyles, Options};
///
/// let body = "word ".repeat(60);
/// let doc = dom::parse(&format!("<nav>menu</nav><article>{body}</article>"));
/// let found = selector::select_main_content(&doc, &InlineStyles::default(), &Options::default());
/// assert_eq!(found.as_ref().and_then(dom::tag_name).as_deref(), Some("article"));
/// ```
#[must_use]
pub fn select_main_content<'a>(
    doc: &'a Document,
    rendering: &dyn Rendering,
    options: &Options,
) -> Option<Selection<'a>> {
    semantic_probe(doc, options.min_substantial_words)
        .or_else(|| class_pattern_probe(doc, options.min_substantial_words))
        .or_else(|| density_fallback(doc, rendering, &options.scoring))
        .or_else(|| {
            debug!("no main content candidate");
            None
        })
}
