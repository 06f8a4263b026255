//! Selector-list probes (tiers 1 and 2)
//!
//! Each probe walks its selector list in priority order, takes the first
//! element each selector matches and accepts it when it carries substantial
//! content. Order is priority: the first accepted element wins even if a
//! later one is larger.

use dom_query::{Document, Selection};
use tracing::debug;

use crate::dom;
use crate::patterns::{CONTENT_CLASS_SELECTORS, SEMANTIC_SELECTORS};
use crate::selector::utils::has_substantial_content;

/// Tier 1: `article`, `main`, ARIA main/article roles and content-tagged
/// sections.
#[must_use]
pub fn semantic_probe(doc: &Document, min_words: usize) -> Option<Selection<'_>> {
    probe(doc, SEMANTIC_SELECTORS, min_words, "semantic")
}

/// Tier 2: common CMS content classes and localized news-site classes.
#[must_use]
pub fn class_pattern_probe(doc: &Document, min_words: usize) -> Option<Selection<'_>> {
    probe(doc, CONTENT_CLASS_SELECTORS, min_words, "class-pattern")
}

fn probe<'a>(
    doc: &'a Document,
    selectors: &[&str],
    min_words: usize,
    tier: &'static str,
) -> Option<Selection<'a>> {
    let root = dom::root(doc);
    for selector in selectors {
        let Some(candidate) = dom::first(&root, selector) else {
            continue;
        };
        if has_substantial_content(&candidate, min_words) {
            debug!(tier, selector, "main content selected");
            return Some(candidate);
        }
    }
    None
}
