//! Utility functions for selector rules

use dom_query::Selection;

use crate::dom;

/// Whether the element's text holds at least `min_words` whitespace-delimited
/// words.
///
/// # Example
///
/// ```rust
/// use fit_content::selector::utils;
/// use fit_content::dom;
///
/// let doc = dom::parse("<article>one two three</article>");
/// assert!(utils::has_substantial_content(&doc.select("article"), 3));
/// assert!(!utils::has_substantial_content(&doc.select("article"), 4));
/// ```
#[inline]
#[must_use]
pub fn has_substantial_content(sel: &Selection, min_words: usize) -> bool {
    dom::word_count(sel) >= min_words
}

/// Short description of an element for log lines: `tag#id.class`.
#[must_use]
pub fn describe(sel: &Selection) -> String {
    let mut out = dom::tag_name(sel).unwrap_or_default();
    if let Some(id) = dom::id(sel).filter(|id| !id.is_empty()) {
        out.push('#');
        out.push_str(&id);
    }
    if let Some(class) = dom::class_name(sel) {
        for token in class.split_whitespace() {
            out.push('.');
            out.push_str(token);
        }
    }
    out
}
