//! DOM Operations Adapter
//!
//! Thin helpers over `dom_query` used by every pipeline stage. Reads go
//! through these functions; the only mutations are [`remove`] on the live
//! document (overlay pass) and on detached copies (content filter).

pub use dom_query::{Document, Matcher, Selection};
pub use tendril::StrTendril;

use crate::error::{Error, Result};

// === Attribute Operations ===

/// Get element ID attribute
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Class list and id joined by a space, lowercased.
///
/// This is the haystack every class/id keyword rule matches against.
#[must_use]
pub fn class_and_id(sel: &Selection) -> String {
    format!(
        "{} {}",
        class_name(sel).unwrap_or_default(),
        id(sel).unwrap_or_default()
    )
    .to_lowercase()
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

// === Text Content ===

/// Get all text content of node and descendants, like `textContent`.
///
/// Returns `StrTendril` for zero-copy passing.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Length of `textContent` in characters.
#[must_use]
pub fn text_len(sel: &Selection) -> usize {
    text_content(sel).chars().count()
}

/// Elements rendered on their own lines.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "tr", "ul",
];

/// Text with a line break around every block element and at each `<br>`,
/// close to what `innerText` shows. `script` and `style` contents are
/// skipped.
#[must_use]
pub fn block_text(sel: &Selection) -> String {
    let mut out = String::new();
    if let Some(node) = sel.nodes().first() {
        push_block_text(node, &mut out);
    }
    out
}

fn push_block_text(node: &dom_query::NodeRef, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            out.push_str(&child.text());
            continue;
        }
        if !child.is_element() {
            continue;
        }

        let tag = child.node_name().map(|t| t.to_ascii_lowercase()).unwrap_or_default();
        match tag.as_str() {
            "script" | "style" | "noscript" | "template" => {}
            "br" => out.push('\n'),
            _ if BLOCK_TAGS.contains(&tag.as_str()) => {
                out.push('\n');
                push_block_text(&child, out);
                out.push('\n');
            }
            _ => push_block_text(&child, out),
        }
    }
}

/// Count whitespace-delimited words in the element's text.
#[must_use]
pub fn word_count(sel: &Selection) -> usize {
    text_content(sel).split_whitespace().count()
}

/// Get outer HTML content
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

// === Querying ===

/// Query all elements matching `selector`, rejecting malformed selectors.
///
/// `dom_query` treats an unparsable selector as "no match"; compiling the
/// [`Matcher`] first lets callers tell the two apart and log the failure.
pub fn select_checked<'a>(root: &Selection<'a>, selector: &str) -> Result<Selection<'a>> {
    let matcher = Matcher::new(selector).map_err(|_| Error::Selector {
        selector: selector.to_string(),
    })?;
    Ok(root.select_matcher(&matcher))
}

/// Split a selection into one selection per node, in document order.
#[must_use]
pub fn elements<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    sel.nodes().iter().map(|node| Selection::from(*node)).collect()
}

/// Document root (`<html>`) as a selection.
#[must_use]
pub fn root(doc: &Document) -> Selection<'_> {
    doc.select("html")
}

/// The `<body>` element, falling back to the root for body-less fragments.
#[must_use]
pub fn body(doc: &Document) -> Selection<'_> {
    first(&root(doc), "body").unwrap_or_else(|| root(doc))
}

/// First element under `root` matching `selector`, like `querySelector`.
#[must_use]
pub fn first<'a>(root: &Selection<'a>, selector: &str) -> Option<Selection<'a>> {
    root.select(selector)
        .nodes()
        .first()
        .map(|node| Selection::from(*node))
}

// === Tree Manipulation ===

/// Remove elements from tree
#[inline]
pub fn remove(sel: &Selection) {
    sel.remove();
}

/// Clone an element and all its descendants into a new, detached document.
///
/// The clone re-parses the element's outer HTML, so later removals on it can
/// never reach the source tree. Select the copy back out with [`body`].
#[must_use]
pub fn detached_copy(sel: &Selection) -> Document {
    Document::from(outer_html(sel))
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_and_id_is_lowercased_and_joined() {
        let doc = parse(r#"<div class="Post-Content Wide" id="Main">x</div>"#);
        let div = doc.select("div");
        assert_eq!(class_and_id(&div), "post-content wide main");
    }

    #[test]
    fn class_and_id_handles_missing_attributes() {
        let doc = parse("<div>x</div>");
        assert_eq!(class_and_id(&doc.select("div")), " ");
    }

    #[test]
    fn select_checked_rejects_malformed_selector() {
        let doc = parse("<div><p>text</p></div>");
        let root = root(&doc);
        assert!(matches!(
            select_checked(&root, "p[[["),
            Err(Error::Selector { .. })
        ));
        assert_eq!(select_checked(&root, "p").map(|s| s.length()).ok(), Some(1));
    }

    #[test]
    fn detached_copy_does_not_touch_source() {
        let doc = parse("<article><p>keep</p><nav>menu</nav></article>");
        let copy = detached_copy(&doc.select("article"));
        remove(&copy.select("nav"));

        assert!(!text_content(&body(&copy)).contains("menu"));
        assert!(text_content(&doc.select("article")).contains("menu"));
    }

    #[test]
    fn block_text_breaks_lines_at_blocks() {
        let doc = parse("<div><h2>Title</h2><p>one<br>two</p><p>three <b>bold</b></p><script>x()</script></div>");
        assert_eq!(block_text(&doc.select("div")), "\nTitle\n\none\ntwo\n\nthree bold\n");
    }

    #[test]
    fn word_count_splits_on_any_whitespace() {
        let doc = parse("<p>one\ttwo\n three   four</p>");
        assert_eq!(word_count(&doc.select("p")), 4);
    }

    #[test]
    fn tag_name_is_lowercase() {
        let doc = parse("<SECTION>x</SECTION>");
        assert_eq!(tag_name(&doc.select("section")).as_deref(), Some("section"));
    }
}
