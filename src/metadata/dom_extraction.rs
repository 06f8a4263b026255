//! DOM-based metadata fallbacks.

use dom_query::Document;

use crate::dom;
use crate::metadata::meta_tags::validate_metadata_name;
use crate::result::Metadata;

/// Elements that commonly hold the author line.
const AUTHOR_SELECTORS: &[&str] = &[
    r#"[rel="author"]"#,
    r#"[itemprop="author"]"#,
    ".byline",
    ".author-name",
    ".author",
];

/// Byline prefixes stripped before validation.
const BYLINE_PREFIXES: &[&str] = &["by ", "bởi ", "tác giả:", "author:"];

/// Trimmed `<title>` text, `None` when absent or blank.
#[must_use]
pub fn examine_title_element(doc: &Document) -> Option<String> {
    let title = dom::first(&dom::root(doc), "title")?;
    let title = dom::text_content(&title).trim().to_string();
    (!title.is_empty()).then_some(title)
}

/// Fill a missing title from the first `<h1>`.
#[must_use]
pub fn extract_dom_title(doc: &Document, original: Metadata) -> Metadata {
    let mut result = original;
    if result.title.is_some() {
        return result;
    }

    if let Some(h1) = dom::first(&dom::root(doc), "h1") {
        let text = dom::text_content(&h1).split_whitespace().collect::<Vec<_>>().join(" ");
        if !text.is_empty() {
            result.title = Some(text);
        }
    }
    result
}

/// Fill a missing author from byline elements.
#[must_use]
pub fn extract_dom_author(doc: &Document, original: Metadata) -> Metadata {
    let mut result = original;
    if result.author.is_some() {
        return result;
    }

    let root = dom::root(doc);
    for selector in AUTHOR_SELECTORS {
        let Some(el) = dom::first(&root, selector) else {
            continue;
        };
        let text = dom::text_content(&el).split_whitespace().collect::<Vec<_>>().join(" ");
        let name = strip_byline_prefix(&text);
        if validate_metadata_name(name) {
            result.author = Some(name.to_string());
            break;
        }
    }
    result
}

fn strip_byline_prefix(text: &str) -> &str {
    let lower = text.to_lowercase();
    for prefix in BYLINE_PREFIXES {
        if lower.starts_with(prefix) {
            // Prefixes are matched on the lowercased copy; slice the original
            // at the same char count.
            let skip = prefix.chars().count();
            let start = text.char_indices().nth(skip).map_or(text.len(), |(i, _)| i);
            return text[start..].trim();
        }
    }
    text.trim()
}
