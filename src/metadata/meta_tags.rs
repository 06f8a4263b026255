//! HTML Meta Tag Extraction
//!
//! Reads standard, Open Graph, Twitter card and Dublin Core meta tags.

use dom_query::{Document, Selection};

use crate::dom;
use crate::result::Metadata;

/// Examine HTML meta tags for metadata, keeping values already present in
/// `original`.
#[must_use]
pub fn examine_meta(doc: &Document, original: Metadata) -> Metadata {
    let mut result = original;

    for node in doc.select("meta").nodes() {
        let meta = Selection::from(*node);

        let name = dom::get_attribute(&meta, "name")
            .or_else(|| dom::get_attribute(&meta, "property"))
            .or_else(|| dom::get_attribute(&meta, "itemprop"))
            .unwrap_or_default()
            .to_lowercase();

        let content = dom::get_attribute(&meta, "content")
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        if name.is_empty() || content.is_empty() {
            continue;
        }

        match name.as_str() {
            "author" | "article:author" | "dc.creator" | "dc.contributor" | "byl"
            | "sailthru.author" | "parsely-author" | "twitter:creator" => {
                if result.author.is_none() && validate_metadata_name(&content) {
                    result.author = Some(content);
                }
            }

            "og:title" | "twitter:title" | "dc.title" | "sailthru.title" | "parsely-title"
            | "title" => {
                if result.title.is_none() {
                    result.title = Some(content);
                }
            }

            "og:site_name" | "application-name" | "publisher" | "dc.publisher" => {
                if result.sitename.is_none() {
                    result.sitename = Some(content);
                }
            }

            _ => {}
        }
    }

    result
}

/// Validate that a string looks like a person's name rather than a URL,
/// an ID or a JSON blob.
#[must_use]
pub fn validate_metadata_name(name: &str) -> bool {
    let name = name.trim();

    if name.len() < 2 || name.len() > 120 {
        return false;
    }

    // Long single tokens are handles or slugs, not names
    if name.len() > 20 && !name.contains(' ') {
        return false;
    }

    if name.starts_with("http://") || name.starts_with("https://") || name.starts_with("www.") {
        return false;
    }

    if name.starts_with('{') || name.starts_with('[') {
        return false;
    }

    let digit_count = name.chars().filter(char::is_ascii_digit).count();
    if digit_count > 3 {
        return false;
    }

    let special_count = name
        .chars()
        .filter(|c| {
            !c.is_alphanumeric() && !c.is_whitespace() && *c != '-' && *c != '\'' && *c != '.'
        })
        .count();

    special_count <= 2
}
