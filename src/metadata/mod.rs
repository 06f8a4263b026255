//! Metadata extraction module.
//!
//! Title, byline and site name for the HTML path. Sources are tried in order
//! and the first non-empty value wins:
//!
//! 1. `<title>`
//! 2. meta tags (`og:title`, `author`, `og:site_name`, ...)
//! 3. DOM fallbacks (first `<h1>`, `[rel=author]`, `.byline`)

pub mod dom_extraction;
pub mod meta_tags;

use dom_query::Document;

use crate::result::Metadata;

pub use dom_extraction::{examine_title_element, extract_dom_author, extract_dom_title};
pub use meta_tags::{examine_meta, validate_metadata_name};

/// Extract all metadata from a document.
#[must_use]
pub fn extract_metadata(doc: &Document) -> Metadata {
    let metadata = Metadata {
        title: examine_title_element(doc),
        ..Metadata::default()
    };

    let metadata = meta_tags::examine_meta(doc, metadata);
    let metadata = dom_extraction::extract_dom_title(doc, metadata);
    dom_extraction::extract_dom_author(doc, metadata)
}
