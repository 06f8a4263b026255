//! Content Filtering
//!
//! Strips boilerplate from the selected content. All removals happen on a
//! detached copy; the live document is only read.

use tracing::{debug, warn};
use url::Url;

use crate::dom::{self, Document, Selection};
use crate::link_density::external_links;
use crate::options::Options;
use crate::patterns::{EXCLUDED_SELECTORS, EXCLUDED_TAGS};

/// Return a cleaned, detached copy of `root`.
///
/// With no root, the live document's `<body>` is copied instead. Steps:
///
/// 1. copy the subtree;
/// 2. drop [`EXCLUDED_TAGS`];
/// 3. drop [`EXCLUDED_SELECTORS`] plus `options.extra_excluded_selectors`,
///    skipping any selector that fails to parse;
/// 4. when external anchors (other host than `base`) carry more than
///    `options.external_link_ratio` of the text, drop those anchors.
///
/// Read the result back with [`dom::body`].
#[must_use]
pub fn filter_content(
    root: Option<&Selection>,
    live: &Document,
    base: Option<&Url>,
    options: &Options,
) -> Document {
    let copy = match root {
        Some(root) => dom::detached_copy(root),
        None => dom::detached_copy(&dom::body(live)),
    };
    let content = copied_root(&copy, root.is_some());
    remove_excluded_tags(&content);
    remove_excluded_selectors(&content, options);
    remove_external_links(&content, base, options.external_link_ratio);

    copy
}

/// The element the passes run under. Queries only reach descendants, so the
/// copied root itself is never matched by an exclusion rule.
fn copied_root(copy: &Document, has_root: bool) -> Selection<'_> {
    let body = dom::body(copy);
    if has_root {
        dom::first(&body, "*").unwrap_or(body)
    } else {
        body
    }
}

/// Remove every excluded tag in one combined query.
fn remove_excluded_tags(content: &Selection) {
    let combined = EXCLUDED_TAGS.join(", ");
    let matches = content.select(&combined);
    if matches.exists() {
        debug!(count = matches.length(), "removing excluded tags");
        dom::remove(&matches);
    }
}

/// Remove matches of each exclusion selector. Failures are logged and skipped.
fn remove_excluded_selectors(content: &Selection, options: &Options) {
    let selectors = EXCLUDED_SELECTORS
        .iter()
        .copied()
        .chain(options.extra_excluded_selectors.iter().map(String::as_str));

    for selector in selectors {
        match dom::select_checked(content, selector) {
            Ok(matches) => dom::remove(&matches),
            Err(err) => warn!(%err, "skipping exclusion selector"),
        }
    }
}

/// Drop external anchors when they dominate the text.
fn remove_external_links(content: &Selection, base: Option<&Url>, max_ratio: f64) {
    let total = dom::text_len(content);
    let (links, external_len) = external_links(content, base);
    if links.is_empty() {
        return;
    }

    if external_len as f64 > total as f64 * max_ratio {
        debug!(
            links = links.len(),
            external_len, total, "removing link-dominated external anchors"
        );
        for link in &links {
            dom::remove(link);
        }
    }
}
