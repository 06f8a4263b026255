//! Link Density
//!
//! Measures how much of an element's text sits inside anchors. The density
//! scorer uses the ratio as a per-element penalty; the content filter uses the
//! external-link share to decide whether outbound links are boilerplate.

use dom_query::Selection;
use url::Url;

use crate::dom;

/// Aggregated anchor text of one subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkInfo {
    /// Anchors found.
    pub links: usize,
    /// Characters of anchor text.
    pub link_text_len: usize,
}

/// Collect anchor counts and text length under `element`.
#[must_use]
pub fn collect_link_info(element: &Selection) -> LinkInfo {
    let mut info = LinkInfo::default();
    for link in dom::elements(&element.select("a")) {
        info.links += 1;
        info.link_text_len += dom::text_len(&link);
    }
    info
}

/// Fraction of `text_len` contributed by anchor text.
///
/// The denominator is floored at one, so an element without text has a
/// density of zero unless it somehow holds anchor text.
#[must_use]
pub fn link_density(element: &Selection, text_len: usize) -> f64 {
    let info = collect_link_info(element);
    info.link_text_len as f64 / text_len.max(1) as f64
}

/// Whether `href` leaves the page's host.
///
/// Relative links resolve against `base` and so never count as external.
/// Non-HTTP schemes (`mailto:`, `javascript:`) are not outbound web links.
/// Without a usable base, any absolute HTTP link counts as external.
#[must_use]
pub fn is_external_href(href: &str, base: Option<&Url>) -> bool {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return false;
    }

    let resolved = match base {
        Some(base) => base.join(href).ok(),
        None => Url::parse(href).ok(),
    };
    let Some(resolved) = resolved else {
        return false;
    };
    if !matches!(resolved.scheme(), "http" | "https") {
        return false;
    }

    let page_host = base.and_then(Url::host_str);
    match (resolved.host_str(), page_host) {
        (Some(link_host), Some(page_host)) => !link_host.eq_ignore_ascii_case(page_host),
        (Some(_), None) => true,
        _ => false,
    }
}

/// External anchors under `element` and their summed text length.
#[must_use]
pub fn external_links<'a>(element: &Selection<'a>, base: Option<&Url>) -> (Vec<Selection<'a>>, usize) {
    let mut links = Vec::new();
    let mut text_len = 0;

    for link in dom::elements(&element.select("a[href]")) {
        let href = dom::get_attribute(&link, "href").unwrap_or_default();
        if is_external_href(&href, base) {
            text_len += dom::text_len(&link);
            links.push(link);
        }
    }

    (links, text_len)
}
