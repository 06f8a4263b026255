//! PDF views.
//!
//! Reads text a browser's PDF viewer has already rendered into the page. No
//! PDF bytes are parsed. Text comes from a waterfall of harvesters:
//!
//! - (a) text-layer spans, grouped per layer
//! - (b) spans inside numbered page containers
//! - (c) a bounded wait for either to appear, then (a) and (b) again
//! - (d) whatever text the viewer containers, or the body, hold
//!
//! The first harvester to return more than `pdf_min_tier_chars` characters
//! wins. Its output goes through [`clean_pdf_text`].

use std::collections::HashMap;

use dom_query::{Document, Selection};
use tracing::{debug, warn};
use url::Url;

use crate::dom;
use crate::error::{Error, FailureCause, Result};
use crate::normalize::{dedup_lines, normalize_whitespace};
use crate::options::Options;
use crate::page::{Page, RenderSource};
use crate::patterns::{
    BROWSER_TITLE_SUFFIX, GENERIC_PDF_TITLES, MULTIPLE_NEWLINES, PAGE_NUMBER_LINE, PAGE_OF_LINE,
    PDF_EMBED_SELECTOR, PDF_PAGE_SELECTOR, PDF_TITLE_SUFFIX, PDF_VIEWER_SELECTORS,
    TEXT_LAYER_SELECTOR,
};

/// Title used when neither the page title nor the URL name the document.
pub const DEFAULT_PDF_TITLE: &str = "PDF Document";

/// A line seen this many times is a running header or footer.
const REPEATED_LINE_MIN: usize = 3;

/// Titles shorter than this are replaced by the URL file name.
const MIN_TITLE_CHARS: usize = 3;

/// Whether the page shows a PDF.
///
/// True when the URL mentions `.pdf`, a PDF plugin is embedded, the pdf.js
/// text layer and numbered pages are both present, any viewer container is
/// present, or the title mentions `.pdf` or `PDF`.
#[must_use]
pub fn is_pdf_page(doc: &Document, url: &str) -> bool {
    if url.to_lowercase().contains(".pdf") {
        return true;
    }

    let root = dom::root(doc);
    if root.select(PDF_EMBED_SELECTOR).exists() {
        return true;
    }
    if root.select(TEXT_LAYER_SELECTOR).exists() && root.select(PDF_PAGE_SELECTOR).exists() {
        return true;
    }
    if PDF_VIEWER_SELECTORS
        .iter()
        .any(|selector| root.select(selector).exists())
    {
        return true;
    }

    let title = document_title(doc);
    title.to_lowercase().contains(".pdf") || title.contains("PDF")
}

/// Trimmed `<title>` text, empty when absent.
fn document_title(doc: &Document) -> String {
    dom::first(&dom::root(doc), "title")
        .map(|t| dom::text_content(&t).trim().to_string())
        .unwrap_or_default()
}

/// Turn a viewer's title into a document title.
///
/// Strips a `.pdf` suffix, browser names and anything after `|`. Short or
/// generic results fall back to the URL's file name (percent-decoded, without
/// extension), then to [`DEFAULT_PDF_TITLE`].
///
/// ```
/// use fit_content::pdf::resolve_title;
///
/// assert_eq!(
///     resolve_title("Annual Report 2024.pdf - Google Chrome", "https://a.example/x.pdf"),
///     "Annual Report 2024"
/// );
/// assert_eq!(
///     resolve_title("PDF", "https://a.example/files/Q3%20Results.pdf"),
///     "Q3 Results"
/// );
/// ```
#[must_use]
pub fn resolve_title(raw_title: &str, url: &str) -> String {
    let title = raw_title.split('|').next().unwrap_or_default();
    let title = BROWSER_TITLE_SUFFIX.replace(title.trim(), "");
    let title = PDF_TITLE_SUFFIX.replace(title.trim(), "");
    let title = title.trim();

    let generic = GENERIC_PDF_TITLES.contains(&title.to_lowercase().as_str());
    if title.chars().count() >= MIN_TITLE_CHARS && !generic {
        return title.to_string();
    }

    title_from_url(url).unwrap_or_else(|| DEFAULT_PDF_TITLE.to_string())
}

/// Last path segment, percent-decoded, extension dropped.
fn title_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed
        .path_segments()?
        .rev()
        .find(|segment| !segment.is_empty())?;
    let decoded = urlencoding::decode(segment).ok()?;
    let stem = match decoded.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => decoded.as_ref(),
    };
    let stem = stem.trim();
    (!stem.is_empty()).then(|| stem.to_string())
}

// =============================================================================
// Harvesters
// =============================================================================

/// Text of the leaf spans under `container`, one span per line.
fn span_lines(container: &Selection) -> Vec<String> {
    dom::elements(&container.select("span"))
        .into_iter()
        // Marked-content wrappers hold other spans; read only the leaves.
        .filter(|span| !span.select("span").exists())
        .map(|span| dom::text_content(&span).trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Join per-page span text: lines by `\n`, pages by a blank line.
fn harvest_spans(doc: &Document, page_selector: &str) -> String {
    dom::elements(&dom::root(doc).select(page_selector))
        .iter()
        .map(|page| span_lines(page).join("\n"))
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Tier (a): every text layer, one page each.
#[must_use]
pub fn text_layer_text(doc: &Document) -> String {
    harvest_spans(doc, TEXT_LAYER_SELECTOR)
}

/// Tier (b): numbered page containers.
#[must_use]
pub fn page_container_text(doc: &Document) -> String {
    harvest_spans(doc, PDF_PAGE_SELECTOR)
}

/// Tier (d): the first viewer container with text, else the body.
#[must_use]
pub fn viewer_text(doc: &Document) -> String {
    let root = dom::root(doc);
    PDF_VIEWER_SELECTORS
        .iter()
        .filter_map(|selector| dom::first(&root, selector))
        .map(|viewer| dom::text_content(&viewer).to_string())
        .find(|text| !text.trim().is_empty())
        .unwrap_or_else(|| dom::text_content(&dom::body(doc)).to_string())
}

/// One harvester of the waterfall.
type Harvester = fn(&Document) -> String;

const SPAN_TIERS: &[(&str, Harvester)] = &[
    ("text-layer", text_layer_text),
    ("page-containers", page_container_text),
];

/// Try (a) then (b); the first over the threshold wins.
fn harvest_span_tiers(doc: &Document, options: &Options) -> Option<String> {
    SPAN_TIERS.iter().find_map(|(tier, harvest)| {
        let text = harvest(doc);
        let chars = text.trim().chars().count();
        if chars > options.pdf_min_tier_chars {
            debug!(tier, chars, "pdf text harvested");
            Some(text)
        } else {
            None
        }
    })
}

/// Whether a viewer has put any text into a text layer or page container.
fn has_rendered_text(doc: &Document) -> bool {
    !text_layer_text(doc).is_empty() || !page_container_text(doc).is_empty()
}

/// Wait until the viewer has rendered text, polling `source` for newer
/// renders.
///
/// Checks immediately, then every `pdf_poll_interval` until
/// `pdf_wait_timeout` has passed, yielding to the runtime between polls.
pub async fn wait_for_text_layer(
    page: &mut Page,
    source: &mut impl RenderSource,
    options: &Options,
) -> Result<()> {
    let timeout = options.pdf_wait_timeout();
    let interval = options.pdf_poll_interval();
    let start = tokio::time::Instant::now();

    loop {
        if let Some(html) = source.current_html() {
            page.reload(&html);
        }
        if has_rendered_text(page.document()) {
            debug!(waited = ?start.elapsed(), "pdf text layer ready");
            return Ok(());
        }

        let waited = start.elapsed();
        if waited >= timeout {
            return Err(Error::Timeout { waited });
        }
        tokio::time::sleep(interval.min(timeout - waited)).await;
    }
}

/// Extract PDF text from a snapshot: tiers (a), (b) and (d).
pub fn extract_pdf_text(doc: &Document, options: &Options) -> Result<String> {
    let raw = harvest_span_tiers(doc, options).unwrap_or_else(|| fallback_text(doc, options));
    finish(doc, &raw, false, options)
}

/// Extract PDF text from a page that may still be rendering: tiers (a) to (d).
pub async fn extract_pdf_text_live(
    page: &mut Page,
    source: &mut impl RenderSource,
    options: &Options,
) -> Result<String> {
    if let Some(raw) = harvest_span_tiers(page.document(), options) {
        return finish(page.document(), &raw, false, options);
    }

    let mut timed_out = false;
    match wait_for_text_layer(page, source, options).await {
        Ok(()) => {
            if let Some(raw) = harvest_span_tiers(page.document(), options) {
                return finish(page.document(), &raw, false, options);
            }
        }
        Err(err) => {
            warn!(%err, "pdf render wait gave up");
            timed_out = true;
        }
    }

    let raw = fallback_text(page.document(), options);
    finish(page.document(), &raw, timed_out, options)
}

fn fallback_text(doc: &Document, options: &Options) -> String {
    let text = viewer_text(doc);
    debug!(
        tier = "viewer",
        chars = text.trim().chars().count(),
        min = options.pdf_min_tier_chars,
        "pdf text harvested"
    );
    text
}

/// Clean harvested text and enforce the minimum length.
fn finish(doc: &Document, raw: &str, timed_out: bool, options: &Options) -> Result<String> {
    let text = clean_pdf_text(raw);
    if text.chars().count() < options.pdf_min_chars {
        let cause = failure_cause(doc, timed_out);
        debug!(?cause, chars = text.chars().count(), "pdf extraction failed");
        return Err(Error::ExtractionFailure(cause));
    }
    Ok(text)
}

/// Best guess at why a PDF view yielded no text.
#[must_use]
pub fn failure_cause(doc: &Document, timed_out: bool) -> FailureCause {
    let root = dom::root(doc);
    if root.select(PDF_EMBED_SELECTOR).exists() {
        return FailureCause::Protected;
    }
    if timed_out {
        return FailureCause::StillLoading;
    }

    let has_pages = root.select(PDF_PAGE_SELECTOR).exists();
    let has_layer = root.select(TEXT_LAYER_SELECTOR).exists();
    if !has_pages && !has_layer {
        return FailureCause::StillLoading;
    }
    if !has_rendered_text(doc) {
        return FailureCause::ImageBased;
    }
    FailureCause::InsufficientText
}

// =============================================================================
// Cleaning
// =============================================================================

/// Normalize PDF text and strip pagination artifacts.
///
/// After whitespace normalization, drops page-number lines, `Page X of Y`
/// lines and any line that appears three or more times (running headers and
/// footers), then removes repeated long lines and squeezes blank lines.
#[must_use]
pub fn clean_pdf_text(raw: &str) -> String {
    let text = normalize_whitespace(raw);

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        *counts.entry(line).or_default() += 1;
    }

    let kept: Vec<&str> = text
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return true;
            }
            !(PAGE_NUMBER_LINE.is_match(trimmed)
                || PAGE_OF_LINE.is_match(trimmed)
                || counts.get(trimmed).copied().unwrap_or_default() >= REPEATED_LINE_MIN)
        })
        .collect();

    let text = dedup_lines(&kept.join("\n"));
    MULTIPLE_NEWLINES
        .replace_all(&text, "\n\n")
        .trim()
        .to_string()
}
