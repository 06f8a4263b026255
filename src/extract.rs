//! Extraction orchestrator.
//!
//! Routes a page to the PDF path or the HTML path and assembles the
//! [`ExtractedContent`] record.
//!
//! HTML path: overlay suppression (live document) → main-content selection →
//! filtering (detached copy) → normalization → language detection.

use tracing::{debug, instrument};

use crate::dom;
use crate::error::{Error, Result};
use crate::html_processing::filter_content;
use crate::language::{detect_language, detect_pdf_language, LanguageSignals};
use crate::metadata::extract_metadata;
use crate::normalize::fit_text;
use crate::options::Options;
use crate::overlay::remove_overlays;
use crate::page::{Page, RenderSource};
use crate::pdf;
use crate::result::{ContentSource, ExtractedContent};
use crate::selector::select_main_content;

/// Extract from a page snapshot.
///
/// PDF views run harvest tiers (a), (b) and (d); a snapshot cannot change,
/// so the render wait is skipped.
#[instrument(skip_all, fields(url = %page.url()))]
pub fn extract_page(page: &mut Page, options: &Options) -> Result<ExtractedContent> {
    if pdf::is_pdf_page(page.document(), page.url()) {
        debug!("pdf view detected");
        let text = pdf::extract_pdf_text(page.document(), options)?;
        return Ok(pdf_record(page, text, options));
    }
    extract_html(page, options)
}

/// Extract from a page that may still be rendering.
///
/// Same as [`extract_page`], except that PDF views whose text has not
/// appeared yet are polled through `source` for up to
/// `options.pdf_wait_timeout`.
#[instrument(skip_all, fields(url = %page.url()))]
pub async fn extract_live(
    page: &mut Page,
    source: &mut impl RenderSource,
    options: &Options,
) -> Result<ExtractedContent> {
    if pdf::is_pdf_page(page.document(), page.url()) {
        debug!("pdf view detected");
        let text = pdf::extract_pdf_text_live(page, source, options).await?;
        return Ok(pdf_record(page, text, options));
    }
    extract_html(page, options)
}

fn pdf_record(page: &Page, text: String, options: &Options) -> ExtractedContent {
    let raw_title = dom::first(&dom::root(page.document()), "title")
        .map(|t| dom::text_content(&t).to_string())
        .unwrap_or_default();
    let title = pdf::resolve_title(&raw_title, page.url());

    let signals = LanguageSignals::for_pdf(page.url(), &text, &title);
    let language = detect_pdf_language(&signals, options);

    ExtractedContent::new(
        title,
        page.url().to_string(),
        text,
        language.to_string(),
        ContentSource::Pdf,
    )
}

fn extract_html(page: &Page, options: &Options) -> Result<ExtractedContent> {
    let doc = page.document();
    let metadata = extract_metadata(doc);

    remove_overlays(doc, page.rendering(), options);

    let base = page.base_url();
    let main = select_main_content(doc, page.rendering(), options);

    let filtered = filter_content(main.as_ref(), doc, base.as_ref(), options);
    let raw = dom::block_text(&dom::body(&filtered));
    let mut content = fit_text(&raw, options.min_content_words);
    let mut words = raw.split_whitespace().count();

    // The selected element may have lost everything to filtering; the whole
    // body is the last resort.
    if content.is_empty() && main.is_some() {
        debug!(words, "selected content too thin, filtering body");
        let filtered = filter_content(None, doc, base.as_ref(), options);
        let raw = dom::block_text(&dom::body(&filtered));
        content = fit_text(&raw, options.min_content_words);
        words = words.max(raw.split_whitespace().count());
    }

    if content.is_empty() {
        return Err(Error::InsufficientContent { words });
    }

    let title = metadata.title.clone().unwrap_or_default();
    let signals = LanguageSignals::from_document(doc, page.url(), &content, &title);
    let language = detect_language(&signals, options);

    debug!(words = content.split_whitespace().count(), language, "html content extracted");
    Ok(ExtractedContent::new(
        title,
        page.url().to_string(),
        content,
        language.to_string(),
        ContentSource::Html,
    )
    .with_metadata(metadata))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prose(words: usize) -> String {
        let base = ["the", "river", "flows", "past", "an", "old", "mill", "and", "into", "town"];
        (0..words).map(|i| base[i % base.len()]).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_html_record() {
        let html = format!(
            r#"<html lang="en"><head><title>Mill</title><meta name="author" content="Jane Roe"></head>
            <body><nav>Home About</nav><article><p>{}</p></article></body></html>"#,
            prose(80)
        );
        let mut page = Page::new(&html, "https://example.org/mill");
        let record = extract_page(&mut page, &Options::default()).unwrap();
        assert_eq!(record.title, "Mill");
        assert_eq!(record.word_count, 80);
        assert_eq!(record.reading_time, 1);
        assert_eq!(record.language, "en");
        assert_eq!(record.byline.as_deref(), Some("Jane Roe"));
        assert_eq!(record.source, ContentSource::Html);
        assert!(!record.content.contains("Home"));
    }

    #[test]
    fn test_thin_page_is_insufficient() {
        let mut page = Page::new("<body><p>only four words here</p></body>", "about:blank");
        match extract_page(&mut page, &Options::default()) {
            Err(Error::InsufficientContent { words }) => assert_eq!(words, 4),
            other => panic!("expected InsufficientContent, got {other:?}"),
        }
    }

    #[test]
    fn test_filtered_selection_falls_back_to_body() {
        // The article is selected, but all its text sits in a form.
        let html = format!(
            r#"<body><article><form><label>{}</label></form></article><div>{}</div></body>"#,
            prose(60),
            prose(30)
        );
        let mut page = Page::new(&html, "about:blank");
        let record = extract_page(&mut page, &Options::default()).unwrap();
        assert_eq!(record.word_count, 30);
    }
}
