//! # fit-content
//!
//! Main-content extraction for rendered web pages and in-browser PDF views.
//!
//! Given a page, the library finds the element holding the article, strips
//! overlays and boilerplate, normalizes the text into a compact block suitable
//! for an LLM prompt, and detects the language the content is written in.
//!
//! ## Quick Start
//!
//! ```rust
//! use fit_content::extract;
//!
//! let body = "The quick brown fox jumps over the lazy dog. ".repeat(12);
//! let html = format!(
//!     "<html lang=\"en\"><head><title>My Article</title></head>\
//!      <body><nav>Home</nav><article><p>{body}</p></article></body></html>"
//! );
//!
//! let result = extract(&html, "https://example.com/post")?;
//! assert_eq!(result.title, "My Article");
//! assert_eq!(result.language, "en");
//! assert!(!result.content.contains("Home"));
//! # Ok::<(), fit_content::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Content Selection**: semantic probes, class-pattern probes, then a
//!   density score over every candidate container
//! - **Overlay Suppression**: fixed, high z-index, viewport-covering layers
//! - **Normalization**: whitespace collapse, short-line de-duplication
//! - **Language Detection**: Vietnamese, English, Chinese, Japanese, Korean
//! - **PDF Views**: text-layer harvest with a bounded render wait

mod error;
mod extract;
mod options;
mod patterns;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Host rendering model: computed styles, boxes and the viewport.
pub mod render;

/// Live page handle and render sources.
pub mod page;

/// Overlay and modal suppression.
pub mod overlay;

/// Main-content selection strategies.
pub mod selector;

/// Content density scoring.
pub mod scoring;

/// Link density testing for boilerplate detection.
pub mod link_density;

/// Boilerplate filtering on a detached copy.
pub mod html_processing;

/// Text normalization and de-duplication.
pub mod normalize;

/// Layered language detection.
pub mod language;

/// In-browser PDF viewer extraction.
pub mod pdf;

/// Title, byline and site-name extraction.
pub mod metadata;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Summarization request and result records.
pub mod summary;

/// Settings, usage and history persistence.
pub mod storage;

// Public API - re-exports
pub use error::{Error, FailureCause, Result};
pub use extract::{extract_live, extract_page};
pub use options::{Options, ScoringWeights};
pub use page::{Frozen, Page, RenderSource};
pub use render::{InlineStyles, Rendering};
pub use result::{ContentSource, ExtractedContent, Metadata};

/// Extracts main content from an HTML snapshot using default options.
///
/// # Example
///
/// ```rust
/// use fit_content::{extract, Error};
///
/// let result = extract("<body><p>Too short.</p></body>", "about:blank");
/// assert!(matches!(result, Err(Error::InsufficientContent { .. })));
/// ```
pub fn extract(html: &str, url: &str) -> Result<ExtractedContent> {
    extract_with_options(html, url, &Options::default())
}

/// Extracts main content from an HTML snapshot with custom options.
///
/// The snapshot cannot change, so a PDF view that has not rendered its text
/// yet is reported as such instead of waited on; use [`extract_live`] for
/// that.
///
/// # Example
///
/// ```rust
/// use fit_content::{extract_with_options, Options};
///
/// let html = "<body><article><p>one two three four five six</p></article></body>";
/// let options = Options {
///     min_content_words: 5,
///     ..Options::default()
/// };
/// let result = extract_with_options(html, "about:blank", &options)?;
/// assert_eq!(result.word_count, 6);
/// # Ok::<(), fit_content::Error>(())
/// ```
pub fn extract_with_options(html: &str, url: &str, options: &Options) -> Result<ExtractedContent> {
    let mut page = Page::new(html, url);
    extract_page(&mut page, options)
}

/// Extracts main content from HTML bytes with automatic encoding detection.
///
/// The encoding comes from a byte-order mark, then a `<meta charset>` or
/// `http-equiv` declaration, and defaults to UTF-8. Invalid sequences are
/// replaced with U+FFFD rather than causing errors.
///
/// # Example
///
/// ```rust
/// use fit_content::extract_bytes;
///
/// let mut html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><article><p>Caf\xE9".to_vec();
/// html.extend_from_slice(b" on the corner serves coffee and bread every single morning</p></article></body></html>");
/// let result = extract_bytes(&html, "about:blank")?;
/// assert!(result.content.contains("Café"));
/// # Ok::<(), fit_content::Error>(())
/// ```
pub fn extract_bytes(html: &[u8], url: &str) -> Result<ExtractedContent> {
    let html_str = encoding::transcode_to_utf8(html);
    extract(&html_str, url)
}
