//! Result types for extraction output.
//!
//! [`ExtractedContent`] is the one record an extraction produces. It
//! serializes with camelCase field names so hosts can pass it straight to a
//! summarization request.

use serde::{Deserialize, Serialize};

/// Reading speed used for `reading_time`.
pub const WORDS_PER_MINUTE: usize = 200;

/// Which pipeline produced the content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    #[default]
    Html,
    Pdf,
}

/// Normalized main content of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedContent {
    /// Page or document title.
    pub title: String,

    /// URL the content was extracted from.
    pub url: String,

    /// Normalized plain text.
    pub content: String,

    /// Author line (HTML pages only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byline: Option<String>,

    /// Publishing site name (HTML pages only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,

    /// Whitespace-delimited tokens in `content`.
    pub word_count: usize,

    /// Minutes at 200 words per minute, rounded up.
    pub reading_time: usize,

    /// Two-letter language code.
    pub language: String,

    /// HTML or PDF path.
    pub source: ContentSource,
}

impl ExtractedContent {
    /// Build a record, deriving `word_count` and `reading_time` from `content`.
    #[must_use]
    pub fn new(
        title: String,
        url: String,
        content: String,
        language: String,
        source: ContentSource,
    ) -> Self {
        let word_count = content.split_whitespace().count();
        Self {
            title,
            url,
            content,
            byline: None,
            site_name: None,
            word_count,
            reading_time: word_count.div_ceil(WORDS_PER_MINUTE),
            language,
            source,
        }
    }

    /// Attach HTML metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.byline = metadata.author;
        self.site_name = metadata.sitename;
        self
    }
}

/// Page metadata gathered from meta tags and the DOM.
///
/// All fields are optional as metadata may not be present in all documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Page title.
    pub title: Option<String>,

    /// Author name(s).
    pub author: Option<String>,

    /// Site name.
    pub sitename: Option<String>,
}
