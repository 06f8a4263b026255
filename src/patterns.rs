//! Compiled regex patterns and CSS selectors for content extraction.
//!
//! All patterns are compiled once using `LazyLock`. Selector lists are plain
//! string slices; their order is their priority wherever a list is probed
//! first-match-wins.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Overlay Suppression
// =============================================================================

/// Candidate overlay selectors. Matches are classified before removal.
pub const OVERLAY_SELECTORS: &[&str] = &[
    // Fixed position overlays
    r#"[style*="position: fixed"]"#,
    r#"[style*="position:fixed"]"#,
    // Common overlay classes
    ".modal",
    ".popup",
    ".overlay",
    ".lightbox",
    ".dialog",
    ".cookie-banner",
    ".newsletter-popup",
    ".subscription-modal",
    ".ad-overlay",
    ".video-overlay",
    ".social-overlay",
    // Stacking-order markers
    r#"[style*="z-index: 999"]"#,
    r#"[style*="z-index:999"]"#,
    r#"[style*="z-index: 9999"]"#,
    r#"[style*="z-index:9999"]"#,
    // Invisible elements that may reappear
    r#"[style*="opacity: 0"]"#,
    r#"[style*="opacity:0"]"#,
    r#"[style*="visibility: hidden"]"#,
    r#"[style*="visibility:hidden"]"#,
];

/// Class list tokens that mark an element as an overlay.
pub static OVERLAY_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)modal|popup|overlay|dialog").expect("OVERLAY_CLASS regex"));

// =============================================================================
// Content Selection
// =============================================================================

/// Tier 1: semantic containers, highest priority first.
pub const SEMANTIC_SELECTORS: &[&str] = &[
    "article",
    "main",
    r#"[role="main"]"#,
    r#"[role="article"]"#,
    r#"section[class*="content"]"#,
    r#"section[class*="article"]"#,
    r#"section[class*="post"]"#,
];

/// Tier 2: common CMS content classes, then localized news-site patterns.
pub const CONTENT_CLASS_SELECTORS: &[&str] = &[
    ".post-content",
    ".entry-content",
    ".article-content",
    ".content-body",
    ".post-body",
    ".article-body",
    ".story-body",
    ".news-content",
    ".article-text",
    ".post-text",
    ".content-main",
    ".main-content",
    ".page-content",
    ".single-content",
    ".blog-content",
    // Vietnamese news sites
    ".news-detail",
    ".detail-content",
    ".article-detail",
    ".tin-tuc-content",
    ".bai-viet-content",
];

/// Tier 3: every element the density scorer considers.
pub const CONTAINER_SELECTOR: &str = "div, section, article, main, aside";

/// Class/id substrings that raise a container's density score.
pub const CONTENT_KEYWORDS: &[&str] = &[
    "content", "article", "post", "story", "news", "text", "body", "main",
];

/// Class/id substrings that halve a container's density score, each.
pub const NON_CONTENT_KEYWORDS: &[&str] = &[
    "nav", "menu", "sidebar", "footer", "header", "advertisement", "ad", "comment", "social",
    "share", "related", "recommend", "popup", "modal", "overlay", "banner", "promo", "widget",
    "tag", "category", "breadcrumb", "pagination", "search", "filter", "toolbar", "form",
];

// =============================================================================
// Content Filtering
// =============================================================================

/// Tags dropped from the selected content wholesale.
pub const EXCLUDED_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "embed", "object", "nav", "header", "footer",
    "aside", "form", "button", "input", "select", "textarea", "label",
];

/// Boilerplate selectors dropped from the selected content.
pub const EXCLUDED_SELECTORS: &[&str] = &[
    ".advertisement",
    ".ad",
    ".ads",
    ".social-share",
    ".comments",
    ".related-posts",
    ".sidebar",
    ".menu",
    ".navigation",
    ".breadcrumb",
    ".tags",
    ".categories",
    ".author-bio",
    ".popup",
    ".modal",
    ".overlay",
    ".banner",
    ".promo",
    r#"[class*="ad-"]"#,
    r#"[id*="ad-"]"#,
    r#"[class*="advertisement"]"#,
    r#"[class*="social"]"#,
    r#"[class*="share"]"#,
    r#"[class*="comment"]"#,
    r#"[class*="related"]"#,
    r#"[class*="recommend"]"#,
    r#"[class*="widget"]"#,
    // Vietnamese news sites: ads, related, comments, share, social
    ".quang-cao",
    ".lien-quan",
    ".binh-luan",
    ".chia-se",
    ".mxh",
];

// =============================================================================
// Language Detection
// =============================================================================

/// Vietnamese letters with diacritics.
pub static VIETNAMESE_DIACRITICS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[àáạảãâầấậẩẫăằắặẳẵèéẹẻẽêềếệểễìíịỉĩòóọỏõôồốộổỗơờớợởỡùúụủũưừứựửữỳýỵỷỹđ]",
    )
    .expect("VIETNAMESE_DIACRITICS regex")
});

/// Frequent Vietnamese function words and news vocabulary.
pub static VIETNAMESE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(và|của|trong|với|cho|từ|đến|về|sau|trước|theo|như|để|khi|nếu|vì|nhưng|mà|hay|hoặc|các|những|này|đó|được|có thể|sẽ|đã|đang|việt nam|tổng thống|chính phủ|doanh nghiệp|thị trường|kinh tế|tài chính|chứng khoán)\b",
    )
    .expect("VIETNAMESE_WORDS regex")
});

/// Frequent English function words.
pub static ENGLISH_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(the|and|of|in|to|for|with|on|at|by|from|as|is|was|are|were|be|been|have|has|had|do|does|did|will|would|could|should|may|might|can|must|shall|this|that|these|those|a|an)\b",
    )
    .expect("ENGLISH_WORDS regex")
});

/// CJK Unified Ideographs.
pub static CJK_IDEOGRAPHS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{4e00}-\x{9fff}]").expect("CJK_IDEOGRAPHS regex"));

/// Hiragana and Katakana.
pub static KANA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{3040}-\x{309f}\x{30a0}-\x{30ff}]").expect("KANA regex"));

/// Hangul syllables.
pub static HANGUL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{ac00}-\x{d7af}]").expect("HANGUL regex"));

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Runs of whitespace other than newlines.
pub static HORIZONTAL_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("HORIZONTAL_WHITESPACE regex"));

/// A newline with the single spaces that may surround it after collapsing.
pub static PADDED_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ?\n ?").expect("PADDED_NEWLINE regex"));

/// Three or more consecutive newlines.
pub static MULTIPLE_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("MULTIPLE_NEWLINES regex"));

// =============================================================================
// PDF Views
// =============================================================================

/// A line holding nothing but a page number, optionally dashed (`- 3 -`).
pub static PAGE_NUMBER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-–—\s]*\d{1,5}[-–—\s]*$").expect("PAGE_NUMBER_LINE regex")
});

/// `Page 3`, `Page 3 of 12`, `Page 3/12`.
pub static PAGE_OF_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(page|p\.)\s*\d+(\s*(of|/)\s*\d+)?$").expect("PAGE_OF_LINE regex")
});

/// A `.pdf` extension and anything after it in a title.
pub static PDF_TITLE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.pdf\b.*$").expect("PDF_TITLE_SUFFIX regex"));

/// Browser and viewer names appended to document titles.
pub static BROWSER_TITLE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s*[-–—]\s*(google chrome|chromium|mozilla firefox|firefox|microsoft edge|edge|safari|brave|opera|vivaldi|pdf\.js viewer|pdf viewer|adobe acrobat( reader)?)\s*$",
    )
    .expect("BROWSER_TITLE_SUFFIX regex")
});

/// Titles that say nothing about the document.
pub const GENERIC_PDF_TITLES: &[&str] = &[
    "pdf",
    "document",
    "untitled",
    "pdf document",
    "pdf viewer",
    "pdf.js viewer",
    "viewer",
    "loading",
];

/// Embedded PDF plugins.
pub const PDF_EMBED_SELECTOR: &str =
    r#"embed[type="application/pdf"], object[type="application/pdf"]"#;

/// Text-layer containers (one per rendered page).
pub const TEXT_LAYER_SELECTOR: &str = ".textLayer";

/// Numbered page containers.
pub const PDF_PAGE_SELECTOR: &str = "[data-page-number]";

/// Whole-viewer containers, most specific first.
pub const PDF_VIEWER_SELECTORS: &[&str] = &[
    "#viewer",
    ".pdfViewer",
    "#viewerContainer",
    "pdf-viewer",
    "#outerContainer",
];
