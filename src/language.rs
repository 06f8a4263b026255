//! Language detection.
//!
//! A waterfall of independent tiers. Each tier is a plain function over
//! [`LanguageSignals`] that either names a language or passes:
//!
//! 1. `<html lang>`
//! 2. `content-language` / `language` meta tags
//! 3. URL host and locale path segments
//! 4. character-class and stop-word statistics over the text
//!
//! When every tier passes the result is `"en"`.

use dom_query::{Document, Selection};
use regex::Regex;
use tracing::debug;
use url::Url;

use crate::dom;
use crate::options::Options;
use crate::patterns::{
    CJK_IDEOGRAPHS, ENGLISH_WORDS, HANGUL, KANA, VIETNAMESE_DIACRITICS, VIETNAMESE_WORDS,
};

/// Language returned when no tier is confident.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Hosts of Vietnamese news sites that do not sit under `.vn`.
const VIETNAMESE_HOSTS: &[&str] = &[
    "vietstock.vn",
    "vnexpress.net",
    "dantri.com.vn",
    "tuoitre.vn",
    "thanhnien.vn",
    "cafef.vn",
];

/// Everything the tiers look at, gathered once.
#[derive(Debug, Clone, Default)]
pub struct LanguageSignals {
    /// Raw `lang` attribute of the root element.
    pub html_lang: Option<String>,
    /// Raw declared language from meta tags.
    pub meta_lang: Option<String>,
    /// Page URL.
    pub url: String,
    /// Extracted text.
    pub content: String,
    /// Page title.
    pub title: String,
}

impl LanguageSignals {
    /// Gather signals from a document and its extracted text.
    #[must_use]
    pub fn from_document(doc: &Document, url: &str, content: &str, title: &str) -> Self {
        Self {
            html_lang: dom::get_attribute(&dom::root(doc), "lang"),
            meta_lang: declared_meta_language(doc),
            url: url.to_string(),
            content: content.to_string(),
            title: title.to_string(),
        }
    }

    /// Signals for a PDF view: only the text and the URL mean anything.
    #[must_use]
    pub fn for_pdf(url: &str, content: &str, title: &str) -> Self {
        Self {
            url: url.to_string(),
            content: content.to_string(),
            title: title.to_string(),
            ..Self::default()
        }
    }
}

/// One tier of the waterfall.
pub type Tier = fn(&LanguageSignals, &Options) -> Option<&'static str>;

/// Tiers for HTML pages, in priority order.
pub const HTML_TIERS: &[(&str, Tier)] = &[
    ("document", document_tier),
    ("meta", meta_tier),
    ("url", url_tier),
    ("content", detect_from_content),
];

/// Tiers for PDF views. A viewer's own `lang` says nothing about the
/// document, so statistics come first.
pub const PDF_TIERS: &[(&str, Tier)] = &[
    ("content", detect_from_content),
    ("url", url_tier),
];

fn document_tier(signals: &LanguageSignals, _options: &Options) -> Option<&'static str> {
    detect_from_document_lang(signals)
}

fn meta_tier(signals: &LanguageSignals, _options: &Options) -> Option<&'static str> {
    detect_from_meta(signals)
}

fn url_tier(signals: &LanguageSignals, _options: &Options) -> Option<&'static str> {
    detect_from_url(&signals.url)
}

/// Run the HTML waterfall.
#[must_use]
pub fn detect_language(signals: &LanguageSignals, options: &Options) -> &'static str {
    run_tiers(HTML_TIERS, signals, options)
}

/// Run the PDF waterfall.
#[must_use]
pub fn detect_pdf_language(signals: &LanguageSignals, options: &Options) -> &'static str {
    run_tiers(PDF_TIERS, signals, options)
}

fn run_tiers(tiers: &[(&str, Tier)], signals: &LanguageSignals, options: &Options) -> &'static str {
    for (name, tier) in tiers {
        if let Some(lang) = tier(signals, options) {
            debug!(tier = name, lang, "language detected");
            return lang;
        }
    }
    debug!(lang = DEFAULT_LANGUAGE, "language defaulted");
    DEFAULT_LANGUAGE
}

/// Map a declared language tag to a two-letter code.
///
/// Lowercases, drops region and script subtags after `-` or `_`, then maps
/// through a fixed synonym table. Unknown languages return `None`.
///
/// ```
/// use fit_content::language::normalize_language_code;
///
/// assert_eq!(normalize_language_code("vi-VN"), Some("vi"));
/// assert_eq!(normalize_language_code("English"), Some("en"));
/// assert_eq!(normalize_language_code("xx"), None);
/// ```
#[must_use]
pub fn normalize_language_code(code: &str) -> Option<&'static str> {
    let lower = code.trim().to_lowercase();
    let primary = lower.split(['-', '_']).next().unwrap_or_default();

    let lang = match primary {
        "vi" | "vn" | "vietnamese" => "vi",
        "en" | "english" => "en",
        "zh" | "chinese" => "zh",
        "ja" | "japanese" => "ja",
        "ko" | "korean" => "ko",
        "fr" | "french" => "fr",
        "de" | "german" => "de",
        "es" | "spanish" => "es",
        "pt" | "portuguese" => "pt",
        "ru" | "russian" => "ru",
        "ar" | "arabic" => "ar",
        "hi" | "hindi" => "hi",
        "th" | "thai" => "th",
        _ => return None,
    };
    Some(lang)
}

/// Tier 1: the root element's `lang`.
#[must_use]
pub fn detect_from_document_lang(signals: &LanguageSignals) -> Option<&'static str> {
    signals.html_lang.as_deref().and_then(normalize_language_code)
}

/// Tier 2: the meta-declared language.
#[must_use]
pub fn detect_from_meta(signals: &LanguageSignals) -> Option<&'static str> {
    signals.meta_lang.as_deref().and_then(normalize_language_code)
}

/// Content of `<meta http-equiv="content-language">`, else of
/// `<meta name="language">`.
fn declared_meta_language(doc: &Document) -> Option<String> {
    let metas: Vec<Selection> = dom::elements(&doc.select("meta"));
    let content_of = |attr: &str, value: &str| {
        metas.iter().find_map(|meta| {
            let matches = dom::get_attribute(meta, attr)
                .is_some_and(|v| v.trim().eq_ignore_ascii_case(value));
            if matches {
                dom::get_attribute(meta, "content").filter(|c| !c.trim().is_empty())
            } else {
                None
            }
        })
    };
    content_of("http-equiv", "content-language").or_else(|| content_of("name", "language"))
}

/// Tier 3: host and path hints.
///
/// Checked per language in order: Vietnamese hosts and `/vi/`, `/vn/`
/// segments; English for `/en/` or any `.com`, `.org` host; then Chinese,
/// Japanese and Korean by path segment or national domain. A generic host
/// therefore outranks a later locale segment (`example.com/ja/` is `en`).
#[must_use]
pub fn detect_from_url(url: &str) -> Option<&'static str> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str().unwrap_or_default().to_ascii_lowercase();
    let segments: Vec<String> = parsed
        .path_segments()
        .map(|segments| segments.map(str::to_ascii_lowercase).collect())
        .unwrap_or_default();
    let has_segment = |name: &str| segments.iter().any(|s| s == name);
    let has_suffix = |suffixes: &[&str]| suffixes.iter().any(|suffix| host.ends_with(suffix));

    let vietnamese_host = host.ends_with(".vn")
        || VIETNAMESE_HOSTS
            .iter()
            .any(|known| host == *known || host.ends_with(&format!(".{known}")));
    if vietnamese_host || has_segment("vi") || has_segment("vn") {
        return Some("vi");
    }

    let rules: [(&'static str, &[&str]); 4] = [
        ("en", &[".com", ".org"]),
        ("zh", &[".cn", ".tw"]),
        ("ja", &[".jp"]),
        ("ko", &[".kr"]),
    ];
    rules
        .into_iter()
        .find(|(lang, suffixes)| has_segment(lang) || has_suffix(suffixes))
        .map(|(lang, _)| lang)
}

/// Tier 4: statistics over the first characters of `content + " " + title`.
///
/// Vietnamese counts diacritic letters plus stop words; English counts stop
/// words; Chinese, Japanese and Korean count characters of their scripts.
/// The highest score wins if it reaches `min_language_score`; ties go to the
/// earlier language in that list.
#[must_use]
pub fn detect_from_content(signals: &LanguageSignals, options: &Options) -> Option<&'static str> {
    let text = format!("{} {}", signals.content, signals.title);
    if text.chars().count() < options.min_language_sample_chars {
        return None;
    }

    let sample: String = text
        .chars()
        .take(options.language_sample_chars)
        .collect::<String>()
        .to_lowercase();

    let count = |re: &Regex| re.find_iter(&sample).count();
    let scores = [
        ("vi", count(&VIETNAMESE_DIACRITICS) + count(&VIETNAMESE_WORDS)),
        ("en", count(&ENGLISH_WORDS)),
        ("zh", count(&CJK_IDEOGRAPHS)),
        ("ja", count(&KANA)),
        ("ko", count(&HANGUL)),
    ];

    let mut best = scores[0];
    for candidate in &scores[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }

    debug!(?scores, "language scores");
    (best.1 >= options.min_language_score).then_some(best.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(text: &str) -> LanguageSignals {
        LanguageSignals {
            content: text.to_string(),
            ..LanguageSignals::default()
        }
    }

    #[test]
    fn test_normalize_strips_subtags() {
        assert_eq!(normalize_language_code("zh_Hant_TW"), Some("zh"));
        assert_eq!(normalize_language_code(" EN-us "), Some("en"));
        assert_eq!(normalize_language_code("vn"), Some("vi"));
        assert_eq!(normalize_language_code(""), None);
    }

    #[test]
    fn test_meta_http_equiv_before_name() {
        let doc = dom::parse(
            r#"<html><head><meta name="language" content="French">
            <meta http-equiv="Content-Language" content="de-DE"></head></html>"#,
        );
        assert_eq!(declared_meta_language(&doc).as_deref(), Some("de-DE"));
    }

    #[test]
    fn test_from_document() {
        let doc = dom::parse(r#"<html lang="ko-KR"><head></head><body></body></html>"#);
        let signals = LanguageSignals::from_document(&doc, "about:blank", "", "");
        assert_eq!(detect_from_document_lang(&signals), Some("ko"));
    }

    #[test]
    fn test_url_vietnamese() {
        assert_eq!(detect_from_url("https://vnexpress.net/kinh-te"), Some("vi"));
        assert_eq!(detect_from_url("https://cafef.vn/a.chn"), Some("vi"));
        assert_eq!(detect_from_url("https://example.com/vi/news"), Some("vi"));
        assert_eq!(detect_from_url("https://baochinhphu.vn/x"), Some("vi"));
    }

    #[test]
    fn test_url_generic_tld_beats_later_locale_segment() {
        assert_eq!(detect_from_url("https://example.com/ja/docs"), Some("en"));
        assert_eq!(detect_from_url("https://example.org/ko/"), Some("en"));
        assert_eq!(detect_from_url("https://example.com/docs"), Some("en"));
        assert_eq!(detect_from_url("https://example.de/ja/docs"), Some("ja"));
        assert_eq!(detect_from_url("https://example.jp/en/docs"), Some("en"));
    }

    #[test]
    fn test_url_national_domains() {
        assert_eq!(detect_from_url("https://news.sina.com.cn/"), Some("zh"));
        assert_eq!(detect_from_url("https://www.yahoo.co.jp/"), Some("ja"));
        assert_eq!(detect_from_url("https://naver.kr/"), Some("ko"));
        assert_eq!(detect_from_url("https://example.de/"), None);
        assert_eq!(detect_from_url("not a url"), None);
    }

    #[test]
    fn test_content_english() {
        let signals = content(
            "The committee said that the plan would be delivered to the council in the spring and that it was on budget.",
        );
        assert_eq!(detect_from_content(&signals, &Options::default()), Some("en"));
    }

    #[test]
    fn test_content_vietnamese() {
        let signals = content(
            "Thị trường chứng khoán Việt Nam đã tăng điểm trong phiên giao dịch sáng nay với thanh khoản cao.",
        );
        assert_eq!(detect_from_content(&signals, &Options::default()), Some("vi"));
    }

    #[test]
    fn test_content_cjk_scripts() {
        let options = Options::default();
        let zh = content("今天的天气非常好，我们一起去公园散步吧。这个城市的春天来得很早，花都开了。");
        assert_eq!(detect_from_content(&zh, &options), Some("zh"));
        let ko = content("오늘은 날씨가 정말 좋습니다. 우리 함께 공원에 산책하러 갑시다. 이 도시의 봄은 일찍 옵니다.");
        assert_eq!(detect_from_content(&ko, &options), Some("ko"));
    }

    #[test]
    fn test_content_too_short() {
        assert_eq!(detect_from_content(&content("the and of"), &Options::default()), None);
    }

    #[test]
    fn test_content_inconclusive() {
        let signals = content("1234567890 1234567890 1234567890 1234567890 1234567890 xyz");
        assert_eq!(detect_from_content(&signals, &Options::default()), None);
    }

    #[test]
    fn test_waterfall_defaults_to_english() {
        let signals = LanguageSignals {
            url: "https://example.de/".into(),
            ..LanguageSignals::default()
        };
        assert_eq!(detect_language(&signals, &Options::default()), "en");
    }

    #[test]
    fn test_pdf_ignores_declared_language() {
        let signals = LanguageSignals {
            html_lang: Some("en".into()),
            url: "https://example.de/file.pdf".into(),
            content: "Thị trường chứng khoán Việt Nam đã tăng điểm trong phiên giao dịch sáng nay.".into(),
            ..LanguageSignals::default()
        };
        assert_eq!(detect_pdf_language(&signals, &Options::default()), "vi");
        assert_eq!(detect_language(&signals, &Options::default()), "en");
    }
}
