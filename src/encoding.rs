//! Character encoding detection and transcoding for [`crate::extract_bytes`].
//!
//! Order of precedence: byte-order mark, then the first charset declaration
//! in the document head, then UTF-8. Legacy Vietnamese pages still ship as
//! `windows-1258`, so labels go through `encoding_rs` rather than a fixed
//! list.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use tracing::debug;

/// Bytes of the document scanned for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// `<meta charset=...>` or `<meta http-equiv="Content-Type" content="...; charset=...">`.
#[allow(clippy::expect_used)]
static CHARSET_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+?charset\s*=\s*["']?([A-Za-z0-9._:-]+)"#).expect("CHARSET_DECLARATION regex")
});

/// Encoding declared in the first [`SNIFF_LEN`] bytes, if `encoding_rs`
/// knows the label.
#[must_use]
pub fn declared_encoding(html: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    let label = CHARSET_DECLARATION.captures(&head)?.get(1)?.as_str();
    Encoding::for_label(label.as_bytes())
}

/// Detect the encoding of an HTML byte stream.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(html) {
        return encoding;
    }
    declared_encoding(html).unwrap_or(UTF_8)
}

/// Decode HTML bytes to a UTF-8 string.
///
/// Never fails: malformed sequences become U+FFFD and a BOM is dropped.
///
/// # Examples
///
/// ```
/// use fit_content::encoding::transcode_to_utf8;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>Caf\xE9</body></html>";
/// assert!(transcode_to_utf8(html).contains("Café"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    let (decoded, used, had_errors) = encoding.decode(html);
    if used != UTF_8 || had_errors {
        debug!(encoding = used.name(), had_errors, "transcoded html");
    }
    decoded.into_owned()
}
