//! Text normalization and line de-duplication.
//!
//! Turns raw `textContent` into the "fit" text handed to the summarizer:
//! invisible and odd space characters go, horizontal whitespace collapses,
//! blank-line runs shrink to one blank line, and long lines that already
//! appeared are dropped.

use std::collections::HashSet;

use crate::patterns::{HORIZONTAL_WHITESPACE, MULTIPLE_NEWLINES, PADDED_NEWLINE};

/// Lines at or under this many characters are never de-duplicated.
pub const SHORT_LINE_LEN: usize = 10;

/// Produce fit text, or an empty string when `raw` has fewer than
/// `min_words` whitespace-delimited tokens.
///
/// An empty return means "not enough content"; callers decide whether that
/// is an error.
///
/// # Examples
///
/// ```
/// use fit_content::normalize::fit_text;
///
/// assert_eq!(fit_text("too short", 10), "");
/// let text = "one two three four five six seven eight nine ten";
/// assert_eq!(fit_text(&format!("  {text}\u{a0} "), 10), text);
/// ```
#[must_use]
pub fn fit_text(raw: &str, min_words: usize) -> String {
    let words = raw.split_whitespace().count();
    if words < min_words {
        return String::new();
    }
    clean_text(raw)
}

/// Normalize whitespace and drop repeated long lines.
///
/// The result has no control characters besides `\n`, no tabs, no runs of
/// spaces, no spaces at line edges, at most one blank line in a row, and no
/// repeated line longer than [`SHORT_LINE_LEN`]. Applying it twice gives the
/// same string as applying it once.
#[must_use]
pub fn clean_text(raw: &str) -> String {
    let text = normalize_whitespace(raw);
    let text = dedup_lines(&text);
    squeeze_blank_lines(&text)
}

/// Character-level cleanup plus whitespace collapsing, keeping line structure.
#[must_use]
pub fn normalize_whitespace(raw: &str) -> String {
    let text = replace_special_chars(raw);
    let text = HORIZONTAL_WHITESPACE.replace_all(&text, " ");
    let text = PADDED_NEWLINE.replace_all(&text, "\n");
    squeeze_blank_lines(&text)
}

/// Drop every line whose trimmed form is longer than [`SHORT_LINE_LEN`]
/// characters and was already seen earlier in the text.
#[must_use]
pub fn dedup_lines(text: &str) -> String {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut kept: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        let trimmed = line.trim();
        if trimmed.chars().count() <= SHORT_LINE_LEN {
            kept.push(line);
        } else if seen.insert(trimmed) {
            kept.push(line);
        }
    }

    kept.join("\n").trim().to_string()
}

/// Collapse 3+ newlines to a single blank line and trim.
fn squeeze_blank_lines(text: &str) -> String {
    MULTIPLE_NEWLINES
        .replace_all(text, "\n\n")
        .trim()
        .to_string()
}

/// Map tabs, NBSP and the general-punctuation spaces to plain spaces; drop
/// soft hyphens, BOMs and other control characters; unify line endings.
fn replace_special_chars(raw: &str) -> String {
    let raw = raw.replace("\r\n", "\n");
    raw.chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            '\r' => Some('\n'),
            '\t' | '\u{00A0}' | '\u{2000}'..='\u{200B}' => Some(' '),
            '\u{00AD}' | '\u{FEFF}' => None,
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}
