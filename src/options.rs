//! Configuration options for content extraction.
//!
//! The `Options` struct carries every threshold the pipeline uses, so hosts
//! can tune the heuristics without touching code. All fields are public and
//! `Options` deserializes from JSON with missing fields falling back to the
//! defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration options for content extraction.
///
/// # Example
///
/// ```rust
/// use fit_content::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     min_substantial_words: 80,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Words an element needs before a semantic or class-pattern probe accepts it.
    ///
    /// Default: `50`
    pub min_substantial_words: usize,

    /// Minimum whitespace-delimited tokens for the normalized content.
    ///
    /// Below this the HTML path reports `Error::InsufficientContent`.
    ///
    /// Default: `10`
    pub min_content_words: usize,

    /// Share of the filtered text that external anchors may contribute before
    /// they are stripped.
    ///
    /// Default: `0.3`
    pub external_link_ratio: f64,

    /// Characters of `content + title` sampled by the statistical language tier.
    ///
    /// Default: `1000`
    pub language_sample_chars: usize,

    /// Score the best statistical language needs to be accepted.
    ///
    /// Default: `5`
    pub min_language_score: usize,

    /// Shortest text the statistical language tier will look at.
    ///
    /// Default: `50`
    pub min_language_sample_chars: usize,

    /// Characters a PDF text tier must produce to end the waterfall.
    ///
    /// Default: `100`
    pub pdf_min_tier_chars: usize,

    /// Characters the cleaned PDF text needs; below this extraction fails.
    ///
    /// Default: `50`
    pub pdf_min_chars: usize,

    /// Ceiling for the PDF render wait, in milliseconds.
    ///
    /// Default: `3000`
    pub pdf_wait_timeout_ms: u64,

    /// Delay between PDF render polls, in milliseconds.
    ///
    /// Default: `100`
    pub pdf_poll_interval_ms: u64,

    /// Host-supplied overlay selectors tried after the built-in list.
    pub extra_overlay_selectors: Vec<String>,

    /// Host-supplied boilerplate selectors removed by the content filter.
    pub extra_excluded_selectors: Vec<String>,

    /// Density scorer constants.
    pub scoring: ScoringWeights,
}

impl Options {
    /// PDF render wait ceiling as a `Duration`.
    #[must_use]
    pub fn pdf_wait_timeout(&self) -> Duration {
        Duration::from_millis(self.pdf_wait_timeout_ms)
    }

    /// PDF render poll interval as a `Duration`.
    #[must_use]
    pub fn pdf_poll_interval(&self) -> Duration {
        Duration::from_millis(self.pdf_poll_interval_ms.max(1))
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_substantial_words: 50,
            min_content_words: 10,
            external_link_ratio: 0.3,
            language_sample_chars: 1000,
            min_language_score: 5,
            min_language_sample_chars: 50,
            pdf_min_tier_chars: 100,
            pdf_min_chars: 50,
            pdf_wait_timeout_ms: 3000,
            pdf_poll_interval_ms: 100,
            extra_overlay_selectors: Vec::new(),
            extra_excluded_selectors: Vec::new(),
            scoring: ScoringWeights::default(),
        }
    }
}

/// Multipliers and floors used by [`crate::scoring::content_score`].
///
/// The defaults are empirical; they are kept exact so scores stay comparable
/// across hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Elements with less text than this score zero.
    pub min_text_len: usize,
    /// Multiplier for `<article>`.
    pub article_bonus: f64,
    /// Multiplier for `<main>`.
    pub main_bonus: f64,
    /// Multiplier for `<section>`.
    pub section_bonus: f64,
    /// Added to the multiplier for each content keyword in class/id.
    pub keyword_bonus: f64,
    /// Upper bound for the link-density penalty.
    pub max_link_penalty: f64,
    /// Base of the exponential decay per non-content keyword.
    pub negative_decay: f64,
    /// Multiplier for boxes smaller than `min_width` x `min_height`.
    pub size_penalty: f64,
    /// Narrower boxes get the size penalty.
    pub min_width: f64,
    /// Shorter boxes get the size penalty.
    pub min_height: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            min_text_len: 100,
            article_bonus: 2.0,
            main_bonus: 1.8,
            section_bonus: 1.5,
            keyword_bonus: 0.2,
            max_link_penalty: 0.8,
            negative_decay: 0.5,
            size_penalty: 0.5,
            min_width: 200.0,
            min_height: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = Options::default();
        assert_eq!(options.min_substantial_words, 50);
        assert_eq!(options.min_content_words, 10);
        assert_eq!(options.external_link_ratio, 0.3);
        assert_eq!(options.pdf_wait_timeout(), Duration::from_millis(3000));
        assert_eq!(options.pdf_poll_interval(), Duration::from_millis(100));
        assert_eq!(options.scoring.article_bonus, 2.0);
        assert_eq!(options.scoring.negative_decay, 0.5);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let options: Options =
            serde_json::from_str(r#"{"min_content_words": 25, "scoring": {"main_bonus": 3.0}}"#)
                .unwrap();
        assert_eq!(options.min_content_words, 25);
        assert_eq!(options.min_substantial_words, 50);
        assert_eq!(options.scoring.main_bonus, 3.0);
        assert_eq!(options.scoring.article_bonus, 2.0);
    }

    #[test]
    fn zero_poll_interval_is_clamped() {
        let options = Options {
            pdf_poll_interval_ms: 0,
            ..Options::default()
        };
        assert_eq!(options.pdf_poll_interval(), Duration::from_millis(1));
    }
}
