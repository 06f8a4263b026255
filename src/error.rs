//! Error types for fit-content.
//!
//! Only [`Error::InsufficientContent`] and [`Error::ExtractionFailure`] ever
//! leave the `extract*` entry points. Selector and timeout errors are produced
//! by individual strategies, logged, and absorbed by the next tier. Storage
//! errors come only from [`crate::storage`].

use std::fmt;
use std::time::Duration;

/// Likely reason a PDF view yielded no usable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// Viewer pages rendered but carry no text layer (scanned or image-only PDF).
    ImageBased,
    /// The PDF is shown by a plugin that does not expose its text, or is protected.
    Protected,
    /// No viewer pages or text layer appeared before the wait ran out.
    StillLoading,
    /// Some text was found, just not enough to summarize.
    InsufficientText,
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::ImageBased => {
                "this PDF appears to be image-based (scanned); it has no selectable text"
            }
            Self::Protected => {
                "this PDF appears to be protected or shown by a viewer that does not expose its text"
            }
            Self::StillLoading => {
                "the PDF is still loading; wait for the pages to render and try again"
            }
            Self::InsufficientText => "the page does not contain enough text to summarize",
        };
        f.write_str(message)
    }
}

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fewer meaningful tokens than the summarization threshold.
    #[error("Not enough content to summarize ({words} words found). Please try on a page with more text.")]
    InsufficientContent {
        /// Whitespace-delimited tokens that were found.
        words: usize,
    },

    /// Every strategy was exhausted without recovering usable text.
    #[error("Could not extract text: {0}")]
    ExtractionFailure(FailureCause),

    /// A malformed or unsupported DOM query.
    #[error("Invalid selector `{selector}`")]
    Selector {
        /// The rejected selector text.
        selector: String,
    },

    /// A bounded wait hit its ceiling.
    #[error("Timed out after {waited:?} waiting for the PDF viewer to render text")]
    Timeout {
        /// How long the wait lasted.
        waited: Duration,
    },

    /// A stored value could not be encoded or decoded.
    #[error("Storage value error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key-value store rejected an operation.
    #[error("Storage error: {message}")]
    Storage {
        /// What the store reported.
        message: String,
    },
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_names_the_cause() {
        let err = Error::ExtractionFailure(FailureCause::ImageBased);
        assert!(err.to_string().contains("image-based"));

        let err = Error::ExtractionFailure(FailureCause::StillLoading);
        assert!(err.to_string().contains("still loading"));
    }

    #[test]
    fn insufficient_content_reports_word_count() {
        let err = Error::InsufficientContent { words: 9 };
        assert!(err.to_string().contains("9 words"));
    }
}
