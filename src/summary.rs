//! Summarization request and result records.
//!
//! The HTTP call to the model lives with the host. This module fixes the
//! shapes on both sides of it: what goes in ([`SummaryRequest`]) and how a
//! model's JSON reply is validated into a [`SummaryResult`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::result::ExtractedContent;

/// Characters of content sent to the model.
pub const MAX_PROMPT_CHARS: usize = 8000;

/// `tldr` used when the model returned none.
pub const FALLBACK_TLDR: &str = "Unable to generate summary";

/// Confidence used when the model returned none.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Writing tone of the summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Friendly,
    Professional,
}

/// Target length of the summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Detailed,
}

/// Everything the summarization call needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Content, cut to [`MAX_PROMPT_CHARS`] characters.
    pub content: String,
    pub tone: Tone,
    pub length: SummaryLength,
    /// Language the summary should be written in.
    pub language: String,
}

impl SummaryRequest {
    /// Build a request from extracted content.
    #[must_use]
    pub fn new(extracted: &ExtractedContent, tone: Tone, length: SummaryLength) -> Self {
        Self {
            content: extracted.content.chars().take(MAX_PROMPT_CHARS).collect(),
            tone,
            length,
            language: extracted.language.clone(),
        }
    }
}

/// One question and its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// A validated model reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub tldr: String,
    pub bullets: Vec<String>,
    pub actions: Vec<String>,
    pub qa: Vec<QaPair>,
    pub language: String,
    /// Model's confidence, within `0.0..=1.0`.
    pub confidence: f64,
}

impl SummaryResult {
    /// Validate a model's JSON object, filling defaults for anything missing
    /// or mistyped.
    ///
    /// ```
    /// use fit_content::summary::SummaryResult;
    ///
    /// let result = SummaryResult::from_model_json(&serde_json::json!({ "bullets": "oops" }));
    /// assert_eq!(result.tldr, "Unable to generate summary");
    /// assert!(result.bullets.is_empty());
    /// assert_eq!(result.confidence, 0.5);
    /// ```
    #[must_use]
    pub fn from_model_json(value: &Value) -> Self {
        let tldr = value
            .get("tldr")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(FALLBACK_TLDR)
            .to_string();

        let language = value
            .get("language")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("en")
            .to_string();

        let confidence = value
            .get("confidence")
            .and_then(Value::as_f64)
            .filter(|c| c.is_finite())
            .unwrap_or(FALLBACK_CONFIDENCE)
            .clamp(0.0, 1.0);

        Self {
            tldr,
            bullets: string_list(value.get("bullets")),
            actions: string_list(value.get("actions")),
            qa: qa_list(value.get("qa")),
            language,
            confidence,
        }
    }

    /// Parse the model's reply text, which should hold one JSON object.
    pub fn from_model_reply(reply: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(reply.trim())?;
        Ok(Self::from_model_json(&value))
    }
}

/// String entries of a JSON array; anything else is empty.
fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn qa_list(value: Option<&Value>) -> Vec<QaPair> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}
