//! Content density scoring.
//!
//! A pure estimate of how likely an element is to be the article body. The
//! base is the element's text length; bonuses and penalties multiply the
//! running score, so the score stays linear in text length for a fixed set of
//! factors.

use dom_query::Selection;

use crate::dom;
use crate::link_density::link_density;
use crate::options::ScoringWeights;
use crate::patterns::{CONTENT_KEYWORDS, NON_CONTENT_KEYWORDS};
use crate::render::Rendering;

/// An element paired with its density score.
///
/// Lives only for one density pass; the winner's element is returned and the
/// rest are dropped.
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub element: Selection<'a>,
    pub score: f64,
}

/// Score one element. Always finite and non-negative.
///
/// Factors, in the order they multiply the running score:
///
/// 1. tag bonus (`article`, `main`, `section`)
/// 2. `1 + keyword_bonus × n` for content keywords in class/id
/// 3. `1 + paragraphs / lines`
/// 4. `1 - min(max_link_penalty, link density)`
/// 5. `negative_decay ^ n` for non-content keywords in class/id
/// 6. zero when hidden
/// 7. `size_penalty` when the box is smaller than `min_width` × `min_height`
///
/// Elements with fewer than `min_text_len` characters score zero.
#[must_use]
pub fn content_score(el: &Selection, rendering: &dyn Rendering, weights: &ScoringWeights) -> f64 {
    let text = dom::text_content(el);
    let text_len = text.chars().count();
    if text_len < weights.min_text_len {
        return 0.0;
    }

    // Hidden elements score zero whatever the other factors say, so the
    // check can run before them.
    if rendering.computed_style(el).is_hidden() {
        return 0.0;
    }

    let mut score = text_len as f64;

    score *= tag_bonus(el, weights);

    let class_and_id = dom::class_and_id(el);
    let content_matches = keyword_matches(&class_and_id, CONTENT_KEYWORDS);
    score *= 1.0 + weights.keyword_bonus * content_matches as f64;

    let paragraphs = el.select("p").length();
    let lines = text.split('\n').count().max(1);
    score *= 1.0 + paragraphs as f64 / lines as f64;

    let density = link_density(el, text_len);
    score *= 1.0 - density.min(weights.max_link_penalty);

    let negative_matches = keyword_matches(&class_and_id, NON_CONTENT_KEYWORDS);
    if negative_matches > 0 {
        score *= weights
            .negative_decay
            .powi(i32::try_from(negative_matches).unwrap_or(i32::MAX));
    }

    if let Some(rect) = rendering.bounding_box(el) {
        if rect.width < weights.min_width || rect.height < weights.min_height {
            score *= weights.size_penalty;
        }
    }

    if score.is_finite() {
        score.max(0.0)
    } else {
        0.0
    }
}

fn tag_bonus(el: &Selection, weights: &ScoringWeights) -> f64 {
    match dom::tag_name(el).as_deref() {
        Some("article") => weights.article_bonus,
        Some("main") => weights.main_bonus,
        Some("section") => weights.section_bonus,
        _ => 1.0,
    }
}

/// Number of keywords that occur anywhere in `haystack`, each counted once.
fn keyword_matches(haystack: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| haystack.contains(*k)).count()
}
