//! Density fallback (tier 3)

use dom_query::{Document, Selection};
use tracing::{debug, trace};

use crate::dom;
use crate::options::ScoringWeights;
use crate::patterns::CONTAINER_SELECTOR;
use crate::render::Rendering;
use crate::scoring::{content_score, ScoredCandidate};
use crate::selector::utils::describe;

/// Score every container and return the best one.
///
/// Only a strictly greater score replaces the current best, so ties go to
/// the element met first in document order. Returns `None` when nothing
/// scores above zero.
#[must_use]
pub fn density_fallback<'a>(
    doc: &'a Document,
    rendering: &dyn Rendering,
    weights: &ScoringWeights,
) -> Option<Selection<'a>> {
    let containers = dom::root(doc).select(CONTAINER_SELECTOR);
    let mut best: Option<ScoredCandidate<'a>> = None;
    let mut scored = 0usize;

    for element in dom::elements(&containers) {
        let score = content_score(&element, rendering, weights);
        if score <= 0.0 {
            continue;
        }
        scored += 1;
        trace!(element = %describe(&element), score, "candidate");

        if best.as_ref().is_none_or(|b| score > b.score) {
            best = Some(ScoredCandidate { element, score });
        }
    }

    let best = best?;
    debug!(
        tier = "density",
        candidates = scored,
        score = best.score,
        element = %describe(&best.element),
        "main content selected"
    );
    Some(best.element)
}
