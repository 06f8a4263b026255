//! Overlay suppression.
//!
//! The one pass allowed to mutate the live document. Candidates come from a
//! fixed selector list; each match is classified on its own and removed only
//! when it really is an overlay.

use dom_query::{Document, Selection};
use tracing::{debug, warn};

use crate::dom;
use crate::options::Options;
use crate::patterns::{OVERLAY_CLASS, OVERLAY_SELECTORS};
use crate::render::{Position, Rendering};

/// Stacking order above which an absolutely positioned element is an overlay.
const OVERLAY_Z_INDEX: i64 = 100;

/// Share of each viewport dimension a box must exceed to count as covering it.
const COVERAGE_RATIO: f64 = 0.8;

/// Classify one element.
///
/// An element is an overlay if any of these hold: it is `position: fixed`;
/// it is `position: absolute` with a numeric `z-index` above 100; its box
/// exceeds 80% of the viewport in both dimensions; its class list mentions
/// modal, popup, overlay or dialog.
#[must_use]
pub fn is_overlay(el: &Selection, rendering: &dyn Rendering) -> bool {
    let style = rendering.computed_style(el);
    if style.position == Position::Fixed {
        return true;
    }
    if style.position == Position::Absolute && style.z_index.is_some_and(|z| z > OVERLAY_Z_INDEX) {
        return true;
    }

    if let Some(rect) = rendering.bounding_box(el) {
        let viewport = rendering.viewport();
        if rect.width > viewport.width * COVERAGE_RATIO
            && rect.height > viewport.height * COVERAGE_RATIO
        {
            return true;
        }
    }

    dom::class_name(el).is_some_and(|class| OVERLAY_CLASS.is_match(&class))
}

/// Remove classified overlays from the live document.
///
/// Runs every built-in candidate selector, then `options.extra_overlay_selectors`.
/// A selector that fails to parse is logged and skipped. Returns the number of
/// elements removed.
pub fn remove_overlays(doc: &Document, rendering: &dyn Rendering, options: &Options) -> usize {
    let root = dom::root(doc);
    let selectors = OVERLAY_SELECTORS
        .iter()
        .copied()
        .chain(options.extra_overlay_selectors.iter().map(String::as_str));

    let mut removed = 0;
    for selector in selectors {
        let matches = match dom::select_checked(&root, selector) {
            Ok(matches) => matches,
            Err(err) => {
                warn!(%err, "skipping overlay selector");
                continue;
            }
        };

        for candidate in dom::elements(&matches) {
            if is_overlay(&candidate, rendering) {
                dom::remove(&candidate);
                removed += 1;
            }
        }
    }

    debug!(removed, "overlay pass done");
    removed
}
