//! Rendering host
//!
//! The heuristics need a little of what a browser knows after layout:
//! computed position, stacking order, visibility and element boxes. Hosts that
//! run inside a real engine implement [`Rendering`]; [`InlineStyles`] is the
//! default for static snapshots and reads the same facts from `style`
//! attributes.

use std::collections::HashMap;

use dom_query::Selection;

use crate::dom;

/// Computed `position` value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl Position {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "relative" => Self::Relative,
            "absolute" => Self::Absolute,
            "fixed" => Self::Fixed,
            "sticky" => Self::Sticky,
            _ => Self::Static,
        }
    }
}

/// The subset of computed style the extractor reads.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    pub position: Position,
    /// Numeric `z-index`, `None` for `auto` or unparsable values.
    pub z_index: Option<i64>,
    /// Computed `display` keyword, lowercase.
    pub display: String,
    /// Computed `visibility` keyword, lowercase.
    pub visibility: String,
    /// Computed `opacity` as written.
    pub opacity: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            position: Position::Static,
            z_index: None,
            display: "block".to_string(),
            visibility: "visible".to_string(),
            opacity: "1".to_string(),
        }
    }
}

impl ComputedStyle {
    /// `display:none`, `visibility:hidden` or zero opacity.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.display == "none"
            || self.visibility == "hidden"
            || self.opacity.trim().parse::<f64>().is_ok_and(|o| o == 0.0)
    }
}

/// Element box in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
}

/// Visible area of the page in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Layout facts supplied by the host.
pub trait Rendering {
    /// Computed style of `el`.
    fn computed_style(&self, el: &Selection) -> ComputedStyle;

    /// Laid-out box of `el`, `None` when the host cannot measure it.
    fn bounding_box(&self, el: &Selection) -> Option<BoundingBox>;

    /// Current viewport.
    fn viewport(&self) -> Viewport;
}

/// [`Rendering`] derived from inline `style` attributes.
///
/// Lengths in `px`, `%`, `vw` and `vh` are understood; percentages resolve
/// against the viewport. A box is reported only when both width and height
/// resolve.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineStyles {
    viewport: Viewport,
}

impl InlineStyles {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    fn declarations(el: &Selection) -> HashMap<String, String> {
        dom::get_attribute(el, "style")
            .map(|style| parse_declarations(&style))
            .unwrap_or_default()
    }

    fn length(&self, value: &str, axis: f64) -> Option<f64> {
        let value = value.trim().to_ascii_lowercase();
        let value = value.as_str();
        let (number, scale) = if let Some(n) = value.strip_suffix("px") {
            (n, 1.0)
        } else if let Some(n) = value.strip_suffix('%') {
            (n, axis / 100.0)
        } else if let Some(n) = value.strip_suffix("vw") {
            (n, self.viewport.width / 100.0)
        } else if let Some(n) = value.strip_suffix("vh") {
            (n, self.viewport.height / 100.0)
        } else if value == "0" {
            (value, 1.0)
        } else {
            return None;
        };
        number.trim().parse::<f64>().ok().map(|n| n * scale)
    }
}

impl Rendering for InlineStyles {
    fn computed_style(&self, el: &Selection) -> ComputedStyle {
        let decls = Self::declarations(el);
        let mut style = ComputedStyle::default();

        if let Some(position) = decls.get("position") {
            style.position = Position::parse(position);
        }
        style.z_index = decls.get("z-index").and_then(|z| z.trim().parse().ok());
        if let Some(display) = decls.get("display") {
            style.display = display.trim().to_ascii_lowercase();
        }
        if dom::get_attribute(el, "hidden").is_some() {
            style.display = "none".to_string();
        }
        if let Some(visibility) = decls.get("visibility") {
            style.visibility = visibility.trim().to_ascii_lowercase();
        }
        if let Some(opacity) = decls.get("opacity") {
            style.opacity = opacity.trim().to_string();
        }
        style
    }

    fn bounding_box(&self, el: &Selection) -> Option<BoundingBox> {
        let decls = Self::declarations(el);
        let width = self.length(decls.get("width")?, self.viewport.width)?;
        let height = self.length(decls.get("height")?, self.viewport.height)?;
        Some(BoundingBox { width, height })
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// Split a `style` attribute into lowercase property names and raw values.
fn parse_declarations(style: &str) -> HashMap<String, String> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            Some((name, strip_important(value.trim()).to_string()))
        })
        .collect()
}

/// Drop a trailing `!important` flag from a declaration value.
fn strip_important(value: &str) -> &str {
    const FLAG: &str = "!important";
    match value.len().checked_sub(FLAG.len()) {
        Some(at) if value.is_char_boundary(at) && value[at..].eq_ignore_ascii_case(FLAG) => {
            value[..at].trim_end()
        }
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styles() -> InlineStyles {
        InlineStyles::new(Viewport {
            width: 1000.0,
            height: 500.0,
        })
    }

    #[test]
    fn reads_position_and_z_index() {
        let doc = dom::parse(r#"<div style="position:Absolute; z-index: 250">x</div>"#);
        let style = styles().computed_style(&doc.select("div"));
        assert_eq!(style.position, Position::Absolute);
        assert_eq!(style.z_index, Some(250));
    }

    #[test]
    fn important_flag_is_ignored() {
        let doc = dom::parse(
            r#"<div style="position: fixed !important; z-index: 9999 !IMPORTANT; display:none!important">x</div>
            <p style="visibility: hidden !important; width: 100vw !important; height: 50% !important">y</p>"#,
        );
        let style = styles().computed_style(&doc.select("div"));
        assert_eq!(style.position, Position::Fixed);
        assert_eq!(style.z_index, Some(9999));
        assert_eq!(style.display, "none");

        let p = doc.select("p");
        assert_eq!(styles().computed_style(&p).visibility, "hidden");
        let bounds = styles().bounding_box(&p).unwrap();
        assert_eq!((bounds.width, bounds.height), (1000.0, 250.0));
    }

    #[test]
    fn auto_z_index_is_not_numeric() {
        let doc = dom::parse(r#"<div style="z-index:auto">x</div>"#);
        assert_eq!(styles().computed_style(&doc.select("div")).z_index, None);
    }

    #[test]
    fn hidden_attribute_means_display_none() {
        let doc = dom::parse("<div hidden>x</div>");
        assert!(styles().computed_style(&doc.select("div")).is_hidden());
    }

    #[test]
    fn zero_opacity_is_hidden() {
        let doc = dom::parse(r#"<div style="opacity: 0">x</div><p style="opacity:0.4">y</p>"#);
        assert!(styles().computed_style(&doc.select("div")).is_hidden());
        assert!(!styles().computed_style(&doc.select("p")).is_hidden());
    }

    #[test]
    fn box_resolves_relative_units() {
        let doc = dom::parse(r#"<div style="width:100%;height:50vh">x</div>"#);
        let rect = styles().bounding_box(&doc.select("div"));
        assert_eq!(
            rect,
            Some(BoundingBox {
                width: 1000.0,
                height: 250.0
            })
        );
    }

    #[test]
    fn box_needs_both_dimensions() {
        let doc = dom::parse(r#"<div style="height:50px">x</div>"#);
        assert_eq!(styles().bounding_box(&doc.select("div")), None);
    }
}
