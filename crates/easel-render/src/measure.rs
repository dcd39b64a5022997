//! Size resolution for auto-sized elements.
//!
//! Text boxes size to their content and images take their height from the
//! intrinsic aspect ratio. The browser measures text with Canvas2D metrics;
//! natively `EstimatedMeasure` gives a deterministic approximation.

use easel_core::model::*;
use kurbo::Size;

/// Horizontal + vertical padding around text content.
pub const TEXT_PADDING: f64 = 8.0;
/// Line height as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.4;

/// Measures text content.
pub trait Measure {
    /// Content size of a text box, excluding `min_width` clamping.
    fn text_size(&self, text: &TextBox) -> Size;
}

/// Fixed-advance estimate: every glyph is `0.55em` wide, lines are `1.4em`
/// tall.
#[derive(Debug, Clone, Copy)]
pub struct EstimatedMeasure {
    pub font_size: f64,
}

impl Default for EstimatedMeasure {
    fn default() -> Self {
        Self { font_size: 16.0 }
    }
}

impl Measure for EstimatedMeasure {
    fn text_size(&self, text: &TextBox) -> Size {
        let advance = if text.style.bold { 0.6 } else { 0.55 } * self.font_size;
        let mut lines = 0usize;
        let mut widest = 0usize;
        for line in text.content.split('\n') {
            lines += 1;
            widest = widest.max(line.chars().count());
        }
        Size::new(
            widest as f64 * advance + TEXT_PADDING * 2.0,
            lines as f64 * self.font_size * LINE_HEIGHT + TEXT_PADDING * 2.0,
        )
    }
}

/// Resolve an element's rendered size.
///
/// Triangles report their border box: `2 × half_width` by `height`.
pub fn resolve_size(element: &CanvasElement, measure: &dyn Measure) -> Size {
    match element.footprint {
        Footprint::Border { half_width, height } => Size::new(half_width * 2.0, height),
        Footprint::Sized { width, height } => {
            let width = match width {
                Extent::Px(w) => w,
                Extent::Auto => auto_width(element, measure),
            };
            let height = match height {
                Extent::Px(h) => h,
                Extent::Auto => auto_height(element, width, measure),
            };
            Size::new(width, height)
        }
    }
}

fn auto_width(element: &CanvasElement, measure: &dyn Measure) -> f64 {
    match &element.kind {
        ElementKind::Text(text) => measure.text_size(text).width.max(text.min_width),
        ElementKind::Image(image) => image.natural.map_or(0.0, |n| n.width),
        ElementKind::Shape(_) => 0.0,
    }
}

fn auto_height(element: &CanvasElement, width: f64, measure: &dyn Measure) -> f64 {
    match &element.kind {
        ElementKind::Text(text) => measure.text_size(text).height,
        ElementKind::Image(image) => match image.natural {
            Some(n) if n.width > 0.0 => width * n.height / n.width,
            // Formats without a header probe (SVG) are laid out square.
            _ => width,
        },
        ElementKind::Shape(_) => 0.0,
    }
}
