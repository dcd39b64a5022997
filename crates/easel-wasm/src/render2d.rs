//! Canvas2D renderer.
//!
//! Draws the editor's display list to an HTML `<canvas>` via
//! `CanvasRenderingContext2d`, and measures text with the same context so
//! auto-sized text boxes match what is drawn.

use easel_core::ElementId;
use easel_core::model::*;
use easel_render::{LINE_HEIGHT, Measure, PaintItem, PaintOp, TEXT_PADDING};
use kurbo::{BezPath, PathEl, Rect, Size};
use std::collections::HashMap;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

const BACKGROUND: &str = "#FFFFFF";
const SELECTION: &str = "#4DABF7";
const DEFAULT_FAMILY: &str = "Arial, sans-serif";
/// Opacity of the element being dragged.
const DRAG_ALPHA: f64 = 0.8;

/// CSS `font` shorthand for a text style.
pub fn font_css(style: &TextStyle, size: f64) -> String {
    let italic = if style.italic { "italic " } else { "" };
    let weight = if style.bold { "bold " } else { "" };
    let family = style.font_family.as_deref().unwrap_or(DEFAULT_FAMILY);
    format!("{italic}{weight}{size}px {family}")
}

/// X coordinate a line is anchored at for the given alignment.
pub fn line_anchor(bounds: Rect, align: TextAlign) -> (f64, &'static str) {
    match align {
        TextAlign::Left => (bounds.x0 + TEXT_PADDING, "left"),
        TextAlign::Center => (bounds.center().x, "center"),
        TextAlign::Right => (bounds.x1 - TEXT_PADDING, "right"),
    }
}

// ─── Measurement ─────────────────────────────────────────────────────────

/// Text metrics from the live 2D context.
pub struct Canvas2dMeasure {
    ctx: CanvasRenderingContext2d,
    font_size: f64,
}

impl Canvas2dMeasure {
    pub fn new(ctx: CanvasRenderingContext2d, font_size: f64) -> Self {
        Self { ctx, font_size }
    }
}

impl Measure for Canvas2dMeasure {
    fn text_size(&self, text: &TextBox) -> Size {
        self.ctx.save();
        self.ctx.set_font(&font_css(&text.style, self.font_size));
        let mut lines = 0usize;
        let mut widest = 0.0f64;
        for line in text.content.split('\n') {
            lines += 1;
            let width = self.ctx.measure_text(line).map_or(0.0, |m| m.width());
            widest = widest.max(width);
        }
        self.ctx.restore();
        Size::new(
            widest + TEXT_PADDING * 2.0,
            lines as f64 * self.font_size * LINE_HEIGHT + TEXT_PADDING * 2.0,
        )
    }
}

// ─── Images ──────────────────────────────────────────────────────────────

/// Decoded `<img>` handles, keyed by element.
#[derive(Default)]
pub struct ImageCache {
    images: HashMap<ElementId, HtmlImageElement>,
}

impl ImageCache {
    fn get_or_load(&mut self, id: ElementId, data_uri: &str) -> Option<&HtmlImageElement> {
        if !self.images.contains_key(&id) {
            let img = HtmlImageElement::new().ok()?;
            img.set_src(data_uri);
            self.images.insert(id, img);
        }
        self.images.get(&id)
    }

    /// Drop handles whose elements are gone.
    pub fn retain(&mut self, live: impl Fn(ElementId) -> bool) {
        self.images.retain(|id, _| live(*id));
    }
}

// ─── Scene ───────────────────────────────────────────────────────────────

/// Paint the display list. Returns the ids of images the browser failed to
/// decode.
pub fn render_scene(
    ctx: &CanvasRenderingContext2d,
    items: &[PaintItem],
    canvas_size: Size,
    font_size: f64,
    images: &mut ImageCache,
) -> Vec<ElementId> {
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, canvas_size.width, canvas_size.height);

    let mut broken = Vec::new();
    for item in items {
        ctx.save();
        if item.dragging {
            ctx.set_global_alpha(DRAG_ALPHA);
        }
        let b = item.bounds;
        match &item.op {
            PaintOp::Rect { color } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(b.x0, b.y0, b.width(), b.height());
            }
            PaintOp::Ellipse { color } => {
                let c = b.center();
                ctx.begin_path();
                let _ = ctx.ellipse(c.x, c.y, b.width() / 2.0, b.height() / 2.0, 0.0, 0.0, std::f64::consts::TAU);
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill();
            }
            PaintOp::Path { path, color } => {
                trace_path(ctx, path);
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill();
            }
            PaintOp::Text { lines, style } => draw_text(ctx, b, lines, style, font_size),
            PaintOp::Image { data_uri } => {
                if let Some(img) = images.get_or_load(item.id, data_uri)
                    && img.complete()
                {
                    if img.natural_width() == 0 {
                        broken.push(item.id);
                    } else {
                        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                            img,
                            b.x0,
                            b.y0,
                            b.width(),
                            b.height(),
                        );
                    }
                }
            }
        }
        ctx.restore();

        if item.selected {
            draw_selection(ctx, b, matches!(item.op, PaintOp::Text { .. }));
        }
    }
    broken
}

fn trace_path(ctx: &CanvasRenderingContext2d, path: &BezPath) {
    ctx.begin_path();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => ctx.move_to(p.x, p.y),
            PathEl::LineTo(p) => ctx.line_to(p.x, p.y),
            PathEl::QuadTo(c, p) => ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
            PathEl::CurveTo(c1, c2, p) => ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            PathEl::ClosePath => ctx.close_path(),
        }
    }
}

fn draw_text(ctx: &CanvasRenderingContext2d, b: Rect, lines: &[String], style: &TextStyle, font_size: f64) {
    ctx.set_font(&font_css(style, font_size));
    let color = style.color.to_css();
    ctx.set_fill_style_str(&color);
    ctx.set_stroke_style_str(&color);
    ctx.set_line_width(1.0);
    ctx.set_text_baseline("top");
    let (x, align) = line_anchor(b, style.align);
    ctx.set_text_align(align);

    let line_height = font_size * LINE_HEIGHT;
    for (i, line) in lines.iter().enumerate() {
        let y = b.y0 + TEXT_PADDING + i as f64 * line_height;
        let _ = ctx.fill_text(line, x, y);
        if style.underline {
            let width = ctx.measure_text(line).map_or(0.0, |m| m.width());
            let start = match style.align {
                TextAlign::Left => x,
                TextAlign::Center => x - width / 2.0,
                TextAlign::Right => x - width,
            };
            let under = y + font_size + 1.0;
            ctx.begin_path();
            ctx.move_to(start, under);
            ctx.line_to(start + width, under);
            ctx.stroke();
        }
    }
}

/// Solid outline, dashed around text boxes.
fn draw_selection(ctx: &CanvasRenderingContext2d, b: Rect, dashed: bool) {
    ctx.save();
    ctx.set_stroke_style_str(SELECTION);
    ctx.set_line_width(2.0);
    if dashed {
        let _ = ctx.set_line_dash(&js_sys::Array::of2(
            &wasm_bindgen::JsValue::from_f64(4.0),
            &wasm_bindgen::JsValue::from_f64(4.0),
        ));
    }
    ctx.stroke_rect(b.x0 - 1.0, b.y0 - 1.0, b.width() + 2.0, b.height() + 2.0);
    ctx.restore();
}
