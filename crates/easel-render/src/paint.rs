//! Element store → paint-ordered display list.
//!
//! Renderers (Canvas2D in the browser, anything else natively) consume the
//! list front to back without knowing about footprints, auto sizes or
//! stacking rules.

use crate::measure::{Measure, resolve_size};
use easel_core::model::*;
use easel_core::{Canvas, ElementId};
use kurbo::{BezPath, Point, Rect};

/// Interaction markers that affect drawing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaintState {
    pub selected: Option<ElementId>,
    pub dragging: Option<ElementId>,
}

/// A single drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    Rect { color: Color },
    Ellipse { color: Color },
    /// Closed path in canvas coordinates.
    Path { path: BezPath, color: Color },
    Text { lines: Vec<String>, style: TextStyle },
    Image { data_uri: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaintItem {
    pub id: ElementId,
    pub bounds: Rect,
    pub op: PaintOp,
    pub selected: bool,
    pub dragging: bool,
}

/// Build the display list bottom-to-top.
pub fn build_display_list(canvas: &Canvas, measure: &dyn Measure, state: PaintState) -> Vec<PaintItem> {
    canvas
        .paint_order()
        .into_iter()
        .map(|element| {
            let bounds = element.bounds(resolve_size(element, measure));
            let op = paint_op(element, bounds);
            log::trace!("PAINT {} z={} {:?}", element.id, element.z_index, bounds);
            PaintItem {
                id: element.id,
                bounds,
                op,
                selected: state.selected == Some(element.id),
                dragging: state.dragging == Some(element.id),
            }
        })
        .collect()
}

fn paint_op(element: &CanvasElement, bounds: Rect) -> PaintOp {
    match &element.kind {
        ElementKind::Shape(body) => match body.shape {
            ShapeKind::Rectangle => PaintOp::Rect { color: body.color },
            ShapeKind::Circle => PaintOp::Ellipse { color: body.color },
            ShapeKind::Triangle => PaintOp::Path {
                path: triangle_path(bounds),
                color: body.color,
            },
        },
        ElementKind::Text(text) => PaintOp::Text {
            lines: text.content.split('\n').map(String::from).collect(),
            style: text.style.clone(),
        },
        ElementKind::Image(image) => PaintOp::Image {
            data_uri: image.data_uri.clone(),
        },
    }
}

/// Apex at top-center, base along the bottom edge: the shape a
/// transparent-sided bottom border produces.
fn triangle_path(bounds: Rect) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(Point::new(bounds.center().x, bounds.y0));
    path.line_to(Point::new(bounds.x1, bounds.y1));
    path.line_to(Point::new(bounds.x0, bounds.y1));
    path.close_path();
    path
}
