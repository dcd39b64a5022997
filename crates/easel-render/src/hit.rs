//! Hit testing: point → element lookup.
//!
//! Walks elements top-to-bottom (reverse paint order) and returns the first
//! whose box contains the point.

use crate::measure::{Measure, resolve_size};
use easel_core::{Canvas, ElementId};
use kurbo::Point;

/// Find the topmost element at `point`.
/// Returns `None` if the point is over empty canvas.
pub fn hit_test(canvas: &Canvas, measure: &dyn Measure, point: Point) -> Option<ElementId> {
    let hit = canvas
        .paint_order()
        .into_iter()
        .rev()
        .find(|e| e.bounds(resolve_size(e, measure)).contains(point))
        .map(|e| e.id);
    log::trace!("hit ({}, {}) -> {:?}", point.x, point.y, hit);
    hit
}
