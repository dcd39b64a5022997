//! Element mutations.
//!
//! Every change to the element store goes through a `Mutation`, so drag,
//! panel, style and tool code never touch the store directly.

use easel_core::model::*;
use easel_core::{Canvas, ElementId, Point};

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Insert { element: Box<CanvasElement> },
    Remove { id: ElementId },
    MoveTo { id: ElementId, position: Point },
    SetFootprint { id: ElementId, footprint: Footprint },
    SetZIndex { id: ElementId, z_index: i64 },
    SetTextStyle { id: ElementId, style: TextStyle },
    /// Text color, shape fill, or triangle border color depending on kind.
    SetColor { id: ElementId, color: Color },
    SetText { id: ElementId, content: String },
}

/// Apply a mutation. Returns `true` if the store changed.
pub fn apply_mutation(canvas: &mut Canvas, mutation: Mutation) -> bool {
    log::debug!("apply {mutation:?}");
    match mutation {
        Mutation::Insert { element } => {
            canvas.insert(*element);
            true
        }
        Mutation::Remove { id } => canvas.remove(id).is_some(),
        Mutation::MoveTo { id, position } => match canvas.get_mut(id) {
            Some(element) => {
                element.position = position;
                true
            }
            None => false,
        },
        Mutation::SetFootprint { id, footprint } => match canvas.get_mut(id) {
            Some(element) => {
                element.footprint = footprint;
                true
            }
            None => false,
        },
        Mutation::SetZIndex { id, z_index } => match canvas.get_mut(id) {
            Some(element) => {
                element.z_index = z_index;
                true
            }
            None => false,
        },
        Mutation::SetTextStyle { id, style } => {
            if let Some(element) = canvas.get_mut(id)
                && let Some(text) = element.text_mut()
            {
                text.style = style;
                return true;
            }
            false
        }
        Mutation::SetColor { id, color } => {
            let Some(element) = canvas.get_mut(id) else {
                return false;
            };
            match &mut element.kind {
                ElementKind::Text(text) => text.style.color = color,
                ElementKind::Shape(body) => body.color = color,
                ElementKind::Image(_) => return false,
            }
            true
        }
        Mutation::SetText { id, content } => {
            if let Some(element) = canvas.get_mut(id)
                && let Some(text) = element.text_mut()
            {
                text.content = content;
                return true;
            }
            false
        }
    }
}
