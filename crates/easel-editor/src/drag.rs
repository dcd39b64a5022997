//! Drag controller: Idle → Dragging → Idle.
//!
//! Positions are computed from the gesture start, not accumulated per
//! event: `position = element_start + (pointer - pointer_start)`. No
//! clamping is applied, so elements may be dragged past the canvas edge.

use crate::mutation::Mutation;
use easel_core::{ElementId, Point};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        id: ElementId,
        pointer_start: Point,
        element_start: Point,
        /// Set once any move event arrived.
        moved: bool,
    },
}

/// How a finished gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOutcome {
    pub id: ElementId,
    pub moved: bool,
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// The element currently carrying the dragging marker.
    pub fn dragging(&self) -> Option<ElementId> {
        match self.state {
            DragState::Dragging { id, .. } => Some(id),
            DragState::Idle => None,
        }
    }

    pub fn begin(&mut self, id: ElementId, pointer: Point, element_start: Point) {
        log::debug!("drag start {id} at ({}, {})", pointer.x, pointer.y);
        self.state = DragState::Dragging {
            id,
            pointer_start: pointer,
            element_start,
            moved: false,
        };
    }

    /// Translate a pointer move into a position update.
    pub fn update(&mut self, pointer: Point) -> Option<Mutation> {
        let DragState::Dragging {
            id,
            pointer_start,
            element_start,
            ref mut moved,
        } = self.state
        else {
            return None;
        };
        *moved = true;
        let delta = pointer - pointer_start;
        Some(Mutation::MoveTo {
            id,
            position: element_start + delta,
        })
    }

    /// Finish the gesture and clear the dragging marker.
    pub fn end(&mut self) -> Option<DragOutcome> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { id, moved, .. } => {
                log::debug!("drag end {id} (moved: {moved})");
                Some(DragOutcome { id, moved })
            }
            DragState::Idle => None,
        }
    }

    /// Abandon a gesture whose element disappeared.
    pub fn forget(&mut self, id: ElementId) {
        if self.dragging() == Some(id) {
            self.state = DragState::Idle;
        }
    }
}
