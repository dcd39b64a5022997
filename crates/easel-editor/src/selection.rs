//! Single-element selection.

use easel_core::ElementId;

/// At most one selected element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<ElementId>,
}

impl Selection {
    /// Select `id`, implicitly deselecting the previous element.
    /// Returns the previously selected element, if any.
    pub fn select(&mut self, id: ElementId) -> Option<ElementId> {
        self.selected.replace(id)
    }

    /// Clear the selection. Returns what was selected.
    pub fn deselect_all(&mut self) -> Option<ElementId> {
        self.selected.take()
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected == Some(id)
    }

    /// Drop `id` from the selection after it has been removed from the store.
    pub fn forget(&mut self, id: ElementId) {
        if self.is_selected(id) {
            self.selected = None;
        }
    }
}
