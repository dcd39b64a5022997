//! The element store.
//!
//! Elements are kept in insertion order, which is also the tie-break for
//! equal z-indices when painting and hit testing (later elements draw on
//! top). The store owns the process-wide stacking counter.

use crate::id::ElementId;
use crate::model::CanvasElement;

#[derive(Debug, Clone)]
pub struct Canvas {
    elements: Vec<CanvasElement>,
    /// Next value handed out by `next_z_index`. Only ever grows.
    next_z: i64,
}

impl Canvas {
    pub fn new(initial_z: i64) -> Self {
        Self {
            elements: Vec::new(),
            next_z: initial_z,
        }
    }

    /// Create a store over pre-placed elements. Call `adopt_existing` to
    /// raise the counter above their z-indices.
    pub fn with_elements(elements: Vec<CanvasElement>, initial_z: i64) -> Self {
        Self {
            elements,
            next_z: initial_z,
        }
    }

    /// Raise the counter so it sits above every adopted element.
    /// Elements without a positive z-index count as 1.
    pub fn adopt_existing(&mut self) {
        for element in &self.elements {
            let z = if element.z_index > 0 { element.z_index } else { 1 };
            if z >= self.next_z {
                self.next_z = z + 1;
            }
        }
        log::debug!(
            "adopted {} element(s), next z-index {}",
            self.elements.len(),
            self.next_z
        );
    }

    /// Take the next stacking value and advance the counter.
    pub fn next_z_index(&mut self) -> i64 {
        let z = self.next_z;
        self.next_z += 1;
        z
    }

    /// The value the next call to `next_z_index` will return.
    pub fn peek_z_index(&self) -> i64 {
        self.next_z
    }

    pub fn insert(&mut self, element: CanvasElement) {
        self.elements.push(element);
    }

    pub fn remove(&mut self, id: ElementId) -> Option<CanvasElement> {
        let idx = self.index_of(id)?;
        Some(self.elements.remove(idx))
    }

    pub fn get(&self, id: ElementId) -> Option<&CanvasElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut CanvasElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &CanvasElement> {
        self.elements.iter()
    }

    /// Elements bottom-to-top: ascending z-index, insertion order on ties.
    pub fn paint_order(&self) -> Vec<&CanvasElement> {
        let mut ordered: Vec<&CanvasElement> = self.elements.iter().collect();
        // sort_by_key is stable, so ties keep insertion order
        ordered.sort_by_key(|e| e.z_index);
        ordered
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(10)
    }
}
