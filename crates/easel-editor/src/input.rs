//! Input abstraction layer.
//!
//! Normalizes mouse and touch events into a unified `InputEvent` consumed by
//! the editor. Touch events carry the first touch point only.

use kurbo::Point;

/// Which device produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
}

/// Keyboard modifier flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, ⌘ on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized input event, in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse down or touch start.
    PointerDown { x: f64, y: f64, source: PointerSource },

    /// Mouse move or touch move.
    PointerMove { x: f64, y: f64, source: PointerSource },

    /// Mouse up or touch end.
    PointerUp { x: f64, y: f64, source: PointerSource },

    /// Touch cancelled by the platform.
    PointerCancel,

    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64, source: PointerSource) -> Self {
        Self::PointerDown { x, y, source }
    }

    pub fn pointer_move(x: f64, y: f64, source: PointerSource) -> Self {
        Self::PointerMove { x, y, source }
    }

    pub fn pointer_up(x: f64, y: f64, source: PointerSource) -> Self {
        Self::PointerUp { x, y, source }
    }

    pub fn key(key: &str, modifiers: Modifiers) -> Self {
        Self::Key {
            key: key.to_string(),
            modifiers,
        }
    }

    /// Extract position if this is a positioned pointer event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }
}
