//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. Uses
//! platform-aware modifier detection: on macOS `meta` is ⌘, elsewhere
//! `ctrl` serves the same role.

use crate::input::Modifiers;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Clear the selection and close open menus.
    Deselect,
    Delete,
    Duplicate,
}

impl ShortcutAction {
    pub fn name(self) -> &'static str {
        match self {
            Self::Deselect => "deselect",
            Self::Delete => "delete",
            Self::Duplicate => "duplicate",
        }
    }
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"d"`, `"Delete"`).
    /// Escape and Delete apply regardless of held modifiers.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        match key {
            "Escape" => return Some(ShortcutAction::Deselect),
            "Delete" => return Some(ShortcutAction::Delete),
            _ => {}
        }

        if modifiers.command() {
            return match key {
                "d" | "D" => Some(ShortcutAction::Duplicate),
                _ => None,
            };
        }

        None
    }
}
