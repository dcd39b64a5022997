pub mod drag;
pub mod editor;
pub mod input;
pub mod mutation;
pub mod notify;
pub mod panel;
pub mod selection;
pub mod shortcuts;
pub mod style;
pub mod tools;
pub mod upload;

pub use editor::{Editor, ToolResponse};
pub use input::{InputEvent, Modifiers, PointerSource};
pub use mutation::{Mutation, apply_mutation};
