pub mod canvas;
pub mod config;
pub mod error;
pub mod id;
pub mod model;

pub use canvas::Canvas;
pub use config::{EditorConfig, Viewport};
pub use error::EditorError;
pub use id::ElementId;
pub use model::*;

// Re-export kurbo geometry so downstream crates share one set of types
pub use kurbo::{Point, Rect, Size};
