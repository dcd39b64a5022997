pub mod hit;
pub mod measure;
pub mod paint;

pub use hit::hit_test;
pub use measure::{EstimatedMeasure, LINE_HEIGHT, Measure, TEXT_PADDING, resolve_size};
pub use paint::{PaintItem, PaintOp, PaintState, build_display_list};
