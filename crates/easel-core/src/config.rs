//! Editor configuration.
//!
//! Every field has a default, so a host only needs to supply the values it
//! wants to change: `{"viewport": {"width": 1024, "height": 768}}` is a
//! complete config.

use crate::error::EditorError;
use crate::model::Color;
use serde::{Deserialize, Serialize};

/// The canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Default fill per shape kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeColors {
    pub rectangle: Color,
    pub circle: Color,
    pub triangle: Color,
}

impl Default for ShapeColors {
    fn default() -> Self {
        Self {
            rectangle: Color::rgb8(0x4d, 0xab, 0xf7),
            circle: Color::rgb8(0x40, 0xc0, 0x57),
            triangle: Color::rgb8(0xfa, 0xb0, 0x05),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub viewport: Viewport,
    /// First z-index handed out by the stacking counter.
    pub initial_z_index: i64,
    /// Offset applied to both axes when duplicating.
    pub duplicate_offset: f64,
    /// Side length of newly created shapes.
    pub shape_size: f64,
    pub shape_colors: ShapeColors,
    pub text_placeholder: String,
    pub text_min_width: f64,
    /// Font size used when measuring and drawing text.
    pub text_font_size: f64,
    pub text_color: Color,
    /// Width of newly uploaded images; height follows the aspect ratio.
    pub image_width: f64,
    /// Fallback for width/height fields that do not parse.
    pub min_dimension: f64,
    pub toast_duration_ms: f64,
    /// Delay between construction and the first interactive frame.
    pub init_delay_ms: f64,
    /// Number of past toasts kept for inspection.
    pub toast_history: usize,
    /// Options offered by the font-family dropdown.
    pub fonts: Vec<String>,
    pub welcome_message: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            initial_z_index: 10,
            duplicate_offset: 20.0,
            shape_size: 100.0,
            shape_colors: ShapeColors::default(),
            text_placeholder: "Add your text here".into(),
            text_min_width: 150.0,
            text_font_size: 16.0,
            text_color: Color::rgb8(0x21, 0x25, 0x29),
            image_width: 200.0,
            min_dimension: 10.0,
            toast_duration_ms: 3000.0,
            init_delay_ms: 800.0,
            toast_history: 50,
            fonts: [
                "Arial",
                "Helvetica",
                "Georgia",
                "Times New Roman",
                "Courier New",
                "Verdana",
                "Trebuchet MS",
                "Impact",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            welcome_message: "Welcome to Easel! Click on any element to edit.".into(),
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config, filling omitted fields with defaults.
    ///
    /// # Errors
    /// Returns `EditorError::InvalidConfig` if the JSON is malformed or a
    /// field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        let config: Self = serde_json::from_str(json)?;
        log::debug!(
            "config loaded: viewport {}x{}",
            config.viewport.width,
            config.viewport.height
        );
        Ok(config)
    }
}
