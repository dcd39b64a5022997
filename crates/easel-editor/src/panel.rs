//! Property panel binding.
//!
//! The panel holds the raw strings of its four numeric fields. Selecting an
//! element (or dragging it) re-projects the store into those strings; editing
//! a field records the string and produces the `Mutation` that writes it
//! back. Width and height are always written together from both fields.

use crate::mutation::Mutation;
use easel_core::model::*;
use easel_core::{Point, Size};
use easel_render::{Measure, resolve_size};
use serde::Serialize;

/// Size shown for a triangle whose border geometry is zero.
pub const TRIANGLE_FALLBACK: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelField {
    X,
    Y,
    Width,
    Height,
}

impl PanelField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "width" => Some(Self::Width),
            "height" => Some(Self::Height),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Width => "width",
            Self::Height => "height",
        }
    }

    fn is_dimension(self) -> bool {
        matches!(self, Self::Width | Self::Height)
    }
}

/// Current contents of the numeric inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PanelFields {
    pub x: String,
    pub y: String,
    pub width: String,
    pub height: String,
}

impl PanelFields {
    pub fn get(&self, field: PanelField) -> &str {
        match field {
            PanelField::X => &self.x,
            PanelField::Y => &self.y,
            PanelField::Width => &self.width,
            PanelField::Height => &self.height,
        }
    }

    fn slot(&mut self, field: PanelField) -> &mut String {
        match field {
            PanelField::X => &mut self.x,
            PanelField::Y => &mut self.y,
            PanelField::Width => &mut self.width,
            PanelField::Height => &mut self.height,
        }
    }
}

/// State of the text-only control group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextControls {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub align: TextAlign,
    /// Index into the configured font list, when the family is listed.
    pub font_index: Option<usize>,
    pub color: String,
}

/// Everything the host needs to draw the panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub visible: bool,
    pub element_id: Option<String>,
    pub kind: Option<&'static str>,
    pub fields: PanelFields,
    /// Present only while a text element is selected.
    pub text: Option<TextControls>,
}

#[derive(Debug, Default)]
pub struct PropertyPanel {
    visible: bool,
    fields: PanelFields,
}

impl PropertyPanel {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn fields(&self) -> &PanelFields {
        &self.fields
    }

    /// Open the panel over `element`.
    pub fn show(&mut self, element: &CanvasElement, measure: &dyn Measure) {
        self.visible = true;
        self.refresh(element, measure);
    }

    /// Re-project `element` into the fields.
    pub fn refresh(&mut self, element: &CanvasElement, measure: &dyn Measure) {
        let size = displayed_size(element, measure);
        self.fields = PanelFields {
            x: format_px(element.position.x),
            y: format_px(element.position.y),
            width: format_px(size.width),
            height: format_px(size.height),
        };
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Record an edit to `field` and return the write-back mutation.
    pub fn edit(
        &mut self,
        element: &CanvasElement,
        field: PanelField,
        value: &str,
        min_dimension: f64,
    ) -> Mutation {
        *self.fields.slot(field) = value.to_string();
        if field.is_dimension() {
            dimensions_mutation(element, &self.fields, min_dimension)
        } else {
            position_mutation(element, &self.fields)
        }
    }

    pub fn view(&self, element: Option<&CanvasElement>, fonts: &[String]) -> PanelView {
        let Some(element) = element.filter(|_| self.visible) else {
            return PanelView {
                visible: false,
                element_id: None,
                kind: None,
                fields: PanelFields::default(),
                text: None,
            };
        };
        PanelView {
            visible: true,
            element_id: Some(element.id.as_str().to_string()),
            kind: Some(kind_name(element)),
            fields: self.fields.clone(),
            text: element.text().map(|text| text_controls(text, fonts)),
        }
    }
}

fn kind_name(element: &CanvasElement) -> &'static str {
    match &element.kind {
        ElementKind::Text(_) => "text",
        ElementKind::Shape(body) => body.shape.name(),
        ElementKind::Image(_) => "image",
    }
}

/// Rounds halves toward +∞, so `-2.5` shows as `-2`.
fn format_px(v: f64) -> String {
    format!("{}", (v + 0.5).floor() as i64)
}

pub fn text_controls(text: &TextBox, fonts: &[String]) -> TextControls {
    TextControls {
        bold: text.style.bold,
        italic: text.style.italic,
        underline: text.style.underline,
        align: text.style.align,
        font_index: text
            .style
            .font_family
            .as_deref()
            .and_then(|family| font_index(fonts, family)),
        color: text.style.color.to_hex(),
    }
}

/// Find `family` in the dropdown, ignoring the quotes a browser puts around
/// multi-word family names.
pub fn font_index(fonts: &[String], family: &str) -> Option<usize> {
    let bare = family.trim().trim_matches(|c| c == '"' || c == '\'');
    fonts.iter().position(|f| f == bare)
}

/// Size shown in the panel. Triangles report their border box, with zero
/// geometry shown as 100.
pub fn displayed_size(element: &CanvasElement, measure: &dyn Measure) -> Size {
    match element.footprint {
        Footprint::Border { half_width, height } => Size::new(
            if half_width == 0.0 {
                TRIANGLE_FALLBACK
            } else {
                half_width * 2.0
            },
            if height == 0.0 { TRIANGLE_FALLBACK } else { height },
        ),
        Footprint::Sized { .. } => resolve_size(element, measure),
    }
}

/// Integer-prefix parse: leading whitespace, optional sign, then digits up
/// to the first non-digit. `"50px"` → 50, `"12.9"` → 12, `"px"` → `None`.
/// Digit runs past the `i64` range saturate.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let signed = if negative {
        format!("-{}", &digits[..end])
    } else {
        digits[..end].to_string()
    };
    Some(signed.parse().unwrap_or(if negative { i64::MIN } else { i64::MAX }))
}

/// Parse a width/height field. Anything that is not a positive integer
/// falls back to `min_dimension`.
pub fn parse_dimension(s: &str, min_dimension: f64) -> f64 {
    match parse_leading_int(s) {
        Some(v) if v > 0 => v as f64,
        _ => min_dimension,
    }
}

/// Parse an x/y field. Non-numbers become 0.
pub fn parse_position(s: &str) -> f64 {
    parse_leading_int(s).unwrap_or(0) as f64
}

/// Write both dimension fields back to `element`.
pub fn dimensions_mutation(element: &CanvasElement, fields: &PanelFields, min_dimension: f64) -> Mutation {
    let width = parse_dimension(&fields.width, min_dimension);
    let height = parse_dimension(&fields.height, min_dimension);
    let footprint = match element.footprint {
        Footprint::Border { .. } => Footprint::Border {
            half_width: (width / 2.0).round(),
            height,
        },
        Footprint::Sized { .. } => Footprint::px(width, height),
    };
    Mutation::SetFootprint {
        id: element.id,
        footprint,
    }
}

/// Write both position fields back to `element`.
pub fn position_mutation(element: &CanvasElement, fields: &PanelFields) -> Mutation {
    Mutation::MoveTo {
        id: element.id,
        position: Point::new(parse_position(&fields.x), parse_position(&fields.y)),
    }
}
