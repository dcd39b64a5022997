//! Canvas element model.
//!
//! A document is a flat list of `CanvasElement`s positioned in absolute
//! pixels relative to the canvas origin. Every element carries its own
//! styling; there is no inheritance and no grouping. Stacking is decided by
//! `z_index` alone.

use crate::id::ElementId;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    fn from_bytes(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::rgba(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            a,
        )
    }

    /// Parse a hex color string: `#RGB`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let pair = |i: usize| -> Option<u8> { Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) };

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::from_bytes(r * 17, g * 17, b * 17, 1.0))
            }
            6 => Some(Self::from_bytes(pair(0)?, pair(2)?, pair(4)?, 1.0)),
            8 => {
                let a = pair(6)?;
                Some(Self::from_bytes(pair(0)?, pair(2)?, pair(4)?, f32::from(a) / 255.0))
            }
            _ => None,
        }
    }

    /// Parse a CSS color as reported by a swatch's computed background:
    /// hex, `rgb(r, g, b)`, `rgba(r, g, b, a)` or `transparent`.
    pub fn parse_css(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("transparent") {
            return Some(Self::TRANSPARENT);
        }
        if value.starts_with('#') {
            return Self::from_hex(value);
        }

        let lower = value.to_ascii_lowercase();
        let (args, has_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
            (rest.strip_suffix(')')?, true)
        } else if let Some(rest) = lower.strip_prefix("rgb(") {
            (rest.strip_suffix(')')?, false)
        } else {
            return None;
        };

        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return None;
        }
        let channel = |s: &str| -> Option<u8> {
            let v: f32 = s.parse().ok()?;
            (0.0..=255.0).contains(&v).then(|| v.round() as u8)
        };
        let alpha = if has_alpha {
            let a: f32 = parts[3].parse().ok()?;
            a.clamp(0.0, 1.0)
        } else {
            1.0
        };
        Some(Self::from_bytes(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        ))
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_bytes();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    /// Emit as a CSS `rgba()` string for Canvas2D fill styles.
    pub fn to_css(&self) -> String {
        let [r, g, b, _] = self.to_bytes();
        format!("rgba({r}, {g}, {b}, {})", self.a)
    }

    fn to_bytes(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

// ─── Text ────────────────────────────────────────────────────────────────

/// Horizontal text alignment. Alignments are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Character styling of a text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub align: TextAlign,
    /// `None` renders with the presentation's default family.
    pub font_family: Option<String>,
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            align: TextAlign::Left,
            font_family: None,
            color: Color::BLACK,
        }
    }
}

/// Editable text content plus its styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub content: String,
    pub style: TextStyle,
    /// Lower bound of the auto-sized width, in pixels.
    pub min_width: f64,
}

// ─── Shapes ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
}

impl ShapeKind {
    /// Resolve a shape-menu name. Unknown names fall back to a rectangle.
    pub fn from_name(name: &str) -> Self {
        match name {
            "circle" => Self::Circle,
            "triangle" => Self::Triangle,
            _ => Self::Rectangle,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
        }
    }

    /// Capitalized name for user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Rectangle => "Rectangle",
            Self::Circle => "Circle",
            Self::Triangle => "Triangle",
        }
    }
}

/// A filled shape. For triangles `color` is the bottom border color that
/// forms the visible body; for the others it is the fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeBody {
    pub shape: ShapeKind,
    pub color: Color,
}

// ─── Images ──────────────────────────────────────────────────────────────

/// An embedded raster image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    /// `data:<mime>;base64,...`
    pub data_uri: String,
    pub mime: String,
    /// Intrinsic pixel size, when the data could be decoded.
    pub natural: Option<Size>,
}

// ─── Elements ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Text(TextBox),
    Shape(ShapeBody),
    Image(ImageSource),
}

impl ElementKind {
    /// Prefix used for generated element ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Shape(body) => body.shape.name(),
            Self::Image(_) => "image",
        }
    }
}

/// One axis of an element's box size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Extent {
    Px(f64),
    /// Sized by content (text) or intrinsic aspect ratio (images).
    Auto,
}

/// How an element's size is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Footprint {
    Sized { width: Extent, height: Extent },
    /// Triangle drawn from border geometry: transparent left/right borders
    /// of `half_width` and a colored bottom border of `height`.
    Border { half_width: f64, height: f64 },
}

impl Footprint {
    pub fn px(width: f64, height: f64) -> Self {
        Self::Sized {
            width: Extent::Px(width),
            height: Extent::Px(height),
        }
    }

    pub fn auto() -> Self {
        Self::Sized {
            width: Extent::Auto,
            height: Extent::Auto,
        }
    }
}

/// A placed element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasElement {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Top-left corner relative to the canvas origin.
    pub position: Point,
    pub footprint: Footprint,
    pub z_index: i64,
}

impl CanvasElement {
    /// Create an element with a fresh id derived from its kind.
    pub fn new(kind: ElementKind, position: Point, footprint: Footprint) -> Self {
        let id = ElementId::with_prefix(kind.id_prefix());
        Self {
            id,
            kind,
            position,
            footprint,
            z_index: 0,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text(_))
    }

    pub fn text(&self) -> Option<&TextBox> {
        match &self.kind {
            ElementKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut TextBox> {
        match &mut self.kind {
            ElementKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Box occupied by the element given its resolved size.
    pub fn bounds(&self, size: Size) -> Rect {
        Rect::from_origin_size(self.position, size)
    }

    /// A deep copy with a fresh id, offset by `(dx, dy)`.
    pub fn duplicate(&self, dx: f64, dy: f64) -> Self {
        let mut copy = self.clone();
        copy.id = ElementId::with_prefix(self.kind.id_prefix());
        copy.position = Point::new(self.position.x + dx, self.position.y + dy);
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let c = Color::from_hex("#4dabf7").unwrap();
        assert_eq!(c.to_hex(), "#4DABF7");
        assert_eq!(Color::from_hex("#fff").unwrap().to_hex(), "#FFFFFF");
        assert_eq!(Color::from_hex("#00000080").unwrap().to_hex(), "#00000080");
        assert!(Color::from_hex("#12").is_none());
        assert!(Color::from_hex("#zzzzzz").is_none());
    }

    #[test]
    fn css_rgb_and_rgba() {
        let c = Color::parse_css("rgb(255, 107, 107)").unwrap();
        assert_eq!(c.to_hex(), "#FF6B6B");
        let c = Color::parse_css("rgba(0, 0, 0, 0.5)").unwrap();
        assert!((c.a - 0.5).abs() < f32::EPSILON);
        assert_eq!(Color::parse_css("transparent"), Some(Color::TRANSPARENT));
        assert_eq!(Color::parse_css("#40c057").unwrap().to_hex(), "#40C057");
    }

    #[test]
    fn css_rejects_garbage() {
        assert!(Color::parse_css("rgb(1, 2)").is_none());
        assert!(Color::parse_css("rgb(300, 0, 0)").is_none());
        assert!(Color::parse_css("hsl(0, 50%, 50%)").is_none());
        assert!(Color::parse_css("").is_none());
    }

    #[test]
    fn shape_names_fall_back_to_rectangle() {
        assert_eq!(ShapeKind::from_name("circle"), ShapeKind::Circle);
        assert_eq!(ShapeKind::from_name("triangle"), ShapeKind::Triangle);
        assert_eq!(ShapeKind::from_name("hexagon"), ShapeKind::Rectangle);
        assert_eq!(ShapeKind::Circle.label(), "Circle");
    }

    #[test]
    fn duplicate_is_deep_and_offset() {
        let original = CanvasElement::new(
            ElementKind::Text(TextBox {
                content: "Hello".into(),
                style: TextStyle::default(),
                min_width: 150.0,
            }),
            Point::new(10.0, 30.0),
            Footprint::auto(),
        );
        let mut copy = original.duplicate(20.0, 20.0);
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.position, Point::new(30.0, 50.0));

        copy.text_mut().unwrap().content.push_str(" world");
        assert_eq!(original.text().unwrap().content, "Hello");
    }
}
