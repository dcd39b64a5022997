//! Toolbar tools.
//!
//! Each tool turns a toolbar click into a `ToolAction`: an element to
//! place, a flyout menu toggle, or a request for the host to open a file
//! picker.
//!
//! | Tool | Action |
//! |------|--------|
//! | **Text** | Placeholder text box centered on the canvas |
//! | **Shapes** | Toggle the shape flyout next to the toolbar button |
//! | **Upload** | Native file picker restricted to `image/*` |

use easel_core::model::*;
use easel_core::{EditorConfig, Point, Rect};

/// Width reserved for the shapes flyout when choosing its side.
pub const MENU_WIDTH: f64 = 200.0;
/// Gap between the toolbar button and the flyout.
pub const MENU_GAP: f64 = 10.0;
/// MIME filter handed to the file picker.
pub const IMAGE_ACCEPT: &str = "image/*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Text,
    Shapes,
    Upload,
}

impl ToolKind {
    /// Resolve a toolbar `data-tool` value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(Self::Text),
            "shapes" => Some(Self::Shapes),
            "upload" => Some(Self::Upload),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Shapes => "shapes",
            Self::Upload => "upload",
        }
    }
}

/// What the toolbar button was and where the page is.
pub struct ToolContext<'a> {
    pub config: &'a EditorConfig,
    /// Screen rect of the clicked toolbar button.
    pub anchor: Rect,
    pub window_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToolAction {
    /// Place this element (z-index still unassigned).
    Create(Box<CanvasElement>),
    MenuToggled { open: bool },
    PickFile { accept: &'static str },
}

/// Trait for toolbar tools.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    fn activate(&mut self, ctx: &ToolContext<'_>) -> ToolAction;
}

// ─── Text Tool ───────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct TextTool;

impl Tool for TextTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Text
    }

    fn activate(&mut self, ctx: &ToolContext<'_>) -> ToolAction {
        ToolAction::Create(Box::new(text_element(ctx.config)))
    }
}

/// A placeholder text box offset (−100, −50) from the canvas center.
pub fn text_element(config: &EditorConfig) -> CanvasElement {
    let vp = config.viewport;
    CanvasElement::new(
        ElementKind::Text(TextBox {
            content: config.text_placeholder.clone(),
            style: TextStyle {
                color: config.text_color,
                ..TextStyle::default()
            },
            min_width: config.text_min_width,
        }),
        Point::new(vp.width / 2.0 - 100.0, vp.height / 2.0 - 50.0),
        Footprint::auto(),
    )
}

// ─── Shapes Tool ─────────────────────────────────────────────────────────

/// The shapes tool owns the flyout menu state.
#[derive(Debug, Default)]
pub struct ShapesTool {
    /// Top-left of the open menu; `None` when hidden.
    menu: Option<Point>,
}

impl ShapesTool {
    pub fn menu_position(&self) -> Option<Point> {
        self.menu
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.is_some()
    }

    pub fn close_menu(&mut self) {
        self.menu = None;
    }

    /// Pick a shape from the menu. Closes the menu.
    pub fn choose(&mut self, config: &EditorConfig, shape: ShapeKind) -> CanvasElement {
        self.menu = None;
        shape_element(config, shape)
    }
}

impl Tool for ShapesTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Shapes
    }

    fn activate(&mut self, ctx: &ToolContext<'_>) -> ToolAction {
        if self.menu.take().is_none() {
            self.menu = Some(menu_origin(ctx.anchor, ctx.window_width));
        }
        ToolAction::MenuToggled {
            open: self.menu.is_some(),
        }
    }
}

/// Open to the right of the button, or to its left when the menu would
/// overflow the window.
pub fn menu_origin(anchor: Rect, window_width: f64) -> Point {
    let x = if anchor.x1 + MENU_WIDTH > window_width {
        anchor.x0 - MENU_WIDTH
    } else {
        anchor.x1 + MENU_GAP
    };
    Point::new(x, anchor.y0)
}

/// A default-sized shape centered on the canvas.
pub fn shape_element(config: &EditorConfig, shape: ShapeKind) -> CanvasElement {
    let vp = config.viewport;
    let side = config.shape_size;
    let (color, footprint) = match shape {
        ShapeKind::Rectangle => (config.shape_colors.rectangle, Footprint::px(side, side)),
        ShapeKind::Circle => (config.shape_colors.circle, Footprint::px(side, side)),
        ShapeKind::Triangle => (
            config.shape_colors.triangle,
            Footprint::Border {
                half_width: side / 2.0,
                height: side,
            },
        ),
    };
    CanvasElement::new(
        ElementKind::Shape(ShapeBody { shape, color }),
        Point::new(vp.width / 2.0 - side / 2.0, vp.height / 2.0 - side / 2.0),
        footprint,
    )
}

// ─── Upload Tool ─────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct UploadTool;

impl Tool for UploadTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Upload
    }

    fn activate(&mut self, _ctx: &ToolContext<'_>) -> ToolAction {
        ToolAction::PickFile {
            accept: IMAGE_ACCEPT,
        }
    }
}

/// An uploaded image offset (−100, −100) from the canvas center, with
/// configured width and automatic height.
pub fn image_element(config: &EditorConfig, image: ImageSource) -> CanvasElement {
    let vp = config.viewport;
    CanvasElement::new(
        ElementKind::Image(image),
        Point::new(vp.width / 2.0 - 100.0, vp.height / 2.0 - 100.0),
        Footprint::Sized {
            width: Extent::Px(config.image_width),
            height: Extent::Auto,
        },
    )
}
