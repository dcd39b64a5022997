//! Text styling and color application.

use crate::mutation::Mutation;
use easel_core::model::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleToggle {
    Bold,
    Italic,
    Underline,
}

impl StyleToggle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bold" => Some(Self::Bold),
            "italic" => Some(Self::Italic),
            "underline" => Some(Self::Underline),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
        }
    }
}

/// `style` with one flag flipped.
pub fn toggled(style: &TextStyle, toggle: StyleToggle) -> TextStyle {
    let mut next = style.clone();
    let flag = match toggle {
        StyleToggle::Bold => &mut next.bold,
        StyleToggle::Italic => &mut next.italic,
        StyleToggle::Underline => &mut next.underline,
    };
    *flag = !*flag;
    next
}

pub fn aligned(style: &TextStyle, align: TextAlign) -> TextStyle {
    TextStyle {
        align,
        ..style.clone()
    }
}

pub fn with_font(style: &TextStyle, family: &str) -> TextStyle {
    TextStyle {
        font_family: Some(family.to_string()),
        ..style.clone()
    }
}

/// Restyle a text element. `None` for any other kind.
pub fn text_style_mutation(
    element: &CanvasElement,
    restyle: impl FnOnce(&TextStyle) -> TextStyle,
) -> Option<Mutation> {
    let text = element.text()?;
    Some(Mutation::SetTextStyle {
        id: element.id,
        style: restyle(&text.style),
    })
}

/// Apply a swatch color. Images and unparseable colors yield `None`.
pub fn color_mutation(element: &CanvasElement, css: &str) -> Option<Mutation> {
    if matches!(element.kind, ElementKind::Image(_)) {
        return None;
    }
    let Some(color) = Color::parse_css(css) else {
        log::warn!("ignoring unparseable color {css:?}");
        return None;
    };
    Some(Mutation::SetColor {
        id: element.id,
        color,
    })
}
