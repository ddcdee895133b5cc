use crate::fonts::StandardFont;
use quittance_types::{Color, Rect};

/// Something to draw, positioned in top-left page coordinates (points).
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedElement {
    pub rect: Rect,
    pub element: Element,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A single line of text; `rect.y` is the top of the line box.
    Text {
        content: String,
        font: StandardFont,
        size: f32,
        color: Color,
    },
    /// A horizontal rule along the top edge of `rect`.
    Rule { color: Color, thickness: f32 },
    Fill { color: Color },
    /// An image XObject registered with the document under `name`, scaled into `rect`.
    Image { name: String },
}

impl PositionedElement {
    pub fn text(x: f32, y: f32, content: impl Into<String>, font: StandardFont, size: f32, color: Color) -> Self {
        let content = content.into();
        let width = font.text_width(&content, size);
        Self {
            rect: Rect::new(x, y, width, size),
            element: Element::Text {
                content,
                font,
                size,
                color,
            },
        }
    }

    pub fn rule(x: f32, y: f32, width: f32, thickness: f32, color: Color) -> Self {
        Self {
            rect: Rect::new(x, y, width, thickness),
            element: Element::Rule { color, thickness },
        }
    }

    pub fn fill(rect: Rect, color: Color) -> Self {
        Self {
            rect,
            element: Element::Fill { color },
        }
    }

    pub fn image(rect: Rect, name: impl Into<String>) -> Self {
        Self {
            rect,
            element: Element::Image { name: name.into() },
        }
    }

    /// The text content, if this is a text element.
    pub fn as_text(&self) -> Option<&str> {
        match &self.element {
            Element::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}
