use crate::element::{Element, PositionedElement};
use crate::error::RenderError;
use crate::fonts::{encode_win_ansi, StandardFont};
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use quittance_types::Color;

/// Distance from the top of a line box to the text baseline, as a share of font size.
const ASCENT_RATIO: f32 = 0.8;

#[derive(Debug, Default, Clone, PartialEq)]
struct CanvasState {
    font: Option<(StandardFont, f32)>,
    fill: Option<Color>,
    stroke: Option<Color>,
    line_width: Option<f32>,
}

/// Builds the content stream of one page.
///
/// Elements arrive in top-left coordinates and are flipped into PDF user
/// space here. Font, color and line width operators are only emitted when
/// they change.
pub struct PageCanvas {
    page_height: f32,
    content: Content,
    state: CanvasState,
}

impl PageCanvas {
    pub fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: CanvasState::default(),
        }
    }

    pub fn draw(&mut self, el: &PositionedElement) {
        match &el.element {
            Element::Text {
                content,
                font,
                size,
                color,
            } => self.draw_text(el, content, *font, *size, *color),
            Element::Rule { color, thickness } => self.draw_rule(el, *color, *thickness),
            Element::Fill { color } => self.fill_rect(el, *color),
            Element::Image { name } => self.draw_image(el, name),
        }
    }

    pub fn draw_all<'a>(&mut self, elements: impl IntoIterator<Item = &'a PositionedElement>) {
        for el in elements {
            self.draw(el);
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    /// Serializes the page's content stream.
    pub fn encode(self) -> Result<Vec<u8>, RenderError> {
        Ok(self.finish().encode()?)
    }

    fn flip_y(&self, top: f32, height: f32) -> f32 {
        self.page_height - (top + height)
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill = Some(color);
        }
    }

    fn set_stroke_color(&mut self, color: Color) {
        if self.state.stroke != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.push("RG", vec![r.into(), g.into(), b.into()]);
            self.state.stroke = Some(color);
        }
    }

    fn set_font(&mut self, font: StandardFont, size: f32) {
        if self.state.font != Some((font, size)) {
            self.push("Tf", vec![Object::Name(font.resource_name().as_bytes().to_vec()), size.into()]);
            self.state.font = Some((font, size));
        }
    }

    fn draw_text(&mut self, el: &PositionedElement, content: &str, font: StandardFont, size: f32, color: Color) {
        if content.is_empty() {
            return;
        }
        let baseline = self.page_height - (el.rect.y + size * ASCENT_RATIO);
        self.set_fill_color(color);
        self.push("BT", vec![]);
        self.set_font(font, size);
        self.push("Td", vec![el.rect.x.into(), baseline.into()]);
        self.push(
            "Tj",
            vec![Object::String(encode_win_ansi(content), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }

    fn draw_rule(&mut self, el: &PositionedElement, color: Color, thickness: f32) {
        let y = self.page_height - el.rect.y;
        if self.state.line_width != Some(thickness) {
            self.push("w", vec![thickness.into()]);
            self.state.line_width = Some(thickness);
        }
        self.set_stroke_color(color);
        self.push("m", vec![el.rect.x.into(), y.into()]);
        self.push("l", vec![el.rect.right().into(), y.into()]);
        self.push("S", vec![]);
    }

    fn fill_rect(&mut self, el: &PositionedElement, color: Color) {
        let y = self.flip_y(el.rect.y, el.rect.height);
        self.set_fill_color(color);
        self.push(
            "re",
            vec![el.rect.x.into(), y.into(), el.rect.width.into(), el.rect.height.into()],
        );
        self.push("f", vec![]);
    }

    // q/Q restores the tracked state, so nothing needs resetting afterwards.
    fn draw_image(&mut self, el: &PositionedElement, name: &str) {
        let y = self.flip_y(el.rect.y, el.rect.height);
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                el.rect.width.into(),
                0.into(),
                0.into(),
                el.rect.height.into(),
                el.rect.x.into(),
                y.into(),
            ],
        );
        self.push("Do", vec![Object::Name(name.as_bytes().to_vec())]);
        self.push("Q", vec![]);
    }
}
