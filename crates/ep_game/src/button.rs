//! Clickable menu buttons.

use ep_ui::{Canvas, Rgb};

use crate::geometry::Rect;

pub const BUTTON_WIDTH: f32 = 200.0;
pub const BUTTON_HEIGHT: f32 = 50.0;

#[derive(Debug, Clone)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
    pub color: Rgb,
    pub hover_color: Rgb,
    hovered: bool,
}

impl Button {
    pub fn new(rect: Rect, label: impl Into<String>, color: Rgb, hover_color: Rgb) -> Self {
        Self {
            rect,
            label: label.into(),
            color,
            hover_color,
            hovered: false,
        }
    }

    /// Standard 200×50 menu button with its top-left corner at (`x`, `y`).
    pub fn menu(x: f32, y: f32, label: impl Into<String>, color: Rgb, hover_color: Rgb) -> Self {
        Self::new(
            Rect::new(x, y, BUTTON_WIDTH, BUTTON_HEIGHT),
            label,
            color,
            hover_color,
        )
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn check_hover(&mut self, x: f32, y: f32) -> bool {
        self.hovered = self.rect.contains_point(x, y);
        self.hovered
    }

    /// True when the click landed on the button this tick.
    pub fn is_clicked(&self, x: f32, y: f32, clicked: bool) -> bool {
        clicked && self.rect.contains_point(x, y)
    }

    pub fn draw(&self, canvas: &Canvas) {
        let fill = if self.is_hovered() {
            self.hover_color
        } else {
            self.color
        };
        canvas.button(
            self.rect.x,
            self.rect.y,
            self.rect.width,
            self.rect.height,
            fill,
            &self.label,
        );
    }
}
