//! Immediate-mode drawing in canvas coordinates.
//!
//! egui points are logical pixels, and the window is exactly the canvas in
//! logical size, so canvas coordinates are passed straight through.

use egui::{Align2, Color32, CornerRadius, FontId, Pos2, Rect, Stroke, StrokeKind, Vec2};

pub type Rgb = [u8; 3];

pub const WHITE: Rgb = [255, 255, 255];

pub const TITLE_SIZE: f32 = 64.0;
pub const TEXT_SIZE: f32 = 28.0;
pub const SMALL_SIZE: f32 = 20.0;

fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

fn rect(x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect::from_min_size(Pos2::new(x, y), Vec2::new(width, height))
}

/// Painter over the whole canvas, beneath any egui windows.
pub struct Canvas {
    painter: egui::Painter,
}

impl Canvas {
    pub fn new(ctx: &egui::Context) -> Self {
        let layer = egui::LayerId::new(egui::Order::Background, egui::Id::new("canvas"));
        Self {
            painter: ctx.layer_painter(layer),
        }
    }

    /// Text whose centre sits at (`x`, `y`).
    pub fn text_centered(&self, x: f32, y: f32, size: f32, rgb: Rgb, text: &str) {
        self.painter.text(
            Pos2::new(x, y),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(size),
            color(rgb),
        );
    }

    /// Text anchored at its top-left corner.
    pub fn text(&self, x: f32, y: f32, size: f32, rgb: Rgb, text: &str) {
        self.painter.text(
            Pos2::new(x, y),
            Align2::LEFT_TOP,
            text,
            FontId::proportional(size),
            color(rgb),
        );
    }

    /// Text anchored at its top-right corner.
    pub fn text_right(&self, x: f32, y: f32, size: f32, rgb: Rgb, text: &str) {
        self.painter.text(
            Pos2::new(x, y),
            Align2::RIGHT_TOP,
            text,
            FontId::proportional(size),
            color(rgb),
        );
    }

    /// Rounded button body with a 2px white border and centred label.
    pub fn button(&self, x: f32, y: f32, width: f32, height: f32, fill: Rgb, label: &str) {
        let body = rect(x, y, width, height);
        let radius = CornerRadius::same(8);
        self.painter.rect_filled(body, radius, color(fill));
        self.painter.rect_stroke(
            body,
            radius,
            Stroke::new(2.0, color(WHITE)),
            StrokeKind::Inside,
        );
        self.text_centered(body.center().x, body.center().y, TEXT_SIZE, WHITE, label);
    }

    /// Outlined box, used for the name entry field.
    pub fn outline(&self, x: f32, y: f32, width: f32, height: f32, rgb: Rgb) {
        self.painter.rect_stroke(
            rect(x, y, width, height),
            CornerRadius::ZERO,
            Stroke::new(2.0, color(rgb)),
            StrokeKind::Inside,
        );
    }
}
