use egui::{pos2, Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, TextureHandle, Vec2};

use crate::ui::surface::{IconKind, Surface};

/// Textures for the two theme icons, uploaded once.
pub struct IconTextures {
    pub dark: TextureHandle,
    pub light: TextureHandle,
}

impl IconTextures {
    fn get(&self, icon: IconKind) -> &TextureHandle {
        match icon {
            IconKind::Dark => &self.dark,
            IconKind::Light => &self.light,
        }
    }
}

/// `Surface` backed by an egui painter. Window pixel `(0, 0)` maps to
/// `origin` in egui points.
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    origin: Pos2,
    icons: &'a IconTextures,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter, origin: Pos2, icons: &'a IconTextures) -> EguiSurface<'a> {
        EguiSurface { painter, origin, icons }
    }

    fn at(&self, p: Pos2) -> Pos2 {
        self.origin + p.to_vec2()
    }

    fn shift(&self, rect: Rect) -> Rect {
        rect.translate(self.origin.to_vec2())
    }
}

impl Surface for EguiSurface<'_> {
    fn fill(&mut self, color: Color32) {
        self.painter.rect_filled(self.painter.clip_rect(), 0.0, color);
    }

    fn rect(&mut self, rect: Rect, color: Color32) {
        self.painter.rect_filled(self.shift(rect), 0.0, color);
    }

    fn line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        self.painter.line_segment([self.at(from), self.at(to)], Stroke::new(width, color));
    }

    fn text(&mut self, center: Pos2, text: &str, size: f32, color: Color32) {
        self.painter.text(
            self.at(center),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(size),
            color,
        );
    }

    fn icon(&mut self, rect: Rect, icon: IconKind) {
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        self.painter.image(self.icons.get(icon).id(), self.shift(rect), uv, Color32::WHITE);
    }
}

/// Converts an egui position back into window pixels.
pub fn to_window(origin: Pos2, p: Pos2) -> (f32, f32) {
    let local: Vec2 = p - origin;
    (local.x, local.y)
}
