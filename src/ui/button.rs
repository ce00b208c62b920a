use egui::{pos2, vec2, Color32, Rect};

use crate::canvas::brush::Pointer;
use crate::ui::surface::{IconKind, Surface};

/// Side length icons are pre-scaled to.
pub const ICON_SIZE: f32 = 40.0;

/// What a button shows on top of its background.
#[derive(Debug, Clone, PartialEq)]
pub enum Face {
    Text { label: &'static str, size: f32, color: Color32 },
    Icon(IconKind),
}

/// A clickable rectangle. Holds no per-frame state: it is drawn every tick
/// and asked whether this tick's click landed on it.
#[derive(Debug, Clone)]
pub struct Button {
    pub rect: Rect,
    pub face: Face,
    pub bg_color: Color32,
}

impl Button {
    /// `pos` is the top-left corner, `dims` the width and height.
    pub fn new(pos: (f32, f32), dims: (f32, f32), face: Face, bg_color: Color32) -> Button {
        Button {
            rect: Rect::from_min_size(pos2(pos.0, pos.1), vec2(dims.0, dims.1)),
            face,
            bg_color,
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.rect(self.rect, self.bg_color);
        match &self.face {
            Face::Text { label, size, color } => {
                surface.text(self.rect.center(), label, *size, *color);
            }
            Face::Icon(icon) => {
                let icon_rect = Rect::from_center_size(self.rect.center(), vec2(ICON_SIZE, ICON_SIZE));
                surface.icon(icon_rect, *icon);
            }
        }
    }

    /// True when the primary button was clicked inside this button this tick.
    pub fn is_pressed(&self, pointer: &Pointer) -> bool {
        pointer
            .clicked_at
            .map(|(x, y)| self.rect.contains(pos2(x, y)))
            .unwrap_or(false)
    }

    pub fn change_icon(&mut self, icon: IconKind) {
        self.face = Face::Icon(icon);
    }
}
