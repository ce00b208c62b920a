use egui::{Color32, Pos2, Rect};

/// Colour theme of the window. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// The two pre-scaled icons the theme button can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    /// Moon: shown while in light mode, switches to dark.
    Dark,
    /// Sun: shown while in dark mode, switches to light.
    Light,
}

/// Drawing primitives the frame loop renders through.
///
/// Coordinates are window pixels with the origin at the top-left.
pub trait Surface {
    /// Paints the whole window.
    fn fill(&mut self, color: Color32);
    fn rect(&mut self, rect: Rect, color: Color32);
    fn line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32);
    /// Renders `text` centred on `center`.
    fn text(&mut self, center: Pos2, text: &str, size: f32, color: Color32);
    fn icon(&mut self, rect: Rect, icon: IconKind);
}
