use egui::{pos2, Color32, Rect};

use crate::canvas::brush::{Brush, Pointer};
use crate::canvas::grid::Grid;
use crate::classify::adapter::classify;
use crate::classify::classifier::{Classifier, ClassifierError};
use crate::config::Palette;
use crate::profile::DatasetProfile;
use crate::ui::button::{Button, Face};
use crate::ui::surface::{IconKind, Surface, Theme};

/// Width of grid lines and the canvas divider.
const LINE_WIDTH: f32 = 1.0;

/// Centre of the "Guess: N" label.
const GUESS_POS: (f32, f32) = (400.0, 900.0);

const LARGE_FONT: f32 = 40.0;
const SMALL_FONT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One input event, in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The window was asked to close.
    Quit,
    PointerMoved { x: f32, y: f32 },
    PrimaryPressed { x: f32, y: f32 },
    PrimaryReleased,
    /// The pointer left the window.
    PointerGone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminating,
}

// ---------------------------------------------------------------------------
// Buttons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Buttons {
    clear: Button,
    toggle_grid: Button,
    toggle_theme: Button,
}

impl Buttons {
    fn new(palette: &Palette) -> Buttons {
        Buttons {
            clear: Button::new(
                (400.0, 830.0),
                (200.0, 50.0),
                Face::Text { label: "CLEAR", size: LARGE_FONT, color: palette.white },
                palette.gray,
            ),
            toggle_grid: Button::new(
                (200.0, 830.0),
                (150.0, 30.0),
                Face::Text { label: "TOGGLE GRID", size: SMALL_FONT, color: palette.white },
                palette.gray,
            ),
            toggle_theme: Button::new(
                (600.0, 830.0),
                (50.0, 50.0),
                Face::Icon(IconKind::Dark),
                palette.gray,
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Frame loop
// ---------------------------------------------------------------------------

/// Owns every piece of drawing-app state and advances it one tick at a time.
///
/// The host (a window, or a test) feeds the events gathered since the last
/// tick, provides a `Surface` to draw on, presents the result and then waits
/// out the tick interval.
pub struct FrameLoop<C: Classifier> {
    profile: DatasetProfile,
    palette: Palette,
    classifier: C,
    brush: Brush,
    grid: Grid,
    guess: Option<u8>,
    show_grid: bool,
    theme: Theme,
    pointer: Pointer,
    buttons: Buttons,
    state: LoopState,
}

impl<C: Classifier> FrameLoop<C> {
    pub fn new(profile: DatasetProfile, palette: Palette, classifier: C) -> FrameLoop<C> {
        FrameLoop {
            profile,
            palette,
            classifier,
            brush: Brush::new(profile),
            grid: Grid::new(profile.resolution()),
            guess: None,
            show_grid: false,
            theme: Theme::Light,
            pointer: Pointer::default(),
            buttons: Buttons::new(&palette),
            state: LoopState::Running,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn guess(&self) -> Option<u8> {
        self.guess
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Icon currently shown on the theme button.
    pub fn theme_icon(&self) -> IconKind {
        match self.buttons.toggle_theme.face {
            Face::Icon(icon) => icon,
            Face::Text { .. } => IconKind::Dark,
        }
    }

    /// Clears the canvas and the current guess.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.guess = None;
    }

    /// Runs one tick. Does nothing once the loop is terminating.
    ///
    /// The guess drawn this tick is the one computed on the previous tick,
    /// so it trails the newest stroke by one frame.
    pub fn tick<I>(&mut self, events: I, surface: &mut dyn Surface) -> Result<LoopState, ClassifierError>
    where
        I: IntoIterator<Item = InputEvent>,
    {
        if self.state == LoopState::Terminating {
            return Ok(self.state);
        }

        self.drain(events);
        if self.state == LoopState::Terminating {
            tracing::info!("quit requested");
            return Ok(self.state);
        }

        self.draw_background(surface);
        self.draw_cells(surface);
        self.brush.apply(&self.pointer, &mut self.grid);
        self.draw_guess(surface);
        self.guess = classify(&self.grid, self.profile, &self.classifier)?;
        self.handle_buttons(surface);

        Ok(self.state)
    }

    fn drain<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        self.pointer.clicked_at = None;
        for event in events {
            match event {
                InputEvent::Quit => self.state = LoopState::Terminating,
                InputEvent::PointerMoved { x, y } => self.pointer.pos = Some((x, y)),
                InputEvent::PrimaryPressed { x, y } => {
                    self.pointer.pos = Some((x, y));
                    self.pointer.primary_down = true;
                    self.pointer.clicked_at = Some((x, y));
                }
                InputEvent::PrimaryReleased => self.pointer.primary_down = false,
                InputEvent::PointerGone => self.pointer.pos = None,
            }
        }
    }

    fn draw_background(&self, surface: &mut dyn Surface) {
        let background = match self.theme {
            Theme::Light => self.palette.white,
            Theme::Dark => self.palette.dark_gray,
        };
        surface.fill(background);

        let canvas = self.profile.canvas_px() as f32;
        if self.show_grid {
            for step in (0..=self.profile.canvas_px()).step_by(self.profile.box_size()) {
                let at = step as f32;
                surface.line(pos2(at, 0.0), pos2(at, canvas), LINE_WIDTH, self.palette.light_gray);
                surface.line(pos2(0.0, at), pos2(canvas, at), LINE_WIDTH, self.palette.light_gray);
            }
        }

        // Divider between the canvas and the button strip.
        surface.line(pos2(0.0, canvas), pos2(canvas, canvas), LINE_WIDTH, self.palette.light_gray);
    }

    fn draw_cells(&self, surface: &mut dyn Surface) {
        let size = self.profile.box_size() as f32;
        for (x, y, val) in self.grid.marked() {
            let shade = match self.theme {
                Theme::Light => 255 - val,
                Theme::Dark => val,
            };
            let rect = Rect::from_min_size(
                pos2(x as f32 * size, y as f32 * size),
                egui::vec2(size, size),
            );
            surface.rect(rect, Color32::from_gray(shade));
        }
    }

    fn draw_guess(&self, surface: &mut dyn Surface) {
        if let Some(guess) = self.guess {
            surface.text(
                pos2(GUESS_POS.0, GUESS_POS.1),
                &format!("Guess: {}", guess),
                LARGE_FONT,
                self.palette.gray,
            );
        }
    }

    fn handle_buttons(&mut self, surface: &mut dyn Surface) {
        self.buttons.clear.draw(surface);
        self.buttons.toggle_grid.draw(surface);
        self.buttons.toggle_theme.draw(surface);

        if self.buttons.clear.is_pressed(&self.pointer) {
            tracing::debug!("canvas cleared");
            self.reset();
        }

        if self.buttons.toggle_grid.is_pressed(&self.pointer) {
            self.show_grid = !self.show_grid;
            tracing::debug!(show_grid = self.show_grid, "grid lines toggled");
        }

        if self.buttons.toggle_theme.is_pressed(&self.pointer) {
            self.theme = self.theme.toggled();
            let icon = match self.theme {
                Theme::Light => IconKind::Dark,
                Theme::Dark => IconKind::Light,
            };
            self.buttons.toggle_theme.change_icon(icon);
            tracing::debug!(theme = ?self.theme, "theme toggled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classifier::{Tensor, NUM_CLASSES};
    use egui::Pos2;

    /// Always certain the digit is 7.
    struct Sevens;

    impl Classifier for Sevens {
        fn predict(&self, _input: &Tensor) -> Result<Vec<f64>, ClassifierError> {
            let mut out = vec![0.0; NUM_CLASSES];
            out[7] = 1.0;
            Ok(out)
        }
    }

    #[derive(Default)]
    struct Recorder {
        fills: Vec<Color32>,
        rects: Vec<(Rect, Color32)>,
        lines: usize,
        texts: Vec<String>,
        icons: Vec<IconKind>,
    }

    impl Surface for Recorder {
        fn fill(&mut self, color: Color32) {
            self.fills.push(color);
        }
        fn rect(&mut self, rect: Rect, color: Color32) {
            self.rects.push((rect, color));
        }
        fn line(&mut self, _from: Pos2, _to: Pos2, _width: f32, _color: Color32) {
            self.lines += 1;
        }
        fn text(&mut self, _center: Pos2, text: &str, _size: f32, _color: Color32) {
            self.texts.push(text.to_owned());
        }
        fn icon(&mut self, _rect: Rect, icon: IconKind) {
            self.icons.push(icon);
        }
    }

    fn new_loop() -> FrameLoop<Sevens> {
        FrameLoop::new(DatasetProfile::Mnist, Palette::default(), Sevens)
    }

    fn click(x: f32, y: f32) -> Vec<InputEvent> {
        vec![InputEvent::PrimaryPressed { x, y }, InputEvent::PrimaryReleased]
    }

    #[test]
    fn light_mode_draws_ink_dark() {
        let mut app = new_loop();
        let mut s = Recorder::default();
        app.tick(vec![InputEvent::PrimaryPressed { x: 100.0, y: 100.0 }], &mut s).unwrap();

        // Cells are drawn before the stroke lands, so nothing shows yet.
        assert!(s.rects.iter().all(|(_, c)| *c == Palette::default().gray));

        let mut s = Recorder::default();
        app.tick(vec![InputEvent::PrimaryReleased], &mut s).unwrap();
        let ink: Vec<_> = s.rects.iter().filter(|(_, c)| *c == Color32::from_gray(0)).collect();
        assert_eq!(ink.len(), 9);
        assert_eq!(s.fills, vec![Color32::from_gray(255)]);
    }

    #[test]
    fn guess_is_shown_one_tick_after_it_is_computed() {
        let mut app = new_loop();
        let mut s = Recorder::default();
        app.tick(vec![InputEvent::PrimaryPressed { x: 100.0, y: 100.0 }], &mut s).unwrap();
        assert!(s.texts.iter().all(|t| !t.starts_with("Guess")));
        assert_eq!(app.guess(), Some(7));

        let mut s = Recorder::default();
        app.tick(vec![], &mut s).unwrap();
        assert!(s.texts.contains(&"Guess: 7".to_owned()));
    }

    #[test]
    fn grid_toggle_draws_lines() {
        let mut app = new_loop();
        let mut s = Recorder::default();
        app.tick(vec![], &mut s).unwrap();
        assert_eq!(s.lines, 1);

        app.tick(click(210.0, 840.0), &mut Recorder::default()).unwrap();
        assert!(app.show_grid());

        let mut s = Recorder::default();
        app.tick(vec![], &mut s).unwrap();
        // 29 vertical + 29 horizontal + divider
        assert_eq!(s.lines, 59);
    }

    #[test]
    fn quit_stops_the_loop_for_good() {
        let mut app = new_loop();
        let mut s = Recorder::default();
        assert_eq!(app.tick(vec![InputEvent::Quit], &mut s).unwrap(), LoopState::Terminating);
        assert!(s.fills.is_empty());

        let state = app.tick(vec![InputEvent::PrimaryPressed { x: 10.0, y: 10.0 }], &mut s).unwrap();
        assert_eq!(state, LoopState::Terminating);
        assert!(app.grid().is_reset());
    }
}
