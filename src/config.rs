use std::path::PathBuf;
use std::time::Duration;

use egui::Color32;

use crate::profile::DatasetProfile;

/// Frame-rate cap of the drawing loop.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 300;

/// Window height in pixels; the strip below the canvas holds the buttons
/// and the guess.
pub const WINDOW_HEIGHT: f32 = 1000.0;

/// Every colour the window uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub white: Color32,
    pub gray: Color32,
    pub light_gray: Color32,
    pub dark_gray: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            white: Color32::from_gray(255),
            gray: Color32::from_gray(128),
            light_gray: Color32::from_gray(240),
            dark_gray: Color32::from_gray(60),
        }
    }
}

/// Startup configuration for the drawing app.
///
/// Built once from the selected profile and handed to the loader and the
/// frame loop; nothing here is global.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub profile: DatasetProfile,
    pub model_path: PathBuf,
    pub dark_icon_path: PathBuf,
    pub light_icon_path: PathBuf,
    pub ticks_per_second: u32,
    pub palette: Palette,
}

impl AppConfig {
    pub fn for_profile(profile: DatasetProfile) -> AppConfig {
        AppConfig {
            profile,
            model_path: profile.default_model_path(),
            dark_icon_path: PathBuf::from("icons/dark.png"),
            light_icon_path: PathBuf::from("icons/light.png"),
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            palette: Palette::default(),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.ticks_per_second.max(1) as f64)
    }

    /// Window size in pixels: the canvas is square, the button strip sits below.
    pub fn window_size(&self) -> [f32; 2] {
        [self.profile.canvas_px() as f32, WINDOW_HEIGHT]
    }
}
