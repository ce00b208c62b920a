pub mod painter;
pub mod window;

pub use window::{run, GuiError, OhdrApp, WINDOW_TITLE};
