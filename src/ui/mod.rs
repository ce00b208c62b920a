pub mod surface;
pub mod button;

pub use surface::{IconKind, Surface, Theme};
pub use button::{Button, Face, ICON_SIZE};
