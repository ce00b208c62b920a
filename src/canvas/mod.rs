pub mod grid;
pub mod brush;

pub use grid::Grid;
pub use brush::{Brush, Pointer};
