use crate::canvas::grid::Grid;
use crate::profile::DatasetProfile;

/// Pointer sample for one tick, in window pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    /// Last known position; `None` when the pointer has left the window.
    pub pos: Option<(f32, f32)>,
    /// Primary button currently held.
    pub primary_down: bool,
    /// Primary button was clicked this tick (press edge) at this position.
    pub clicked_at: Option<(f32, f32)>,
}

/// Maps window pixels to grid cells and stamps the profile's brush.
#[derive(Debug, Clone, Copy)]
pub struct Brush {
    box_size: usize,
    canvas_px: usize,
    radius: usize,
}

impl Brush {
    pub fn new(profile: DatasetProfile) -> Brush {
        Brush {
            box_size: profile.box_size(),
            canvas_px: profile.canvas_px(),
            radius: profile.brush_radius(),
        }
    }

    /// Cell under a window position, if the position lies within the canvas.
    ///
    /// Both canvas edges are inclusive, so a pointer exactly on the far edge
    /// maps to the (off-grid) cell `resolution`; the stamp then only inks
    /// the part that overlaps the grid.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<(isize, isize)> {
        let limit = self.canvas_px as f32;
        if !(0.0..=limit).contains(&x) || !(0.0..=limit).contains(&y) {
            return None;
        }
        let size = self.box_size as f32;
        Some(((x / size).floor() as isize, (y / size).floor() as isize))
    }

    /// Applies one stroke if the primary button is held inside the canvas.
    /// Returns whether a stroke was applied.
    pub fn apply(&self, pointer: &Pointer, grid: &mut Grid) -> bool {
        if !pointer.primary_down {
            return false;
        }
        let Some((px, py)) = pointer.pos else {
            return false;
        };
        match self.cell_at(px, py) {
            Some((cx, cy)) => {
                grid.mark_stroke(cx, cy, self.radius);
                true
            }
            None => false,
        }
    }
}
