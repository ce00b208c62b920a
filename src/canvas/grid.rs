/// Value written by the inner disk of the brush stamp.
pub const INK: u8 = 255;

/// Square drawing buffer, one `u8` intensity per cell.
///
/// `0` is untouched background, `255` is fully marked. Row-major with the
/// origin at the top-left, so `get(x, y)` reads row `y`, column `x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    resolution: usize,
    cells: Vec<u8>,
    is_reset: bool,
}

impl Grid {
    /// Creates an all-zero grid that counts as freshly reset.
    pub fn new(resolution: usize) -> Grid {
        Grid {
            resolution,
            cells: vec![0; resolution * resolution],
            is_reset: true,
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// True iff nothing has been drawn since the last reset.
    pub fn is_reset(&self) -> bool {
        self.is_reset
    }

    /// Cell value at column `x`, row `y`, or `None` off the canvas.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.resolution && y < self.resolution {
            Some(self.cells[y * self.resolution + x])
        } else {
            None
        }
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Iterates `(x, y, value)` over cells that carry any ink.
    pub fn marked(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        let n = self.resolution;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v > 0)
            .map(move |(i, &v)| (i % n, i / n, v))
    }

    pub fn reset(&mut self) {
        self.cells.fill(0);
        self.is_reset = true;
    }

    /// Stamps the brush centred on cell `(center_x, center_y)`.
    ///
    /// With `h = radius / 2`, every offset `(i, j)` in `[-h, h]²` whose
    /// squared distance is at most `h² + 1` adds `INK` to its cell,
    /// saturating at 255; the remaining corner offsets add nothing. Offsets
    /// that land off the canvas are skipped. Returns how many in-bounds
    /// cells the stamp covered.
    pub fn mark_stroke(&mut self, center_x: isize, center_y: isize, radius: usize) -> usize {
        let half = (radius / 2) as isize;
        let threshold = half * half + 1;
        let n = self.resolution as isize;
        let mut covered = 0;

        for i in -half..=half {
            for j in -half..=half {
                let (y, x) = (center_y + i, center_x + j);
                if y < 0 || x < 0 || y >= n || x >= n {
                    continue;
                }
                covered += 1;

                let val = if i * i + j * j > threshold { 0 } else { INK };
                let cell = &mut self.cells[(y * n + x) as usize];
                *cell = cell.saturating_add(val);
            }
        }

        if covered > 0 {
            self.is_reset = false;
        }
        covered
    }
}
