use std::fmt;
use std::path::PathBuf;

/// Side length in screen pixels that the canvas is scaled to fit.
const CANVAS_TARGET_PX: usize = 800;

/// Which dataset the active model was trained on.
///
/// Selected once on the command line; everything resolution-dependent
/// (grid size, brush size, grayscale polarity, model path) derives from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DatasetProfile {
    /// 28×28 MNIST digits, white ink on black.
    Mnist,
    /// 128×128 NIST SD19 digits, black ink on white.
    Nist,
}

impl DatasetProfile {
    /// Grid side length in cells.
    pub fn resolution(self) -> usize {
        match self {
            DatasetProfile::Mnist => 28,
            DatasetProfile::Nist => 128,
        }
    }

    /// Brush stamp size passed to `Grid::mark_stroke`.
    pub fn brush_radius(self) -> usize {
        match self {
            DatasetProfile::Mnist => 2,
            DatasetProfile::Nist => 7,
        }
    }

    /// Whether the classifier expects `255 - v` instead of the raw canvas.
    pub fn polarity_inverted(self) -> bool {
        matches!(self, DatasetProfile::Nist)
    }

    /// Screen pixels per grid cell.
    pub fn box_size(self) -> usize {
        CANVAS_TARGET_PX / self.resolution()
    }

    /// Canvas side length in screen pixels.
    pub fn canvas_px(self) -> usize {
        self.box_size() * self.resolution()
    }

    pub fn name(self) -> &'static str {
        match self {
            DatasetProfile::Mnist => "mnist",
            DatasetProfile::Nist => "nist",
        }
    }

    /// Default location of the trained model for this profile.
    pub fn default_model_path(self) -> PathBuf {
        PathBuf::from(format!("trained_models/{}.json", self.name()))
    }
}

impl fmt::Display for DatasetProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mnist_geometry() {
        let p = DatasetProfile::Mnist;
        assert_eq!(p.resolution(), 28);
        assert_eq!(p.box_size(), 28);
        assert_eq!(p.canvas_px(), 784);
        assert!(!p.polarity_inverted());
    }

    #[test]
    fn nist_geometry() {
        let p = DatasetProfile::Nist;
        assert_eq!(p.resolution(), 128);
        assert_eq!(p.box_size(), 6);
        assert_eq!(p.canvas_px(), 768);
        assert_eq!(p.brush_radius(), 7);
        assert!(p.polarity_inverted());
        assert_eq!(p.default_model_path(), PathBuf::from("trained_models/nist.json"));
    }
}
