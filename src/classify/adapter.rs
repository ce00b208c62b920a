use crate::canvas::grid::Grid;
use crate::classify::classifier::{Classifier, ClassifierError, Tensor, NUM_CLASSES};
use crate::profile::DatasetProfile;

/// Copies the grid into the tensor layout the classifier expects,
/// inverting grayscale polarity when the profile asks for it.
pub fn grid_to_tensor(grid: &Grid, profile: DatasetProfile) -> Tensor {
    let values = grid
        .cells()
        .iter()
        .map(|&v| if profile.polarity_inverted() { 255 - v } else { v })
        .map(f64::from)
        .collect();
    Tensor::single_square(grid.resolution(), values)
}

/// Reads a guess out of a classifier output.
///
/// Only an entry exactly equal to `1.0` counts, and only when something has
/// been drawn. Soft probability vectors never produce a guess.
pub fn extract_guess(output: &[f64], is_reset: bool) -> Option<u8> {
    if is_reset {
        return None;
    }
    output.iter().position(|&p| p == 1.0).map(|i| i as u8)
}

/// Runs the classifier on the current canvas and returns the digit it is
/// certain about, if any. The grid is never modified.
pub fn classify<C: Classifier + ?Sized>(
    grid: &Grid,
    profile: DatasetProfile,
    classifier: &C,
) -> Result<Option<u8>, ClassifierError> {
    let tensor = grid_to_tensor(grid, profile);
    let output = classifier.predict(&tensor)?;
    if output.len() != NUM_CLASSES {
        return Err(ClassifierError::OutputSize { expected: NUM_CLASSES, actual: output.len() });
    }
    Ok(extract_guess(&output, grid.is_reset()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Returns a fixed vector and remembers the last tensor it was given.
    struct Fixed {
        output: Vec<f64>,
        seen: RefCell<Option<Tensor>>,
    }

    impl Fixed {
        fn new(output: Vec<f64>) -> Fixed {
            Fixed { output, seen: RefCell::new(None) }
        }
    }

    impl Classifier for Fixed {
        fn predict(&self, input: &Tensor) -> Result<Vec<f64>, ClassifierError> {
            *self.seen.borrow_mut() = Some(input.clone());
            Ok(self.output.clone())
        }
    }

    fn one_hot(k: usize) -> Vec<f64> {
        let mut v = vec![0.0; NUM_CLASSES];
        v[k] = 1.0;
        v
    }

    fn saturated(resolution: usize) -> Grid {
        let mut g = Grid::new(resolution);
        for y in 0..resolution {
            for x in 0..resolution {
                g.mark_stroke(x as isize, y as isize, 0);
            }
        }
        g
    }

    #[test]
    fn inverted_profile_flips_a_full_canvas_to_zero() {
        let grid = saturated(128);
        let tensor = grid_to_tensor(&grid, DatasetProfile::Nist);
        assert_eq!(tensor.shape, [1, 128, 128]);
        assert!(tensor.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn plain_profile_passes_values_through() {
        let grid = saturated(28);
        let tensor = grid_to_tensor(&grid, DatasetProfile::Mnist);
        assert_eq!(tensor.shape, [1, 28, 28]);
        assert!(tensor.data.iter().all(|&v| v == 255.0));
    }

    #[test]
    fn classify_leaves_the_grid_alone() {
        let mut grid = Grid::new(128);
        grid.mark_stroke(10, 10, 7);
        let before = grid.clone();

        let clf = Fixed::new(one_hot(4));
        classify(&grid, DatasetProfile::Nist, &clf).unwrap();
        assert_eq!(grid, before);

        let seen = clf.seen.borrow().clone().unwrap();
        assert_eq!(seen.data[10 * 128 + 10], 0.0);
        assert_eq!(seen.data[0], 255.0);
    }

    #[test]
    fn one_hot_on_drawn_canvas_is_a_guess() {
        assert_eq!(extract_guess(&[0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], false), Some(2));
    }

    #[test]
    fn empty_canvas_never_guesses() {
        assert_eq!(extract_guess(&one_hot(2), true), None);

        let clf = Fixed::new(one_hot(2));
        assert_eq!(classify(&Grid::new(28), DatasetProfile::Mnist, &clf).unwrap(), None);
    }

    #[test]
    fn soft_probabilities_never_guess() {
        let soft = vec![0.1; NUM_CLASSES];
        assert_eq!(extract_guess(&soft, false), None);
        assert_eq!(extract_guess(&soft, true), None);
        assert_eq!(extract_guess(&[0.0, 0.999_999, 0.000_001, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], false), None);
    }

    #[test]
    fn short_output_is_an_error() {
        let mut grid = Grid::new(28);
        grid.mark_stroke(3, 3, 2);
        let clf = Fixed::new(vec![1.0, 0.0]);
        let err = classify(&grid, DatasetProfile::Mnist, &clf).unwrap_err();
        assert!(matches!(err, ClassifierError::OutputSize { expected: 10, actual: 2 }));
    }
}
