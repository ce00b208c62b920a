use crate::network::{InputType, Network};

/// Number of digit classes every classifier must score.
pub const NUM_CLASSES: usize = 10;

/// Input handed to a classifier: a `batch × rows × cols` block of raw
/// 0–255 intensities, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    pub shape: [usize; 3],
    pub data: Vec<f64>,
}

impl Tensor {
    /// Shapes `values` as a single `1 × side × side` sample.
    pub fn single_square(side: usize, values: Vec<f64>) -> Tensor {
        debug_assert_eq!(values.len(), side * side);
        Tensor { shape: [1, side, side], data: values }
    }

    /// Values per sample.
    pub fn sample_len(&self) -> usize {
        self.shape[1] * self.shape[2]
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("classifier expects {expected} input values, got {actual}")]
    InputSize { expected: usize, actual: usize },

    #[error("classifier produced {actual} outputs, expected {expected}")]
    OutputSize { expected: usize, actual: usize },

    #[error("model input type {0:?} cannot take a grayscale canvas")]
    IncompatibleInput(InputType),

    #[error("classifier failed: {0}")]
    Backend(String),
}

/// Anything that can score a canvas tensor over the ten digit classes.
pub trait Classifier {
    fn predict(&self, input: &Tensor) -> Result<Vec<f64>, ClassifierError>;
}

/// Feed-forward network backend.
///
/// The network was trained on `[0, 1]` pixels, so raw intensities are
/// divided by 255 before the forward pass.
#[derive(Debug, Clone)]
pub struct NetworkClassifier {
    network: Network,
}

impl NetworkClassifier {
    /// Binds a loaded network to a canvas of `resolution × resolution` cells,
    /// rejecting models whose input or output layer cannot fit.
    pub fn new(network: Network, resolution: usize) -> Result<NetworkClassifier, ClassifierError> {
        let expected = resolution * resolution;

        if let Some(meta) = &network.metadata {
            if let Some(input_type) = meta.input_type.as_ref().filter(|t| !t.fits_canvas(resolution)) {
                return Err(ClassifierError::IncompatibleInput(input_type.clone()));
            }
            if !meta.digit_labels() {
                tracing::warn!(labels = ?meta.output_labels, "model labels are not 0-9, reading outputs as digits anyway");
            }
        }
        if network.input_size() != expected {
            return Err(ClassifierError::InputSize { expected: network.input_size(), actual: expected });
        }
        if network.output_size() != NUM_CLASSES {
            return Err(ClassifierError::OutputSize { expected: NUM_CLASSES, actual: network.output_size() });
        }

        Ok(NetworkClassifier { network })
    }
}

impl Classifier for NetworkClassifier {
    fn predict(&self, input: &Tensor) -> Result<Vec<f64>, ClassifierError> {
        if input.sample_len() != self.network.input_size() || input.data.len() != input.sample_len() {
            return Err(ClassifierError::InputSize {
                expected: self.network.input_size(),
                actual: input.data.len(),
            });
        }
        let normalized = input.data.iter().map(|&v| v / 255.0).collect();
        Ok(self.network.forward(normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::ModelMetadata;
    use crate::{ActivationFunction, Layer, Matrix};

    /// 2×2 canvas → 10 classes; class `k` sees only pixel `k % 4`.
    fn tiny_network() -> Network {
        let mut w = Matrix::zeros(4, NUM_CLASSES);
        for k in 0..NUM_CLASSES {
            w.data[k % 4][k] = 1000.0;
        }
        let layer = Layer::from_parameters(w, Matrix::zeros(1, NUM_CLASSES), ActivationFunction::Softmax);
        Network::from_layers(vec![layer]).unwrap()
    }

    #[test]
    fn rejects_resolution_mismatch() {
        let err = NetworkClassifier::new(tiny_network(), 28).unwrap_err();
        assert!(matches!(err, ClassifierError::InputSize { expected: 4, actual: 784 }));
    }

    #[test]
    fn rejects_rgb_models() {
        let mut net = tiny_network();
        net.metadata = Some(ModelMetadata {
            input_type: Some(InputType::ImageRgb { width: 2, height: 2 }),
            ..Default::default()
        });
        let err = NetworkClassifier::new(net, 2).unwrap_err();
        assert!(matches!(err, ClassifierError::IncompatibleInput(_)));
    }

    #[test]
    fn predicts_a_probability_vector() {
        let clf = NetworkClassifier::new(tiny_network(), 2).unwrap();
        let out = clf.predict(&Tensor::single_square(2, vec![0.0, 0.0, 255.0, 0.0])).unwrap();
        assert_eq!(out.len(), NUM_CLASSES);
        let sum: f64 = out.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        // Classes 2 and 6 both key off pixel 2.
        assert!((out[2] - 0.5).abs() < 1e-9 && (out[6] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn wrong_tensor_size_is_an_error() {
        let clf = NetworkClassifier::new(tiny_network(), 2).unwrap();
        let bad = Tensor { shape: [1, 3, 3], data: vec![0.0; 9] };
        assert!(matches!(clf.predict(&bad), Err(ClassifierError::InputSize { .. })));
    }
}
