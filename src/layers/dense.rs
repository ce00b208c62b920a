use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// One fully connected layer: `a = activation(x · W + b)`.
///
/// Only the trained parameters are kept. Model files written by a training
/// run may carry extra per-layer fields (cached activations and the like);
/// serde skips them on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer{
    pub size: usize,
    /// Shape `(input_size, size)`.
    pub weights: Matrix,
    /// Shape `(1, size)`.
    pub biases: Matrix,
    pub activator: ActivationFunction
}

impl Layer {
    pub fn from_parameters(weights: Matrix, biases: Matrix, activation: ActivationFunction) -> Layer {
        Layer {
            size: weights.cols,
            weights,
            biases,
            activator: activation,
        }
    }

    /// Number of values this layer consumes.
    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// True when weights and biases agree with each other and with `size`.
    pub fn is_consistent(&self) -> bool {
        self.weights.is_well_formed()
            && self.biases.is_well_formed()
            && self.weights.cols == self.size
            && self.biases.rows == 1
            && self.biases.cols == self.size
    }

    /// Inference-only forward pass; the layer itself is left untouched.
    pub fn feed_from(&self, input: Vec<f64>) -> Vec<f64> {
        let z = &Matrix::row(input) * &self.weights + &self.biases;
        self.activator.apply(&z.data[0])
    }
}
