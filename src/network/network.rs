use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::layers::dense::Layer;
use crate::network::metadata::ModelMetadata;

/// Errors raised while reading a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("cannot open model file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("model file '{path}' is not a valid network: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("model has no layers")]
    Empty,

    #[error("layer {index}: weights/biases do not match the declared size")]
    MalformedLayer { index: usize },

    #[error("layer {index} expects {expected} inputs but the previous layer produces {actual}")]
    LayerMismatch { index: usize, expected: usize, actual: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
    /// Optional annotations. Absent in older model files.
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
}

impl Network {
    /// Builds a network from already-trained layers and checks that they chain.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Network, ModelError> {
        let network = Network { layers, metadata: None };
        network.validate()?;
        Ok(network)
    }

    /// Number of values the first layer consumes.
    pub fn input_size(&self) -> usize {
        self.layers.first().map(|l| l.input_size()).unwrap_or(0)
    }

    /// Number of values the last layer produces.
    pub fn output_size(&self) -> usize {
        self.layers.last().map(|l| l.size).unwrap_or(0)
    }

    /// Forward pass through every layer.
    pub fn forward(&self, input: Vec<f64>) -> Vec<f64> {
        let mut current = input;
        for layer in &self.layers {
            current = layer.feed_from(current);
        }
        current
    }

    /// Deserializes a network from a JSON model file and validates its shape.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Network, ModelError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let file = std::fs::File::open(path)
            .map_err(|source| ModelError::Io { path: display.clone(), source })?;
        let reader = std::io::BufReader::new(file);
        let network: Network = serde_json::from_reader(reader)
            .map_err(|source| ModelError::Json { path: display, source })?;

        network.validate()?;
        Ok(network)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.layers.is_empty() {
            return Err(ModelError::Empty);
        }
        for (index, layer) in self.layers.iter().enumerate() {
            if !layer.is_consistent() {
                return Err(ModelError::MalformedLayer { index });
            }
            if index > 0 {
                let actual = self.layers[index - 1].size;
                if layer.input_size() != actual {
                    return Err(ModelError::LayerMismatch {
                        index,
                        expected: layer.input_size(),
                        actual,
                    });
                }
            }
        }
        Ok(())
    }
}
