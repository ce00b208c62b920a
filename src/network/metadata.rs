use serde::{Deserialize, Serialize};

/// Input a saved model declares it was trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputType {
    /// Flat vector with no declared geometry.
    Numeric,
    /// Single-channel `width × height` image, row-major.
    ImageGrayscale { width: u32, height: u32 },
    /// Three-channel image, interleaved R,G,B.
    ImageRgb { width: u32, height: u32 },
}

impl InputType {
    /// True if a square grayscale canvas of `side × side` cells can be fed
    /// to the model. Undeclared geometry is accepted; the layer sizes are
    /// checked separately.
    pub fn fits_canvas(&self, side: usize) -> bool {
        match *self {
            InputType::Numeric => true,
            InputType::ImageGrayscale { width, height } => width as usize == side && height as usize == side,
            InputType::ImageRgb { .. } => false,
        }
    }
}

/// Optional annotations stored next to the layers. Every field may be
/// missing, and so may the whole block.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModelMetadata {
    pub description: Option<String>,
    pub input_type: Option<InputType>,
    pub output_labels: Option<Vec<String>>,
}

impl ModelMetadata {
    /// True if the declared labels, when present, are the digits `"0"..="9"` in order.
    pub fn digit_labels(&self) -> bool {
        match &self.output_labels {
            None => true,
            Some(labels) => {
                labels.len() == 10 && labels.iter().enumerate().all(|(i, l)| l.trim() == i.to_string())
            }
        }
    }
}
