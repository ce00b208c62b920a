pub mod classifier;
pub mod adapter;

pub use classifier::{Classifier, ClassifierError, NetworkClassifier, Tensor, NUM_CLASSES};
pub use adapter::{classify, extract_guess, grid_to_tensor};
