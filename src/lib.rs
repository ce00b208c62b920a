pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod profile;
pub mod config;
pub mod canvas;
pub mod classify;
pub mod ui;
pub mod app;
pub mod assets;
pub mod gui;
pub mod dataset;
pub mod logging;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::network::{Network, ModelError};
pub use profile::DatasetProfile;
pub use config::{AppConfig, Palette};
pub use canvas::{Brush, Grid};
pub use classify::{classify, Classifier, ClassifierError, NetworkClassifier, Tensor};
pub use app::{FrameLoop, InputEvent, LoopState};
