pub mod metadata;
pub mod network;

pub use network::{Network, ModelError};
pub use metadata::{InputType, ModelMetadata};
