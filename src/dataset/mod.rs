pub mod by_class;
pub mod idx;
pub mod job;
pub mod writer;

use std::path::PathBuf;

pub use by_class::{Split, CLASS_CODES, IMAGE_SIDE};
pub use job::{preprocess, ClassBlock, PreprocessSummary};

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode image '{path}': {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image '{path}' is {width}×{height}, expected 128×128")]
    Dimensions { path: PathBuf, width: u32, height: u32 },

    #[error("class directory '{0}' does not exist")]
    MissingClassDir(PathBuf),

    #[error("{0}")]
    Idx(String),
}
