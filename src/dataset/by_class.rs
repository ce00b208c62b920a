use std::fmt;
use std::path::{Path, PathBuf};

use crate::dataset::DatasetError;

/// ASCII hex codes of the digit classes, in output order.
pub const CLASS_CODES: [&str; 10] = ["30", "31", "32", "33", "34", "35", "36", "37", "38", "39"];

/// Side length of every by_class sample.
pub const IMAGE_SIDE: usize = 128;

/// Which half of the corpus to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Split {
    Train,
    Test,
}

impl Split {
    /// Directory holding one class's images for this split.
    ///
    /// - `train` → `<root>/<code>/train_<code>`
    /// - `test`  → `<root>/<code>/hsf_4`
    pub fn class_dir(self, root: &Path, code: &str) -> PathBuf {
        match self {
            Split::Train => root.join(code).join(format!("train_{}", code)),
            Split::Test => root.join(code).join("hsf_4"),
        }
    }

    pub fn images_file_name(self) -> &'static str {
        match self {
            Split::Train => "train_images",
            Split::Test => "test_images",
        }
    }

    pub fn labels_file_name(self) -> &'static str {
        match self {
            Split::Train => "train_labels",
            Split::Test => "test_labels",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Split::Train => "train",
            Split::Test => "test",
        })
    }
}

/// The digit a class code stands for (`"37"` → 7).
pub fn class_digit(code: &str) -> Option<u8> {
    let ascii = u8::from_str_radix(code, 16).ok()?;
    ascii.is_ascii_digit().then(|| ascii - b'0')
}

/// Every image file of one class, in file-name order.
#[derive(Debug, Clone)]
pub struct ClassListing {
    pub code: &'static str,
    pub digit: u8,
    pub files: Vec<PathBuf>,
}

/// Lists the images of every class for `split`, in `CLASS_CODES` order.
pub fn scan(root: &Path, split: Split) -> Result<Vec<ClassListing>, DatasetError> {
    CLASS_CODES
        .iter()
        .map(|&code| {
            let dir = split.class_dir(root, code);
            let digit = class_digit(code).unwrap_or_default();
            Ok(ClassListing { code, digit, files: list_images(&dir)? })
        })
        .collect()
}

fn list_images(dir: &Path) -> Result<Vec<PathBuf>, DatasetError> {
    if !dir.is_dir() {
        return Err(DatasetError::MissingClassDir(dir.to_path_buf()));
    }
    let entries = std::fs::read_dir(dir).map_err(|source| DatasetError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Decodes one sample as 8-bit grayscale, row-major.
pub fn load_image(path: &Path) -> Result<Vec<u8>, DatasetError> {
    let img = image::open(path).map_err(|source| DatasetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let gray = img.to_luma8();
    let (width, height) = gray.dimensions();
    if width as usize != IMAGE_SIDE || height as usize != IMAGE_SIDE {
        return Err(DatasetError::Dimensions { path: path.to_path_buf(), width, height });
    }
    Ok(gray.into_raw())
}

/// Decodes every image of a class into one contiguous pixel block.
pub fn load_class(listing: &ClassListing) -> Result<Vec<u8>, DatasetError> {
    let mut pixels = Vec::with_capacity(listing.files.len() * IMAGE_SIDE * IMAGE_SIDE);
    for path in &listing.files {
        pixels.extend_from_slice(&load_image(path)?);
    }
    Ok(pixels)
}
