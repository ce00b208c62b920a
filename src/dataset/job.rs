use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::dataset::by_class::{load_class, scan, Split, IMAGE_SIDE};
use crate::dataset::idx::Idx3Header;
use crate::dataset::writer::CheckpointWriter;
use crate::dataset::DatasetError;

/// Where one class landed in the output array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassBlock {
    pub code: &'static str,
    pub digit: u8,
    pub range: Range<usize>,
}

#[derive(Debug, Clone)]
pub struct PreprocessSummary {
    pub images_path: PathBuf,
    pub labels_path: PathBuf,
    pub total: usize,
    pub blocks: Vec<ClassBlock>,
}

/// Converts one split of a by_class tree into `<out_dir>/<split>_images`
/// (IDX3, `total × 128 × 128`) and `<out_dir>/<split>_labels` (IDX1).
///
/// Classes are processed in `30..39` order and each one is committed to disk
/// before the next is decoded, so an interrupted run leaves a correctly
/// shaped array whose finished classes are intact and the rest zero.
pub fn preprocess(root: &Path, split: Split, out_dir: &Path) -> Result<PreprocessSummary, DatasetError> {
    let listings = scan(root, split)?;
    let total: usize = listings.iter().map(|l| l.files.len()).sum();
    tracing::info!(%split, root = %root.display(), total, "counted images");

    let images_path = out_dir.join(split.images_file_name());
    let labels_path = out_dir.join(split.labels_file_name());
    let header = Idx3Header { count: total, rows: IMAGE_SIDE, cols: IMAGE_SIDE };
    let mut writer = CheckpointWriter::create(&images_path, &labels_path, header)?;

    let mut blocks = Vec::with_capacity(listings.len());
    for listing in &listings {
        let pixels = load_class(listing)?;
        let range = writer.write_block(listing.digit, &pixels)?;
        tracing::info!(
            class = listing.code,
            images = range.len(),
            done = writer.written(),
            total,
            "finished class"
        );
        blocks.push(ClassBlock { code: listing.code, digit: listing.digit, range });
    }

    Ok(PreprocessSummary { images_path, labels_path, total, blocks })
}
