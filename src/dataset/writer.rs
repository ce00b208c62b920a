use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::dataset::idx::{encode_idx1_header, Idx3Header, IDX1_HEADER_LEN, IDX3_HEADER_LEN};
use crate::dataset::DatasetError;

/// Writes an IDX3 image array and its IDX1 labels class block by class block.
///
/// Both files are created at their final size up front, so the on-disk shape
/// is valid from the start: blocks not yet written read back as zeros. Each
/// `write_block` is synced before it returns.
#[derive(Debug)]
pub struct CheckpointWriter {
    images: File,
    labels: File,
    images_path: PathBuf,
    labels_path: PathBuf,
    header: Idx3Header,
    written: usize,
}

impl CheckpointWriter {
    pub fn create(images_path: &Path, labels_path: &Path, header: Idx3Header) -> Result<CheckpointWriter, DatasetError> {
        let image_header = header.encode()?;
        let label_header = encode_idx1_header(header.count)?;
        let image_file_len = header
            .file_len()
            .ok_or_else(|| DatasetError::Idx(format!("{} images do not fit in one file.", header.count)))?;

        let mut images = create_sized(images_path, image_file_len as u64)?;
        let mut labels = create_sized(labels_path, (IDX1_HEADER_LEN + header.count) as u64)?;

        write_at(&mut images, images_path, 0, &image_header)?;
        write_at(&mut labels, labels_path, 0, &label_header)?;
        sync(&images, images_path)?;
        sync(&labels, labels_path)?;

        Ok(CheckpointWriter {
            images,
            labels,
            images_path: images_path.to_path_buf(),
            labels_path: labels_path.to_path_buf(),
            header,
            written: 0,
        })
    }

    /// Number of images committed so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Appends a block of images sharing one label right after the previous
    /// block and makes it durable. Returns the index range it occupies.
    pub fn write_block(&mut self, label: u8, pixels: &[u8]) -> Result<Range<usize>, DatasetError> {
        let image_len = self.header.image_len();
        if image_len == 0 || pixels.len() % image_len != 0 {
            return Err(DatasetError::Idx(format!(
                "block of {} bytes is not a whole number of {}-byte images.",
                pixels.len(), image_len
            )));
        }
        let n = pixels.len() / image_len;
        let range = self.written..self.written + n;
        if range.end > self.header.count {
            return Err(DatasetError::Idx(format!(
                "block would end at image {} but the array only holds {}.",
                range.end, self.header.count
            )));
        }

        let image_offset = (IDX3_HEADER_LEN + range.start * image_len) as u64;
        let label_offset = (IDX1_HEADER_LEN + range.start) as u64;
        write_at(&mut self.images, &self.images_path, image_offset, pixels)?;
        write_at(&mut self.labels, &self.labels_path, label_offset, &vec![label; n])?;
        sync(&self.images, &self.images_path)?;
        sync(&self.labels, &self.labels_path)?;

        self.written = range.end;
        Ok(range)
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> DatasetError + '_ {
    move |source| DatasetError::Io { path: path.to_path_buf(), source }
}

fn create_sized(path: &Path, len: u64) -> Result<File, DatasetError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(io_err(path))?;
    file.set_len(len).map_err(io_err(path))?;
    Ok(file)
}

fn write_at(file: &mut File, path: &Path, offset: u64, bytes: &[u8]) -> Result<(), DatasetError> {
    file.seek(SeekFrom::Start(offset)).map_err(io_err(path))?;
    file.write_all(bytes).map_err(io_err(path))?;
    file.flush().map_err(io_err(path))
}

fn sync(file: &File, path: &Path) -> Result<(), DatasetError> {
    file.sync_data().map_err(io_err(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::idx::{parse_idx1, parse_idx3};

    #[test]
    fn unwritten_blocks_read_back_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("out/train_images");
        let labels = dir.path().join("out/train_labels");

        let mut w = CheckpointWriter::create(&images, &labels, Idx3Header { count: 3, rows: 2, cols: 2 }).unwrap();
        assert_eq!(w.write_block(5, &[9; 4]).unwrap(), 0..1);
        drop(w);

        let bytes = std::fs::read(&images).unwrap();
        let (header, pixels) = parse_idx3(&bytes).unwrap();
        assert_eq!(header.count, 3);
        assert_eq!(&pixels[..4], &[9; 4]);
        assert!(pixels[4..].iter().all(|&p| p == 0));

        let label_bytes = std::fs::read(&labels).unwrap();
        assert_eq!(parse_idx1(&label_bytes).unwrap(), &[5, 0, 0]);
    }

    #[test]
    fn overflowing_block_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = CheckpointWriter::create(
            &dir.path().join("i"),
            &dir.path().join("l"),
            Idx3Header { count: 1, rows: 1, cols: 2 },
        )
        .unwrap();
        assert!(w.write_block(0, &[1, 2, 3, 4]).is_err());
        assert!(w.write_block(0, &[1, 2, 3]).is_err());
        assert_eq!(w.write_block(0, &[1, 2]).unwrap(), 0..1);
        assert_eq!(w.written(), 1);
    }
}
