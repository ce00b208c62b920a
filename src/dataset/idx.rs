//! Encoding and validation of IDX binary arrays, the format MNIST ships in.
//!
//! # IDX3 image file layout
//! ```text
//! bytes  0-1:   0x00 0x00   (reserved, must be zero)
//! byte   2:     0x08        (dtype = uint8)
//! byte   3:     0x03        (number of dimensions = 3)
//! bytes  4-7:   N           (number of images, big-endian u32)
//! bytes  8-11:  rows        (image height in pixels, big-endian u32)
//! bytes 12-15:  cols        (image width in pixels, big-endian u32)
//! bytes 16..:   N * rows * cols bytes, row-major, uint8
//! ```
//!
//! # IDX1 label file layout
//! ```text
//! bytes  0-1:   0x00 0x00   (reserved, must be zero)
//! byte   2:     0x08        (dtype = uint8)
//! byte   3:     0x01        (number of dimensions = 1)
//! bytes  4-7:   N           (number of labels, big-endian u32)
//! bytes  8..:   N bytes, each a class index
//! ```

use crate::dataset::DatasetError;

pub const IDX3_HEADER_LEN: usize = 16;
pub const IDX1_HEADER_LEN: usize = 8;

const DTYPE_U8: u8 = 0x08;

/// Shape declared by an IDX3 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Idx3Header {
    pub count: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Idx3Header {
    pub fn image_len(&self) -> usize {
        self.rows * self.cols
    }

    /// Total file length the header implies, or `None` on overflow.
    pub fn file_len(&self) -> Option<usize> {
        self.count
            .checked_mul(self.image_len())?
            .checked_add(IDX3_HEADER_LEN)
    }

    pub fn encode(&self) -> Result<[u8; IDX3_HEADER_LEN], DatasetError> {
        let mut out = [0u8; IDX3_HEADER_LEN];
        out[2] = DTYPE_U8;
        out[3] = 0x03;
        out[4..8].copy_from_slice(&to_u32(self.count)?.to_be_bytes());
        out[8..12].copy_from_slice(&to_u32(self.rows)?.to_be_bytes());
        out[12..16].copy_from_slice(&to_u32(self.cols)?.to_be_bytes());
        Ok(out)
    }
}

pub fn encode_idx1_header(count: usize) -> Result<[u8; IDX1_HEADER_LEN], DatasetError> {
    let mut out = [0u8; IDX1_HEADER_LEN];
    out[2] = DTYPE_U8;
    out[3] = 0x01;
    out[4..8].copy_from_slice(&to_u32(count)?.to_be_bytes());
    Ok(out)
}

fn to_u32(n: usize) -> Result<u32, DatasetError> {
    u32::try_from(n).map_err(|_| DatasetError::Idx(format!("{} does not fit in a u32 IDX dimension.", n)))
}

fn be_u32(bytes: &[u8], at: usize) -> usize {
    u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]) as usize
}

fn check_magic(bytes: &[u8], dims: u8, what: &str) -> Result<(), DatasetError> {
    if bytes[0] != 0x00 || bytes[1] != 0x00 {
        return Err(DatasetError::Idx(format!(
            "IDX {} file: bytes 0-1 must be 0x00 0x00 (reserved), got 0x{:02X} 0x{:02X}.",
            what, bytes[0], bytes[1]
        )));
    }
    if bytes[2] != DTYPE_U8 {
        return Err(DatasetError::Idx(format!(
            "IDX {} file: byte 2 (dtype) must be 0x08 (uint8), got 0x{:02X}.",
            what, bytes[2]
        )));
    }
    if bytes[3] != dims {
        return Err(DatasetError::Idx(format!(
            "IDX {} file: byte 3 (dimensions) must be {}, got {}.",
            what, dims, bytes[3]
        )));
    }
    Ok(())
}

/// Validates and decodes the 16-byte header of an IDX3 image file.
pub fn parse_idx3_header(bytes: &[u8]) -> Result<Idx3Header, DatasetError> {
    if bytes.len() < IDX3_HEADER_LEN {
        return Err(DatasetError::Idx(format!(
            "IDX image file too short: expected at least 16 header bytes, got {}.",
            bytes.len()
        )));
    }
    check_magic(bytes, 0x03, "image")?;

    let header = Idx3Header {
        count: be_u32(bytes, 4),
        rows: be_u32(bytes, 8),
        cols: be_u32(bytes, 12),
    };
    if header.file_len().is_none() {
        return Err(DatasetError::Idx(format!(
            "IDX image file: {} items of {}×{} pixels overflows usize.",
            header.count, header.rows, header.cols
        )));
    }
    Ok(header)
}

/// Validates a whole IDX3 image file and returns its header and pixel block.
pub fn parse_idx3(bytes: &[u8]) -> Result<(Idx3Header, &[u8]), DatasetError> {
    let header = parse_idx3_header(bytes)?;
    let required = header.file_len().unwrap_or(usize::MAX);
    if bytes.len() < required {
        return Err(DatasetError::Idx(format!(
            "IDX image file too short: header declares {} items of {}×{} pixels \
             ({} bytes needed in total), but file is only {} bytes.",
            header.count, header.rows, header.cols, required, bytes.len()
        )));
    }
    Ok((header, &bytes[IDX3_HEADER_LEN..required]))
}

/// Validates an IDX1 label file and returns its labels.
pub fn parse_idx1(bytes: &[u8]) -> Result<&[u8], DatasetError> {
    if bytes.len() < IDX1_HEADER_LEN {
        return Err(DatasetError::Idx(format!(
            "IDX label file too short: expected at least 8 header bytes, got {}.",
            bytes.len()
        )));
    }
    check_magic(bytes, 0x01, "label")?;

    let count = be_u32(bytes, 4);
    let required = IDX1_HEADER_LEN + count;
    if bytes.len() < required {
        return Err(DatasetError::Idx(format!(
            "IDX label file too short: header declares {} labels but file is only {} bytes \
             (need at least {} bytes).",
            count, bytes.len(), required
        )));
    }
    Ok(&bytes[IDX1_HEADER_LEN..required])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_encodes_big_endian_shape() {
        let h = Idx3Header { count: 258, rows: 128, cols: 128 };
        let bytes = h.encode().unwrap();
        assert_eq!(&bytes[..4], &[0, 0, 8, 3]);
        assert_eq!(&bytes[4..8], &[0, 0, 1, 2]);
        assert_eq!(parse_idx3_header(&bytes).unwrap(), h);
    }

    #[test]
    fn truncated_pixel_block_is_rejected() {
        let mut bytes = Idx3Header { count: 2, rows: 2, cols: 2 }.encode().unwrap().to_vec();
        bytes.extend_from_slice(&[1, 2, 3, 4, 5]);
        let err = parse_idx3(&bytes).unwrap_err();
        assert!(err.to_string().contains("too short"));

        bytes.extend_from_slice(&[6, 7, 8]);
        let (h, pixels) = parse_idx3(&bytes).unwrap();
        assert_eq!(h.count, 2);
        assert_eq!(pixels, &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn label_file_with_wrong_rank_is_rejected() {
        let mut bytes = encode_idx1_header(1).unwrap().to_vec();
        bytes[3] = 0x03;
        bytes.push(4);
        assert!(parse_idx1(&bytes).is_err());

        bytes[3] = 0x01;
        assert_eq!(parse_idx1(&bytes).unwrap(), &[4]);
    }
}
