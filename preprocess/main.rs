//! OHDR · NIST by_class preprocessor
//!
//! Converts the digit classes (hex codes 30..39) of a NIST SD19 by_class
//! tree into one IDX3 image array plus an IDX1 label file.
//!
//! Run with:
//!   cargo run --bin preprocess --release -- train
//!   cargo run --bin preprocess --release -- test --root /data/by_class --out-dir nist_data

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use ohdr::dataset::idx::{parse_idx3_header, IDX3_HEADER_LEN};
use ohdr::dataset::{preprocess, Split};

#[derive(Parser, Debug)]
#[command(name = "preprocess", about = "Pack NIST by_class digit images into an IDX array")]
struct Cli {
    /// Which split to convert.
    #[arg(value_enum)]
    split: Split,

    /// Root of the by_class tree.
    #[arg(long, default_value = "by_class")]
    root: PathBuf,

    /// Directory the `<split>_images` / `<split>_labels` files are written to.
    #[arg(long, default_value = "nist_data")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    ohdr::logging::init();

    let summary = preprocess(&cli.root, cli.split, &cli.out_dir)
        .with_context(|| format!("preprocessing the {} split", cli.split))?;

    // Re-read the header rather than the whole array; train is several GB.
    let mut header_bytes = [0u8; IDX3_HEADER_LEN];
    let mut file = File::open(&summary.images_path)
        .with_context(|| format!("reopening {}", summary.images_path.display()))?;
    file.read_exact(&mut header_bytes)?;
    let header = parse_idx3_header(&header_bytes)?;
    let on_disk = file.metadata()?.len();

    if header.count != summary.total || Some(on_disk as usize) != header.file_len() {
        bail!(
            "{} is inconsistent: header says {} images ({:?} bytes), file is {} bytes",
            summary.images_path.display(),
            header.count,
            header.file_len(),
            on_disk
        );
    }

    for block in &summary.blocks {
        tracing::info!(class = block.code, digit = block.digit, range = ?block.range, "class block");
    }
    tracing::info!(
        images = %summary.images_path.display(),
        labels = %summary.labels_path.display(),
        shape = ?[header.count, header.rows, header.cols],
        "done"
    );
    Ok(())
}
