//! Theme icons, decoded and pre-scaled once at startup.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;

use crate::config::AppConfig;
use crate::ui::ICON_SIZE;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("cannot load icon '{path}': {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// An RGBA bitmap ready to upload as a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Both icons the theme toggle swaps between.
#[derive(Debug, Clone)]
pub struct IconSet {
    pub dark: Icon,
    pub light: Icon,
}

impl IconSet {
    pub fn load(config: &AppConfig) -> Result<IconSet, AssetError> {
        let size = ICON_SIZE as u32;
        Ok(IconSet {
            dark: load_icon(&config.dark_icon_path, size)?,
            light: load_icon(&config.light_icon_path, size)?,
        })
    }
}

/// Decodes an image file and scales it to exactly `size × size`.
pub fn load_icon(path: &Path, size: u32) -> Result<Icon, AssetError> {
    let img = image::open(path).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let scaled = img.resize_exact(size, size, FilterType::Triangle).to_rgba8();
    tracing::debug!(path = %path.display(), size, "icon loaded");
    Ok(Icon {
        width: scaled.width(),
        height: scaled.height(),
        rgba: scaled.into_raw(),
    })
}
