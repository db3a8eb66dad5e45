use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context as _;
use image::RgbImage;
use jpeg_encoder::{ColorType, Encoder};

use crate::foundation::error::{SquishError, SquishResult};

/// Quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

pub fn validate_quality(quality: u8) -> SquishResult<()> {
    if (1..=100).contains(&quality) {
        Ok(())
    } else {
        Err(SquishError::configuration(format!(
            "jpeg quality must be in 1..=100, got {quality}"
        )))
    }
}

pub fn ensure_parent_dir(path: &Path) -> SquishResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Encode `img` as JPEG into `out` with optimized Huffman tables.
pub fn encode_jpeg<W: Write>(img: &RgbImage, out: W, quality: u8) -> SquishResult<()> {
    encode_with(img, out, quality, true)
}

fn encode_with<W: Write>(img: &RgbImage, out: W, quality: u8, optimize: bool) -> SquishResult<()> {
    validate_quality(quality)?;
    let (width, height) = img.dimensions();
    let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(SquishError::dimensions(u32::from(u16::MAX), width, height));
    };
    let mut encoder = Encoder::new(out, quality);
    encoder.set_optimized_huffman_tables(optimize);
    encoder.encode(img.as_raw(), w, h, ColorType::Rgb)?;
    Ok(())
}

/// Write `img` to `path` as JPEG, creating parent directories as needed.
pub fn save_jpeg(img: &RgbImage, path: &Path, quality: u8) -> SquishResult<()> {
    validate_quality(quality)?;
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    encode_jpeg(img, &mut writer, quality)?;
    writer
        .flush()
        .with_context(|| format!("flush '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/jpeg.rs"]
mod tests;
