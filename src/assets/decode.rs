use std::path::Path;

use anyhow::Context;
use image::RgbImage;

use crate::foundation::{
    core::{CanvasSize, STIMULUS_DIM},
    error::SquishResult,
};

/// Decode encoded image bytes into an RGB8 stimulus background (must be 224x224).
pub fn decode_background(bytes: &[u8]) -> SquishResult<RgbImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode background from memory")?;
    checked_background(dyn_img.to_rgb8())
}

/// Load a stimulus background from disk. Any alpha channel is dropped.
pub fn load_background(path: &Path) -> SquishResult<RgbImage> {
    let dyn_img =
        image::open(path).with_context(|| format!("open background '{}'", path.display()))?;
    let rgb = checked_background(dyn_img.to_rgb8())?;
    tracing::debug!(path = %path.display(), "loaded background");
    Ok(rgb)
}

fn checked_background(rgb: RgbImage) -> SquishResult<RgbImage> {
    CanvasSize::of(&rgb).require_square(STIMULUS_DIM)?;
    Ok(rgb)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
