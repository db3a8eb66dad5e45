use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        core::{PixelPoint, Rgb8},
        error::{SquishError, SquishResult},
        math::lerp_u8,
    },
    glyph::font::{GlyphBitmap, GlyphSource},
};

/// The two font sizes the stimulus set is calibrated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FontSize {
    Px20,
    Px26,
}

impl FontSize {
    pub const ALL: [FontSize; 2] = [FontSize::Px20, FontSize::Px26];

    pub fn px(self) -> u32 {
        match self {
            FontSize::Px20 => 20,
            FontSize::Px26 => 26,
        }
    }

    /// `(dx, dy)` subtracted from a nominal position so the glyph's visual center lands on it.
    pub fn anchor_correction(self) -> (i32, i32) {
        match self {
            FontSize::Px20 => (7, 11),
            FontSize::Px26 => (9, 14),
        }
    }
}

impl TryFrom<u32> for FontSize {
    type Error = SquishError;

    fn try_from(px: u32) -> SquishResult<Self> {
        match px {
            20 => Ok(FontSize::Px20),
            26 => Ok(FontSize::Px26),
            other => Err(SquishError::UnsupportedFontSize(other)),
        }
    }
}

impl From<FontSize> for u32 {
    fn from(size: FontSize) -> u32 {
        size.px()
    }
}

impl std::fmt::Display for FontSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.px())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphSpec {
    pub ch: char,
    pub size: FontSize,
    pub color: Rgb8,
}

impl GlyphSpec {
    /// Fails with [`SquishError::UnsupportedFontSize`] for sizes other than 20 and 26.
    pub fn new(ch: char, size_px: u32, color: Rgb8) -> SquishResult<Self> {
        Ok(Self {
            ch,
            size: FontSize::try_from(size_px)?,
            color,
        })
    }
}

/// Draw `glyph` so its visual center lands on `position`.
///
/// The anchor correction is subtracted from the already-integer position, then the coverage mask
/// is blended onto `canvas` in place. Pixels falling outside the canvas are dropped.
pub fn draw(
    canvas: &mut RgbImage,
    glyphs: &dyn GlyphSource,
    glyph: &GlyphSpec,
    position: PixelPoint,
) -> SquishResult<()> {
    let (dx, dy) = glyph.size.anchor_correction();
    let origin = position.offset_by(dx, dy);
    let bitmap = glyphs.rasterize(glyph.ch, glyph.size.px() as f32)?;
    blit_coverage(canvas, &bitmap, origin, glyph.color)
}

fn blit_coverage(
    canvas: &mut RgbImage,
    bitmap: &GlyphBitmap,
    origin: PixelPoint,
    color: Rgb8,
) -> SquishResult<()> {
    let expected = u64::from(bitmap.width) * u64::from(bitmap.height);
    if bitmap.coverage.len() as u64 != expected {
        return Err(SquishError::font(format!(
            "glyph mask is {}x{} but carries {} coverage bytes",
            bitmap.width,
            bitmap.height,
            bitmap.coverage.len()
        )));
    }

    let (cw, ch) = (canvas.width() as i64, canvas.height() as i64);
    let src = [color.r, color.g, color.b];

    for gy in 0..bitmap.height {
        let y = i64::from(origin.y) + i64::from(bitmap.top) + i64::from(gy);
        if y < 0 || y >= ch {
            continue;
        }
        for gx in 0..bitmap.width {
            let x = i64::from(origin.x) + i64::from(bitmap.left) + i64::from(gx);
            if x < 0 || x >= cw {
                continue;
            }
            let alpha = bitmap.coverage_at(gx, gy);
            if alpha == 0 {
                continue;
            }
            let px = canvas.get_pixel_mut(x as u32, y as u32);
            for (c, s) in px.0.iter_mut().zip(src) {
                *c = lerp_u8(*c, s, alpha);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/render.rs"]
mod tests;
