use std::{fmt, path::Path};

use anyhow::Context;

use crate::foundation::error::{SquishError, SquishResult};

/// 8-bit coverage mask for one character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphBitmap {
    /// Horizontal distance from the text origin to the mask's left edge.
    pub left: i32,
    /// Vertical distance from the text origin (top of the line box) to the mask's top edge.
    pub top: i32,
    pub width: u32,
    pub height: u32,
    /// Row-major coverage, `width * height` bytes.
    pub coverage: Vec<u8>,
}

impl GlyphBitmap {
    pub fn coverage_at(&self, x: u32, y: u32) -> u8 {
        self.coverage[(y * self.width + x) as usize]
    }
}

/// Anything that can turn a character at a pixel size into a coverage mask.
///
/// Implementations must be deterministic: the same `(ch, px)` yields the same bitmap.
pub trait GlyphSource: Send + Sync {
    fn rasterize(&self, ch: char, px: f32) -> SquishResult<GlyphBitmap>;
}

/// TrueType/OpenType face rasterized with `fontdue`.
pub struct FontFace {
    font: fontdue::Font,
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace")
            .field("glyph_count", &self.font.glyph_count())
            .finish()
    }
}

impl FontFace {
    pub fn from_bytes(bytes: &[u8]) -> SquishResult<Self> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| SquishError::font(format!("parse font: {e}")))?;
        Ok(Self { font })
    }

    pub fn from_path(path: &Path) -> SquishResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        let face = Self::from_bytes(&bytes)?;
        tracing::debug!(path = %path.display(), font = ?face, "loaded font");
        Ok(face)
    }
}

impl GlyphSource for FontFace {
    fn rasterize(&self, ch: char, px: f32) -> SquishResult<GlyphBitmap> {
        if self.font.lookup_glyph_index(ch) == 0 {
            return Err(SquishError::font(format!("font has no glyph for {ch:?}")));
        }

        let ascent = self
            .font
            .horizontal_line_metrics(px)
            .map(|m| m.ascent)
            .unwrap_or(px);
        let (metrics, coverage) = self.font.rasterize(ch, px);

        // fontdue reports ymin as the mask bottom relative to the baseline, y up.
        let top = ascent.round() as i32 - (metrics.ymin + metrics.height as i32);
        Ok(GlyphBitmap {
            left: metrics.xmin,
            top,
            width: metrics.width as u32,
            height: metrics.height as u32,
            coverage,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/font.rs"]
mod tests;
