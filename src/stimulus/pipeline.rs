use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::{
    degrade::{
        composite::{DegradeOpts, degrade},
        resample::ResampleFilter,
    },
    foundation::{
        core::{CanvasSize, Rgb8, STIMULUS_DIM},
        error::{SquishError, SquishResult},
    },
    geometry::resolve::{Placement, PolarOffset, resolve},
    glyph::{
        font::GlyphSource,
        render::{FontSize, GlyphSpec, draw},
    },
};

/// One flanker, or two at different angles, all at the same radius.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Arrangement {
    Single(f64),
    Pair(f64, f64),
}

impl Arrangement {
    /// Fails with a configuration error unless `angles` holds one or two entries.
    pub fn from_angles(angles: &[f64]) -> SquishResult<Self> {
        match *angles {
            [a] => Ok(Arrangement::Single(a)),
            [a, b] => Ok(Arrangement::Pair(a, b)),
            _ => Err(SquishError::configuration(format!(
                "flanker count must be 1 or 2, got {}",
                angles.len()
            ))),
        }
    }

    pub fn angles(&self) -> Vec<f64> {
        match *self {
            Arrangement::Single(a) => vec![a],
            Arrangement::Pair(a, b) => vec![a, b],
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Arrangement::Single(_) => 1,
            Arrangement::Pair(..) => 2,
        }
    }
}

/// Everything that determines one stimulus image, given a background and a font.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StimulusSpec {
    pub letter: char,
    pub flanker: char,
    pub size: FontSize,
    pub target_color: Rgb8,
    pub flanker_color: Rgb8,
    pub arrangement: Arrangement,
    pub radius: f64,
    pub degrade: DegradeOpts,
}

impl StimulusSpec {
    pub fn target_glyph(&self) -> GlyphSpec {
        GlyphSpec {
            ch: self.letter,
            size: self.size,
            color: self.target_color,
        }
    }

    pub fn flanker_glyph(&self) -> GlyphSpec {
        GlyphSpec {
            ch: self.flanker,
            size: self.size,
            color: self.flanker_color,
        }
    }

    pub fn filter(&self) -> ResampleFilter {
        self.degrade.filter
    }
}

/// Background with the target already drawn.
///
/// Flanker drawing never touches this canvas; [`TargetCanvas::with_flankers`] works on a copy so
/// many arrangements can share one target.
#[derive(Clone, Debug)]
pub struct TargetCanvas {
    canvas: RgbImage,
}

impl TargetCanvas {
    pub fn new(
        background: &RgbImage,
        glyphs: &dyn GlyphSource,
        target: &GlyphSpec,
    ) -> SquishResult<Self> {
        let size = CanvasSize::of(background);
        size.require_square(STIMULUS_DIM)?;

        let mut canvas = background.clone();
        draw(&mut canvas, glyphs, target, resolve(size, Placement::Anchor))?;
        Ok(Self { canvas })
    }

    pub fn image(&self) -> &RgbImage {
        &self.canvas
    }

    /// Copy of the target canvas with flanker glyphs drawn at `radius` around the anchor.
    pub fn with_flankers(
        &self,
        glyphs: &dyn GlyphSource,
        flanker: &GlyphSpec,
        arrangement: Arrangement,
        radius: f64,
    ) -> SquishResult<RgbImage> {
        let size = CanvasSize::of(&self.canvas);
        let offsets = arrangement
            .angles()
            .into_iter()
            .map(|angle| PolarOffset::new(angle, radius))
            .collect::<SquishResult<Vec<_>>>()?;

        let mut canvas = self.canvas.clone();
        for offset in offsets {
            draw(
                &mut canvas,
                glyphs,
                flanker,
                resolve(size, Placement::Offset(offset)),
            )?;
        }
        Ok(canvas)
    }
}

/// Undegraded stimulus: target plus flankers on a copy of `background`.
pub fn compose_flat(
    background: &RgbImage,
    glyphs: &dyn GlyphSource,
    spec: &StimulusSpec,
) -> SquishResult<RgbImage> {
    TargetCanvas::new(background, glyphs, &spec.target_glyph())?.with_flankers(
        glyphs,
        &spec.flanker_glyph(),
        spec.arrangement,
        spec.radius,
    )
}

/// Full pipeline for one image.
pub fn render_stimulus(
    background: &RgbImage,
    glyphs: &dyn GlyphSource,
    spec: &StimulusSpec,
) -> SquishResult<RgbImage> {
    let flat = compose_flat(background, glyphs, spec)?;
    degrade(&flat, &spec.degrade)
}

#[cfg(test)]
#[path = "../../tests/unit/stimulus/pipeline.rs"]
mod tests;
