use image::{RgbImage, imageops};
use serde::{Deserialize, Serialize};

use crate::{
    degrade::{
        plan::DegradationPlan,
        resample::{ResampleFilter, resample},
    },
    foundation::{
        core::{CanvasSize, STIMULUS_DIM},
        error::SquishResult,
    },
};

/// Options for [`degrade`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DegradeOpts {
    pub steps: usize,
    pub filter: ResampleFilter,
}

impl Default for DegradeOpts {
    fn default() -> Self {
        Self {
            steps: 20,
            filter: ResampleFilter::Nearest,
        }
    }
}

/// Cropped degradation layers, index `i` resampled to `plan.scale_px[i]`.
#[derive(Clone, Debug)]
pub struct CompositeStack {
    layers: Vec<RgbImage>,
}

impl CompositeStack {
    pub fn build(
        canvas: &RgbImage,
        plan: &DegradationPlan,
        filter: ResampleFilter,
    ) -> SquishResult<Self> {
        let layers = (0..plan.steps())
            .map(|i| degradation_layer(canvas, plan, i, filter))
            .collect::<SquishResult<Vec<_>>>()?;
        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[RgbImage] {
        &self.layers
    }

    /// Paste layers blurriest-first so the sharpest one ends up on top in the middle.
    pub fn flatten(mut self, plan: &DegradationPlan) -> RgbImage {
        let n = self.layers.len();
        // Layer n-1 has the full-canvas crop window and becomes the base. The first paste would
        // put it back onto itself at (0, 0), so start from the next one.
        let Some(mut out) = self.layers.pop() else {
            return RgbImage::new(plan.dim, plan.dim);
        };
        for i in 1..n {
            let (left, upper) = plan.paste_offset(i);
            imageops::replace(
                &mut out,
                &self.layers[n - 1 - i],
                i64::from(left),
                i64::from(upper),
            );
        }
        out
    }
}

/// Layer `i`: down to `scale_px[i]`, back up to full size, center-cropped to `crop_px[i]`.
pub fn degradation_layer(
    canvas: &RgbImage,
    plan: &DegradationPlan,
    i: usize,
    filter: ResampleFilter,
) -> SquishResult<RgbImage> {
    let s = plan.scale_px[i];
    let small = resample(canvas, s, s, filter)?;
    let restored = resample(&small, plan.dim, plan.dim, filter)?;

    let w = plan.crop_window(i);
    Ok(imageops::crop_imm(&restored, w.left, w.upper, w.width(), w.height()).to_image())
}

/// Degrade a 224x224 stimulus so acuity falls off in concentric bands around the center.
///
/// Fails with `InvalidDimensions` for any other canvas size and `InvalidStepCount` for
/// `steps == 0`.
#[tracing::instrument(level = "debug", skip(canvas), fields(steps = opts.steps, filter = %opts.filter))]
pub fn degrade(canvas: &RgbImage, opts: &DegradeOpts) -> SquishResult<RgbImage> {
    CanvasSize::of(canvas).require_square(STIMULUS_DIM)?;
    let plan = DegradationPlan::new(opts.steps, STIMULUS_DIM)?;
    let stack = CompositeStack::build(canvas, &plan, opts.filter)?;
    Ok(stack.flatten(&plan))
}

#[cfg(test)]
#[path = "../../tests/unit/degrade/composite.rs"]
mod tests;
