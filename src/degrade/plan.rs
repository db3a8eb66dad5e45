use serde::Serialize;

use crate::foundation::{
    error::{SquishError, SquishResult},
    math::{geomspace, round_half_even},
};

/// Acuity of the most degraded layer, relative to the full canvas.
pub const MIN_ACUITY: f64 = 0.2;

/// Pixel window `[left, right) x [upper, lower)` inside a square canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CropWindow {
    pub left: u32,
    pub upper: u32,
    pub right: u32,
    pub lower: u32,
}

impl CropWindow {
    /// Centered window of nominal edge `edge`; odd margins round the offset down, so the window
    /// can be one pixel wider than `edge`.
    pub fn centered(dim: u32, edge: u32) -> Self {
        let left = (dim - edge) / 2;
        let upper = (dim - edge) / 2;
        Self {
            left,
            upper,
            right: dim - left,
            lower: dim - upper,
        }
    }

    pub fn width(self) -> u32 {
        self.right - self.left
    }

    pub fn height(self) -> u32 {
        self.lower - self.upper
    }
}

/// Per-step sizes for one degradation pass over a `dim`x`dim` canvas.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DegradationPlan {
    pub dim: u32,
    /// Strictly decreasing from exactly 1.0.
    pub scalars: Vec<f64>,
    /// Edge length each layer is downsampled to.
    pub scale_px: Vec<u32>,
    /// Edge length each layer is cropped to: `scale_px` reversed.
    pub crop_px: Vec<u32>,
}

impl DegradationPlan {
    pub fn new(steps: usize, dim: u32) -> SquishResult<Self> {
        if steps < 1 {
            return Err(SquishError::InvalidStepCount(steps));
        }

        let raw = geomspace(1.0, MIN_ACUITY, steps);
        let sum: f64 = raw.iter().sum();
        let normalized: Vec<f64> = raw.iter().map(|v| v / sum).collect();
        let first = normalized[0];
        let scalars: Vec<f64> = normalized.iter().map(|v| v / first).collect();

        let scale_px = scalars
            .iter()
            .map(|s| {
                let px = round_half_even(s * f64::from(dim));
                if px < 1.0 || px > f64::from(dim) {
                    return Err(SquishError::resampling(format!(
                        "acuity scalar {s} maps to {px} px on a {dim} px canvas"
                    )));
                }
                Ok(px as u32)
            })
            .collect::<SquishResult<Vec<u32>>>()?;
        let crop_px: Vec<u32> = scale_px.iter().rev().copied().collect();

        tracing::debug!(steps, dim, ?scale_px, "built degradation plan");
        Ok(Self {
            dim,
            scalars,
            scale_px,
            crop_px,
        })
    }

    pub fn steps(&self) -> usize {
        self.scalars.len()
    }

    /// Window kept from layer `i` after resampling.
    pub fn crop_window(&self, i: usize) -> CropWindow {
        CropWindow::centered(self.dim, self.crop_px[i])
    }

    /// Top-left corner at which layer `steps - 1 - i` is pasted.
    pub fn paste_offset(&self, i: usize) -> (u32, u32) {
        let off = (self.dim - self.scale_px[i]) / 2;
        (off, off)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/degrade/plan.rs"]
mod tests;
