use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::{CanvasSize, PixelPoint},
    error::{SquishError, SquishResult},
};

/// Polar offset from the target anchor: `angle_deg` clockwise from +x (y grows downward),
/// `radius` in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolarOffset {
    pub angle_deg: f64,
    pub radius: f64,
}

impl PolarOffset {
    /// Checked constructor: `angle_deg` in `[0, 360)`, `radius >= 0`.
    pub fn new(angle_deg: f64, radius: f64) -> SquishResult<Self> {
        if !(0.0..360.0).contains(&angle_deg) {
            return Err(SquishError::configuration(format!(
                "flanker angle must be in [0, 360), got {angle_deg}"
            )));
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(SquishError::configuration(format!(
                "flanker radius must be a finite value >= 0, got {radius}"
            )));
        }
        Ok(Self { angle_deg, radius })
    }
}

/// Where a glyph goes before anchor correction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Placement {
    /// The canonical target position.
    #[default]
    Anchor,
    /// Displaced from the anchor.
    Offset(PolarOffset),
}

/// Target anchor: three quarters across, half way down (integer truncation).
pub fn target_anchor(size: CanvasSize) -> PixelPoint {
    let x0 = size.width - size.width / 4;
    let y0 = size.height / 2;
    PixelPoint::new(x0 as i32, y0 as i32)
}

/// Resolve a placement into a pixel coordinate.
///
/// Offsets are truncated toward zero after adding to the anchor. No bounds checks: the point may
/// fall outside the canvas.
pub fn resolve(size: CanvasSize, placement: Placement) -> PixelPoint {
    let anchor = target_anchor(size);
    match placement {
        Placement::Anchor => anchor,
        Placement::Offset(PolarOffset { angle_deg, radius }) => {
            let theta = angle_deg.to_radians();
            let x = f64::from(anchor.x) + radius * theta.cos();
            let y = f64::from(anchor.y) + radius * theta.sin();
            PixelPoint::new(x.trunc() as i32, y.trunc() as i32)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/resolve.rs"]
mod tests;
