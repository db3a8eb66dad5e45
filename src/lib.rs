//! squish synthesizes crowding stimuli for peripheral-vision experiments.
//!
//! A stimulus is a 224x224 RGB canvas holding a target letter right of center and one or two
//! flanker letters at a polar offset from it. The flat canvas is then degraded so acuity falls
//! off in concentric bands away from the canvas center.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `CanvasSize + Placement -> PixelPoint` (target anchor or polar offset)
//! 2. **Draw**: `GlyphSpec + PixelPoint -> RgbImage` (anchor-corrected glyph blending)
//! 3. **Degrade**: `RgbImage + DegradeOpts -> RgbImage` (down/up resample per step, crop, paste)
//! 4. **Sweep** (optional): enumerate a [`SweepConfig`] and write every combination as JPEG
//!
//! Every stage is pure and synchronous; nothing is shared between images, so a sweep
//! parallelizes per target without locking.
#![forbid(unsafe_code)]

mod assets;
mod degrade;
mod encode;
mod foundation;
mod geometry;
mod glyph;
mod stimulus;
mod sweep;

pub use assets::decode::{decode_background, load_background};
pub use degrade::composite::{CompositeStack, DegradeOpts, degradation_layer, degrade};
pub use degrade::plan::{CropWindow, DegradationPlan, MIN_ACUITY};
pub use degrade::resample::{ResampleFilter, resample};
pub use encode::jpeg::{DEFAULT_JPEG_QUALITY, encode_jpeg, ensure_parent_dir, save_jpeg};
pub use foundation::core::{CanvasSize, PixelPoint, Rgb8, STIMULUS_DIM};
pub use foundation::error::{SquishError, SquishResult};
pub use geometry::resolve::{Placement, PolarOffset, resolve, target_anchor};
pub use glyph::font::{FontFace, GlyphBitmap, GlyphSource};
pub use glyph::render::{FontSize, GlyphSpec, draw};
pub use stimulus::pipeline::{
    Arrangement, StimulusSpec, TargetCanvas, compose_flat, render_stimulus,
};
pub use sweep::config::{StimulusJob, SweepConfig, TargetJob};
pub use sweep::driver::{SweepOpts, SweepStats, run_sweep};
