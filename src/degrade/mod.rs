//! Multi-resolution acuity degradation.
//!
//! A [`plan::DegradationPlan`] fixes how many layers exist and how large each is;
//! [`composite::degrade`] resamples the canvas once per layer and stacks the layers so the
//! sharpest one ends up in the middle.

pub mod composite;
pub mod plan;
pub mod resample;
