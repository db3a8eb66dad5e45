//! Polar placement of glyphs on the stimulus canvas.

pub mod resolve;
