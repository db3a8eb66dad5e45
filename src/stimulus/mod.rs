//! Target/flanker stimulus assembly: resolve, draw, degrade.

pub mod pipeline;
