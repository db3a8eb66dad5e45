//! Output encoding for finished stimuli.

pub mod jpeg;
