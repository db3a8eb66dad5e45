//! Parameter sweeps: enumerate every stimulus combination and write the images to disk.

pub mod config;
pub mod driver;
