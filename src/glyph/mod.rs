//! Glyph rasterization and drawing onto RGB canvases.

pub mod font;
pub mod render;

#[cfg(test)]
#[path = "../../tests/unit/glyph/support.rs"]
pub(crate) mod testing;
