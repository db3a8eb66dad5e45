/// Convenience result type used across squish.
pub type SquishResult<T> = Result<T, SquishError>;

/// Top-level error taxonomy.
///
/// Every variant is terminal: generation is pure and deterministic, so callers (typically a sweep
/// driver) decide whether to skip an image or abort.
#[derive(thiserror::Error, Debug)]
pub enum SquishError {
    /// Glyph requested at a size with no anchor correction entry.
    #[error("unsupported font size: {0} (supported: 20, 26)")]
    UnsupportedFontSize(u32),

    /// Invalid user-provided parameters (colors, flanker counts, sweep tables).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Raster is not the expected square size.
    #[error("invalid dimensions: expected {expected}x{expected}, got {width}x{height}")]
    InvalidDimensions {
        /// Required edge length in pixels.
        expected: u32,
        /// Actual width.
        width: u32,
        /// Actual height.
        height: u32,
    },

    /// Degradation requested with fewer than one step.
    #[error("invalid step count: {0} (must be >= 1)")]
    InvalidStepCount(usize),

    /// A degradation plan produced a scale the resampler cannot honour.
    #[error("resampling error: {0}")]
    Resampling(String),

    /// Font data could not be parsed or lacks a glyph.
    #[error("font error: {0}")]
    Font(String),

    /// Image decode failure.
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// JPEG encode failure, including write errors on the output stream.
    #[error("jpeg encoding error: {0}")]
    Jpeg(#[from] jpeg_encoder::EncodingError),

    /// Wrapped lower-level error with context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SquishError {
    /// Build a [`SquishError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`SquishError::Resampling`] value.
    pub fn resampling(msg: impl Into<String>) -> Self {
        Self::Resampling(msg.into())
    }

    /// Build a [`SquishError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`SquishError::InvalidDimensions`] value.
    pub fn dimensions(expected: u32, width: u32, height: u32) -> Self {
        Self::InvalidDimensions {
            expected,
            width,
            height,
        }
    }

    /// True for failures caused by bad parameters rather than bad input files.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFontSize(_) | Self::Configuration(_) | Self::InvalidStepCount(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
