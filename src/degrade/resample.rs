use std::{fmt, str::FromStr};

use image::{RgbImage, imageops};
use serde::{Deserialize, Serialize};

use crate::foundation::error::{SquishError, SquishResult};

/// Resampling kernel used for both halves of the down/up round trip.
///
/// `Nearest` walks the source from half a step in, adding `in / out` per destination pixel and
/// truncating, so a center that falls exactly on a pixel boundary resolves to the lower pixel.
/// The other kernels go through `image::imageops::resize` and smooth rather than block.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    #[default]
    Nearest,
    Triangle,
    #[value(name = "catmullrom")]
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResampleFilter {
    pub const ALL: [ResampleFilter; 5] = [
        ResampleFilter::Nearest,
        ResampleFilter::Triangle,
        ResampleFilter::CatmullRom,
        ResampleFilter::Gaussian,
        ResampleFilter::Lanczos3,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResampleFilter::Nearest => "nearest",
            ResampleFilter::Triangle => "triangle",
            ResampleFilter::CatmullRom => "catmullrom",
            ResampleFilter::Gaussian => "gaussian",
            ResampleFilter::Lanczos3 => "lanczos3",
        }
    }

    fn image_filter(self) -> Option<imageops::FilterType> {
        match self {
            ResampleFilter::Nearest => None,
            ResampleFilter::Triangle => Some(imageops::FilterType::Triangle),
            ResampleFilter::CatmullRom => Some(imageops::FilterType::CatmullRom),
            ResampleFilter::Gaussian => Some(imageops::FilterType::Gaussian),
            ResampleFilter::Lanczos3 => Some(imageops::FilterType::Lanczos3),
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResampleFilter {
    type Err = SquishError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SquishError::configuration(format!("unknown resampling filter '{s}'")))
    }
}

pub fn resample(
    img: &RgbImage,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> SquishResult<RgbImage> {
    if width == 0 || height == 0 {
        return Err(SquishError::resampling(format!(
            "cannot resample to {width}x{height}"
        )));
    }
    if img.width() == 0 || img.height() == 0 {
        return Err(SquishError::resampling("cannot resample an empty image"));
    }
    if img.dimensions() == (width, height) {
        return Ok(img.clone());
    }

    Ok(match filter.image_filter() {
        Some(kernel) => imageops::resize(img, width, height, kernel),
        None => resize_nearest(img, width, height),
    })
}

fn resize_nearest(img: &RgbImage, width: u32, height: u32) -> RgbImage {
    let xs = nearest_indices(img.width(), width);
    let ys = nearest_indices(img.height(), height);
    RgbImage::from_fn(width, height, |x, y| {
        *img.get_pixel(xs[x as usize], ys[y as usize])
    })
}

fn nearest_indices(src: u32, dst: u32) -> Vec<u32> {
    let scale = f64::from(src) / f64::from(dst);
    let mut xo = scale * 0.5;
    let mut idx = Vec::with_capacity(dst as usize);
    for _ in 0..dst {
        idx.push((xo as u32).min(src - 1));
        xo += scale;
    }
    idx
}

#[cfg(test)]
#[path = "../../tests/unit/degrade/resample.rs"]
mod tests;
