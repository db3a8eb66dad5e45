use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    degrade::{composite::DegradeOpts, plan::DegradationPlan, resample::ResampleFilter},
    encode::jpeg::{DEFAULT_JPEG_QUALITY, validate_quality},
    foundation::{
        core::{Rgb8, STIMULUS_DIM},
        error::{SquishError, SquishResult},
    },
    geometry::resolve::PolarOffset,
    glyph::render::{FontSize, GlyphSpec},
    stimulus::pipeline::{Arrangement, StimulusSpec},
};

/// Immutable description of a full stimulus sweep.
///
/// Every field has a default reproducing the reference crowding experiment, so a config file only
/// needs the fields it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    pub sizes: Vec<FontSize>,
    pub target_colors: Vec<Rgb8>,
    pub flanker_colors: Vec<Rgb8>,
    /// Target letters; each needs an entry in `class_index`.
    pub letters: Vec<char>,
    pub flankers: Vec<char>,
    /// Flanker angles in degrees.
    pub angles: Vec<f64>,
    /// The second flanker of a pair uses `angles` rotated right by this many positions.
    pub pair_shift: usize,
    /// Target-to-flanker center distances in pixels.
    pub distances: Vec<f64>,
    pub flanker_count: u8,
    pub steps: usize,
    pub images_per_set: u32,
    pub class_index: BTreeMap<char, u32>,
    pub filter: ResampleFilter,
    pub jpeg_quality: u8,
    pub background: PathBuf,
    pub font: PathBuf,
    pub out_dir: PathBuf,
}

impl Default for SweepConfig {
    fn default() -> Self {
        let grey_light = Rgb8::new(200, 200, 200);
        let grey_dark = Rgb8::new(50, 50, 50);
        let letters = vec!['A', 'B', 'C', 'E', 'G', 'M', 'Y', 'Q'];
        let class_index = letters.iter().copied().zip(2u32..).collect();

        Self {
            sizes: FontSize::ALL.to_vec(),
            target_colors: vec![grey_light, grey_dark],
            flanker_colors: vec![grey_light, grey_dark],
            letters,
            flankers: vec!['A', 'B', 'C', 'E', 'G', 'H', 'M', 'Q', 'S', 'Y'],
            angles: (0..360).step_by(18).map(f64::from).collect(),
            pair_shift: 10,
            distances: (25..=45).step_by(2).map(f64::from).collect(),
            flanker_count: 1,
            steps: 20,
            images_per_set: 1,
            class_index,
            filter: ResampleFilter::Nearest,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            background: PathBuf::from("data/grey_bg/greybg.jpg"),
            font: PathBuf::from("arialbd.ttf"),
            out_dir: PathBuf::from("directory"),
        }
    }
}

/// One target drawing shared by every flanker arrangement under it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetJob {
    pub size: FontSize,
    pub target_color: Rgb8,
    pub flanker_color: Rgb8,
    pub letter: char,
    pub class: u32,
}

/// One output image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StimulusJob {
    pub target: TargetJob,
    pub spec: StimulusSpec,
    pub angle: f64,
    pub distance: f64,
    pub image_index: u32,
}

impl StimulusJob {
    /// `<size>/<target color>/<flanker color>/<letter>/<class>/<flanker>_<angle>_<distance>_<iii>.jpg`
    pub fn relative_path(&self) -> PathBuf {
        self.target.dir().join(self.target.class.to_string()).join(format!(
            "{}_{}_{}_{:03}.jpg",
            self.spec.flanker, self.angle, self.distance, self.image_index
        ))
    }
}

impl TargetJob {
    /// Directory (relative to the sweep root) holding this target's class folders.
    pub fn dir(&self) -> PathBuf {
        PathBuf::from(self.size.to_string())
            .join(self.target_color.to_string())
            .join(self.flanker_color.to_string())
            .join(self.letter.to_string())
    }

    pub fn glyph(&self) -> GlyphSpec {
        GlyphSpec {
            ch: self.letter,
            size: self.size,
            color: self.target_color,
        }
    }
}

impl SweepConfig {
    pub fn from_json_str(json: &str) -> SquishResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| SquishError::configuration(format!("parse sweep config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> SquishResult<Self> {
        let f =
            File::open(path).with_context(|| format!("open sweep config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            SquishError::configuration(format!("parse sweep config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> SquishResult<()> {
        fn non_empty<T>(name: &str, v: &[T]) -> SquishResult<()> {
            if v.is_empty() {
                return Err(SquishError::configuration(format!(
                    "sweep '{name}' must not be empty"
                )));
            }
            Ok(())
        }

        non_empty("sizes", &self.sizes)?;
        non_empty("target_colors", &self.target_colors)?;
        non_empty("flanker_colors", &self.flanker_colors)?;
        non_empty("letters", &self.letters)?;
        non_empty("flankers", &self.flankers)?;
        non_empty("angles", &self.angles)?;
        non_empty("distances", &self.distances)?;

        if !matches!(self.flanker_count, 1 | 2) {
            return Err(SquishError::configuration(format!(
                "flanker_count must be 1 or 2, got {}",
                self.flanker_count
            )));
        }
        if self.images_per_set == 0 {
            return Err(SquishError::configuration("images_per_set must be >= 1"));
        }
        DegradationPlan::new(self.steps, STIMULUS_DIM)?;
        validate_quality(self.jpeg_quality)?;

        if let Some(missing) = self
            .letters
            .iter()
            .find(|l| !self.class_index.contains_key(l))
        {
            return Err(SquishError::configuration(format!(
                "letter '{missing}' has no class index"
            )));
        }
        for &angle in &self.angles {
            for &distance in &self.distances {
                PolarOffset::new(angle, distance)?;
            }
        }
        Ok(())
    }

    pub fn degrade_opts(&self) -> DegradeOpts {
        DegradeOpts {
            steps: self.steps,
            filter: self.filter,
        }
    }

    /// Angle of the second flanker for angle slot `p`.
    pub fn paired_angle(&self, p: usize) -> f64 {
        let n = self.angles.len();
        let shift = self.pair_shift % n;
        self.angles[(p + n - shift) % n]
    }

    pub fn arrangement(&self, p: usize) -> Arrangement {
        match self.flanker_count {
            2 => Arrangement::Pair(self.angles[p], self.paired_angle(p)),
            _ => Arrangement::Single(self.angles[p]),
        }
    }

    /// Targets in sweep order: size, target color, flanker color, letter.
    pub fn targets(&self) -> Vec<TargetJob> {
        let mut out = Vec::new();
        for &size in &self.sizes {
            for &target_color in &self.target_colors {
                for &flanker_color in &self.flanker_colors {
                    for &letter in &self.letters {
                        out.push(TargetJob {
                            size,
                            target_color,
                            flanker_color,
                            letter,
                            class: self.class_index.get(&letter).copied().unwrap_or_default(),
                        });
                    }
                }
            }
        }
        out
    }

    /// Images under one target in sweep order: flanker, angle slot, distance, image index.
    pub fn jobs_for(&self, target: &TargetJob) -> Vec<StimulusJob> {
        let mut out = Vec::with_capacity(self.images_per_target());
        for &flanker in &self.flankers {
            for p in 0..self.angles.len() {
                for &distance in &self.distances {
                    for image_index in 0..self.images_per_set {
                        out.push(StimulusJob {
                            target: *target,
                            spec: StimulusSpec {
                                letter: target.letter,
                                flanker,
                                size: target.size,
                                target_color: target.target_color,
                                flanker_color: target.flanker_color,
                                arrangement: self.arrangement(p),
                                radius: distance,
                                degrade: self.degrade_opts(),
                            },
                            angle: self.angles[p],
                            distance,
                            image_index,
                        });
                    }
                }
            }
        }
        out
    }

    pub fn jobs(&self) -> Vec<StimulusJob> {
        self.targets()
            .iter()
            .flat_map(|t| self.jobs_for(t))
            .collect()
    }

    pub fn images_per_target(&self) -> usize {
        self.flankers.len()
            * self.angles.len()
            * self.distances.len()
            * self.images_per_set as usize
    }

    pub fn total_images(&self) -> usize {
        self.sizes.len()
            * self.target_colors.len()
            * self.flanker_colors.len()
            * self.letters.len()
            * self.images_per_target()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sweep/config.rs"]
mod tests;
