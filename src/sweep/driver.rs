use std::{
    path::Path,
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

use anyhow::Context as _;
use image::RgbImage;
use rayon::prelude::*;

use crate::{
    degrade::composite::degrade,
    encode::jpeg::save_jpeg,
    foundation::error::{SquishError, SquishResult},
    glyph::font::GlyphSource,
    stimulus::pipeline::TargetCanvas,
    sweep::config::{SweepConfig, TargetJob},
};

#[derive(Clone, Debug, Default)]
pub struct SweepOpts {
    /// Override rayon worker threads.
    pub threads: Option<usize>,
    /// Enumerate and count only; nothing is drawn or written.
    pub dry_run: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub targets: u64,
    pub images_planned: u64,
    pub images_written: u64,
}

/// Render every image described by `cfg` below `cfg.out_dir`.
///
/// Targets are processed in parallel; each target is drawn once and shared across its flanker
/// arrangements. The first failing image aborts the sweep.
pub fn run_sweep(
    cfg: &SweepConfig,
    background: &RgbImage,
    glyphs: &dyn GlyphSource,
    opts: &SweepOpts,
) -> SquishResult<SweepStats> {
    cfg.validate()?;
    let out_dir = cfg.out_dir.as_path();

    let targets = cfg.targets();
    let mut stats = SweepStats {
        targets: targets.len() as u64,
        images_planned: cfg.total_images() as u64,
        images_written: 0,
    };
    if opts.dry_run {
        tracing::info!(
            targets = stats.targets,
            images = stats.images_planned,
            "dry run"
        );
        return Ok(stats);
    }

    tracing::info!(
        targets = stats.targets,
        images = stats.images_planned,
        out = %out_dir.display(),
        "starting sweep"
    );
    let started = Instant::now();
    let written = AtomicU64::new(0);
    let pool = build_thread_pool(opts.threads)?;

    pool.install(|| {
        targets.par_iter().try_for_each(|target| {
            let n = render_target(cfg, out_dir, background, glyphs, target)?;
            written.fetch_add(n, Ordering::Relaxed);
            Ok::<(), SquishError>(())
        })
    })?;

    stats.images_written = written.into_inner();
    tracing::info!(
        images = stats.images_written,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "sweep finished"
    );
    Ok(stats)
}

fn render_target(
    cfg: &SweepConfig,
    out_dir: &Path,
    background: &RgbImage,
    glyphs: &dyn GlyphSource,
    target: &TargetJob,
) -> SquishResult<u64> {
    let target_dir = out_dir.join(target.dir());
    for class in 0..cfg.letters.len() {
        let dir = target_dir.join(class.to_string());
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create class directory '{}'", dir.display()))?;
    }

    let canvas = TargetCanvas::new(background, glyphs, &target.glyph())?;
    let jobs = cfg.jobs_for(target);

    for job in &jobs {
        let flat = canvas.with_flankers(
            glyphs,
            &job.spec.flanker_glyph(),
            job.spec.arrangement,
            job.spec.radius,
        )?;
        let img = degrade(&flat, &job.spec.degrade)?;
        let path = out_dir.join(job.relative_path());
        save_jpeg(&img, &path, cfg.jpeg_quality)?;
        tracing::debug!(path = %path.display(), "wrote stimulus");
    }
    Ok(jobs.len() as u64)
}

fn build_thread_pool(threads: Option<usize>) -> SquishResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SquishError::configuration(
            "sweep 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SquishError::configuration(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/sweep/driver.rs"]
mod tests;
