use std::path::PathBuf;

use super::*;
use crate::{
    foundation::core::Rgb8,
    glyph::{render::FontSize, testing::BlockGlyphs},
};

fn small_config(name: &str) -> SweepConfig {
    let out_dir = PathBuf::from("target").join("sweep_driver_unit").join(name);
    let _ = std::fs::remove_dir_all(&out_dir);
    SweepConfig {
        sizes: vec![FontSize::Px26],
        target_colors: vec![Rgb8::new(200, 200, 200)],
        flanker_colors: vec![Rgb8::new(50, 50, 50)],
        letters: vec!['A', 'B'],
        flankers: vec!['H'],
        angles: vec![0.0, 180.0],
        distances: vec![30.0],
        steps: 5,
        out_dir,
        ..SweepConfig::default()
    }
}

fn background() -> RgbImage {
    RgbImage::from_pixel(224, 224, image::Rgb([128, 128, 128]))
}

#[test]
fn writes_every_image_and_class_folders() {
    let cfg = small_config("writes");
    let stats = run_sweep(&cfg, &background(), &BlockGlyphs, &SweepOpts::default()).unwrap();
    assert_eq!(
        stats,
        SweepStats {
            targets: 2,
            images_planned: 4,
            images_written: 4,
        }
    );

    for job in cfg.jobs() {
        let path = cfg.out_dir.join(job.relative_path());
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (224, 224));
    }

    let a_dir = cfg.out_dir.join("26/rgb(200, 200, 200)/rgb(50, 50, 50)/A");
    for class in 0..2 {
        assert!(a_dir.join(class.to_string()).is_dir());
    }
    assert!(a_dir.join("2/H_180_30_000.jpg").is_file());
}

#[test]
fn dry_run_writes_nothing() {
    let cfg = small_config("dry_run");
    let opts = SweepOpts {
        dry_run: true,
        ..SweepOpts::default()
    };
    let stats = run_sweep(&cfg, &background(), &BlockGlyphs, &opts).unwrap();
    assert_eq!(stats.images_planned, 4);
    assert_eq!(stats.images_written, 0);
    assert!(!cfg.out_dir.exists());
}

#[test]
fn single_thread_matches_parallel_output() {
    let par = small_config("parallel");
    let seq = small_config("sequential");
    run_sweep(&par, &background(), &BlockGlyphs, &SweepOpts::default()).unwrap();
    let opts = SweepOpts {
        threads: Some(1),
        ..SweepOpts::default()
    };
    run_sweep(&seq, &background(), &BlockGlyphs, &opts).unwrap();

    for job in par.jobs() {
        let a = std::fs::read(par.out_dir.join(job.relative_path())).unwrap();
        let b = std::fs::read(seq.out_dir.join(job.relative_path())).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn zero_threads_rejected() {
    let cfg = small_config("zero_threads");
    let opts = SweepOpts {
        threads: Some(0),
        ..SweepOpts::default()
    };
    let err = run_sweep(&cfg, &background(), &BlockGlyphs, &opts).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn failing_image_aborts_sweep() {
    let mut cfg = small_config("failing");
    cfg.flankers = vec!['h'];
    let err = run_sweep(&cfg, &background(), &BlockGlyphs, &SweepOpts::default()).unwrap_err();
    assert!(matches!(err, SquishError::Font(_)));
}

#[test]
fn invalid_background_rejected() {
    let cfg = small_config("bad_background");
    let err = run_sweep(
        &cfg,
        &RgbImage::new(10, 10),
        &BlockGlyphs,
        &SweepOpts::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SquishError::InvalidDimensions { .. }));
}
