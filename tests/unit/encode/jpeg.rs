use super::*;

#[test]
fn encodes_decodable_jpeg() {
    let img = RgbImage::from_pixel(224, 224, image::Rgb([128, 128, 128]));
    let mut buf = Vec::new();
    encode_jpeg(&img, &mut buf, DEFAULT_JPEG_QUALITY).unwrap();
    assert_eq!(&buf[..2], &[0xFF, 0xD8]);

    let back = image::load_from_memory(&buf).unwrap().to_rgb8();
    assert_eq!(back.dimensions(), (224, 224));
    let px = back.get_pixel(100, 100);
    assert!(px.0.iter().all(|&c| c.abs_diff(128) <= 2), "{px:?}");
}

#[test]
fn quality_bounds_are_enforced() {
    let img = RgbImage::new(8, 8);
    assert!(encode_jpeg(&img, Vec::new(), 0).is_err());
    assert!(encode_jpeg(&img, Vec::new(), 101).is_err());
    assert!(encode_jpeg(&img, Vec::new(), 100).is_ok());
}

#[test]
fn save_creates_nested_directories() {
    let dir = Path::new("target").join("jpeg_unit").join("a").join("b");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("out.jpg");

    save_jpeg(&RgbImage::new(16, 16), &path, 90).unwrap();
    assert!(path.is_file());
}

#[test]
fn lower_quality_is_smaller() {
    let img = RgbImage::from_fn(224, 224, |x, y| image::Rgb([(x ^ y) as u8, x as u8, y as u8]));
    let mut hi = Vec::new();
    let mut lo = Vec::new();
    encode_jpeg(&img, &mut hi, 95).unwrap();
    encode_jpeg(&img, &mut lo, 20).unwrap();
    assert!(lo.len() < hi.len());
}

#[test]
fn optimized_tables_are_no_larger_than_baseline() {
    let img = RgbImage::from_fn(224, 224, |x, y| {
        image::Rgb([(x * 3 + y) as u8, (y * 5) as u8, ((x ^ y) & 0xF0) as u8])
    });
    let mut optimized = Vec::new();
    let mut baseline = Vec::new();
    encode_jpeg(&img, &mut optimized, DEFAULT_JPEG_QUALITY).unwrap();
    encode_with(&img, &mut baseline, DEFAULT_JPEG_QUALITY, false).unwrap();
    assert!(
        optimized.len() <= baseline.len(),
        "optimized {} > baseline {}",
        optimized.len(),
        baseline.len()
    );

    let back = image::load_from_memory(&optimized).unwrap().to_rgb8();
    assert_eq!(back.dimensions(), (224, 224));
}

#[test]
fn oversized_canvas_is_rejected() {
    let img = RgbImage::new(70_000, 1);
    let err = encode_jpeg(&img, Vec::new(), DEFAULT_JPEG_QUALITY).unwrap_err();
    assert!(matches!(err, SquishError::InvalidDimensions { width: 70_000, .. }));
}
