use super::*;
use crate::glyph::testing::BlockGlyphs;

const GREY: Rgb8 = Rgb8::new(128, 128, 128);
const LIGHT: Rgb8 = Rgb8::new(200, 200, 200);
const DARK: Rgb8 = Rgb8::new(50, 50, 50);

fn background() -> RgbImage {
    RgbImage::from_pixel(224, 224, GREY.to_pixel())
}

fn spec(arrangement: Arrangement, steps: usize) -> StimulusSpec {
    StimulusSpec {
        letter: 'A',
        flanker: 'A',
        size: FontSize::Px26,
        target_color: LIGHT,
        flanker_color: DARK,
        arrangement,
        radius: 30.0,
        degrade: DegradeOpts {
            steps,
            filter: ResampleFilter::Nearest,
        },
    }
}

#[test]
fn arrangement_accepts_one_or_two_angles() {
    assert_eq!(
        Arrangement::from_angles(&[18.0]).unwrap(),
        Arrangement::Single(18.0)
    );
    assert_eq!(Arrangement::from_angles(&[18.0, 198.0]).unwrap().count(), 2);
    for bad in [&[][..], &[1.0, 2.0, 3.0][..]] {
        let err = Arrangement::from_angles(bad).unwrap_err();
        assert!(err.is_configuration());
    }
}

#[test]
fn target_lands_on_anchor() {
    let glyph = spec(Arrangement::Single(0.0), 1).target_glyph();
    let target = TargetCanvas::new(&background(), &BlockGlyphs, &glyph).unwrap();
    // anchor (168, 112) - correction (9, 14) + block offset (1, 4)
    assert_eq!(*target.image().get_pixel(160, 102), LIGHT.to_pixel());
    assert_eq!(*target.image().get_pixel(159, 102), GREY.to_pixel());
}

#[test]
fn flankers_do_not_disturb_shared_target() {
    let s = spec(Arrangement::Single(0.0), 1);
    let target = TargetCanvas::new(&background(), &BlockGlyphs, &s.target_glyph()).unwrap();
    let before = target.image().clone();

    let right = target
        .with_flankers(&BlockGlyphs, &s.flanker_glyph(), Arrangement::Single(0.0), 30.0)
        .unwrap();
    let left = target
        .with_flankers(&BlockGlyphs, &s.flanker_glyph(), Arrangement::Single(180.0), 30.0)
        .unwrap();

    assert_eq!(target.image(), &before);
    // flanker at (198, 112) -> mask top-left (190, 102)
    assert_eq!(*right.get_pixel(190, 102), DARK.to_pixel());
    assert_eq!(*left.get_pixel(190, 102), GREY.to_pixel());
    // flanker at (138, 112) -> mask top-left (130, 102)
    assert_eq!(*left.get_pixel(130, 102), DARK.to_pixel());
}

#[test]
fn pair_draws_both_sides() {
    let s = spec(Arrangement::Pair(0.0, 180.0), 1);
    let flat = compose_flat(&background(), &BlockGlyphs, &s).unwrap();
    assert_eq!(*flat.get_pixel(190, 102), DARK.to_pixel());
    assert_eq!(*flat.get_pixel(130, 102), DARK.to_pixel());
    assert_eq!(*flat.get_pixel(160, 102), LIGHT.to_pixel());
}

#[test]
fn invalid_radius_is_configuration_error() {
    let mut s = spec(Arrangement::Single(0.0), 1);
    s.radius = -3.0;
    let err = compose_flat(&background(), &BlockGlyphs, &s).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn wrong_background_size_is_rejected() {
    let bg = RgbImage::new(223, 224);
    let err = render_stimulus(&bg, &BlockGlyphs, &spec(Arrangement::Single(0.0), 5)).unwrap_err();
    assert!(matches!(err, SquishError::InvalidDimensions { .. }));
}

#[test]
fn single_step_render_equals_flat_composition() {
    let s = spec(Arrangement::Single(90.0), 1);
    assert_eq!(
        render_stimulus(&background(), &BlockGlyphs, &s).unwrap(),
        compose_flat(&background(), &BlockGlyphs, &s).unwrap()
    );
}

#[test]
fn degraded_render_keeps_size_and_target_color() {
    let s = spec(Arrangement::Single(0.0), 5);
    let out = render_stimulus(&background(), &BlockGlyphs, &s).unwrap();
    assert_eq!(out.dimensions(), (224, 224));

    let target_px = (160..176)
        .flat_map(|x| (102..120).map(move |y| (x, y)))
        .filter(|&(x, y)| *out.get_pixel(x, y) == LIGHT.to_pixel())
        .count();
    assert!(target_px > 0);
    assert_ne!(out, compose_flat(&background(), &BlockGlyphs, &s).unwrap());
}
