use super::*;

#[test]
fn rgb_parses_function_and_hex_forms() {
    assert_eq!(
        "rgb(200, 200, 200)".parse::<Rgb8>().unwrap(),
        Rgb8::new(200, 200, 200)
    );
    assert_eq!("rgb(50,50,50)".parse::<Rgb8>().unwrap(), Rgb8::new(50, 50, 50));
    assert_eq!("#ff3366".parse::<Rgb8>().unwrap(), Rgb8::new(255, 51, 102));
}

#[test]
fn rgb_rejects_malformed_specs() {
    for bad in ["rgb(1, 2)", "rgb(1, 2, 300)", "rgb 1 2 3", "#ff33", "#gg0000", ""] {
        let err = bad.parse::<Rgb8>().unwrap_err();
        assert!(err.is_configuration(), "{bad}: {err}");
    }
}

#[test]
fn rgb_display_matches_path_naming() {
    assert_eq!(Rgb8::new(200, 200, 200).to_string(), "rgb(200, 200, 200)");
}

#[test]
fn rgb_serde_accepts_string_and_array() {
    let c: Rgb8 = serde_json::from_str(r#""rgb(1, 2, 3)""#).unwrap();
    assert_eq!(c, Rgb8::new(1, 2, 3));
    let c: Rgb8 = serde_json::from_str("[4, 5, 6]").unwrap();
    assert_eq!(c, Rgb8::new(4, 5, 6));
    assert!(serde_json::from_str::<Rgb8>(r#""nope""#).is_err());
    assert_eq!(
        serde_json::to_string(&Rgb8::new(7, 8, 9)).unwrap(),
        r#""rgb(7, 8, 9)""#
    );
}

#[test]
fn canvas_size_requires_square() {
    assert!(CanvasSize::STIMULUS.require_square(STIMULUS_DIM).is_ok());
    let err = CanvasSize::new(224, 200).require_square(224).unwrap_err();
    assert!(matches!(
        err,
        SquishError::InvalidDimensions {
            expected: 224,
            width: 224,
            height: 200
        }
    ));
}

#[test]
fn pixel_point_offset_subtracts() {
    assert_eq!(PixelPoint::new(168, 112).offset_by(9, 14), PixelPoint::new(159, 98));
}
