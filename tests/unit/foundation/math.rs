use super::*;

#[test]
fn geomspace_pins_endpoints_and_is_geometric() {
    let v = geomspace(1.0, 0.2, 5);
    assert_eq!(v.len(), 5);
    assert_eq!(v[0], 1.0);
    assert_eq!(v[4], 0.2);
    for w in v.windows(3) {
        let r0 = w[1] / w[0];
        let r1 = w[2] / w[1];
        assert!((r0 - r1).abs() < 1e-12);
    }
    assert!((v[2] - 0.2f64.sqrt()).abs() < 1e-12);
}

#[test]
fn geomspace_degenerate_counts() {
    assert!(geomspace(1.0, 0.2, 0).is_empty());
    assert_eq!(geomspace(1.0, 0.2, 1), vec![1.0]);
    assert_eq!(geomspace(1.0, 0.2, 2), vec![1.0, 0.2]);
}

#[test]
fn round_half_even_matches_banker_rounding() {
    assert_eq!(round_half_even(0.5), 0.0);
    assert_eq!(round_half_even(1.5), 2.0);
    assert_eq!(round_half_even(2.5), 2.0);
    assert_eq!(round_half_even(44.8), 45.0);
    assert_eq!(round_half_even(149.7978), 150.0);
}

#[test]
fn lerp_endpoints_are_exact() {
    for dst in [0u8, 50, 128, 255] {
        for src in [0u8, 50, 200, 255] {
            assert_eq!(lerp_u8(dst, src, 0), dst);
            assert_eq!(lerp_u8(dst, src, 255), src);
        }
    }
    assert_eq!(lerp_u8(0, 200, 128), 100);
}
