use super::*;

#[test]
fn bump_is_zero_at_ends_and_one_at_midpoint() {
    assert_eq!(bump(0.0), 0.0);
    assert_eq!(bump(1.0), 0.0);
    assert!((bump(0.5) - 1.0).abs() < 1e-12);
    assert_eq!(bump(-3.0), 0.0);
    assert_eq!(bump(7.0), 0.0);
}

#[test]
fn smoothstep_clamps_outside_edges() {
    assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
    assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
    assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-12);
}

#[test]
fn fract_wraps_negative_values() {
    assert!((fract(1.25) - 0.25).abs() < 1e-12);
    assert!((fract(-0.25) - 0.75).abs() < 1e-12);
    assert_eq!(fract(3.0), 0.0);
}

#[test]
fn byte_helpers_round_and_saturate() {
    assert_eq!(unit_to_u8(1.5), 255);
    assert_eq!(unit_to_u8(-1.0), 0);
    assert_eq!(unit_to_u8(0.5), 128);
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 0), 0);
    assert_eq!(add_sat_u8(200, 100), 255);
}
