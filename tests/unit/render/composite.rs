use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_with_zero_alpha_source_is_a_pure_add() {
    let dst = [10, 20, 30, 255];
    let src = [100, 50, 0, 0];
    assert_eq!(over(dst, src, 1.0), [110, 70, 30, 255]);
    assert_eq!(over(dst, src, 1.0), add(dst, src));
}

#[test]
fn add_saturates() {
    assert_eq!(add([200, 10, 0, 0], [100, 10, 0, 0]), [255, 20, 0, 255]);
}

#[test]
fn blend_pixel_follows_state() {
    let dst = [50, 50, 50, 255];
    let src = [100, 0, 0, 128];
    assert_eq!(blend_pixel(dst, src, BlendState::Additive), [150, 50, 50, 255]);
    assert_eq!(blend_pixel(dst, src, BlendState::Opaque), src);
    assert_eq!(blend_pixel(dst, src, BlendState::AlphaBlend), over(dst, src, 1.0));
}

#[test]
fn add_rgb_raises_alpha_only_to_cover_color() {
    let mut dst = vec![10, 10, 10, 255, 0, 0, 0, 0, 30, 0, 0, 10];
    let src = vec![5, 6, 7, 255, 250, 240, 120, 255, 0, 20, 0, 0];
    add_rgb_in_place(&mut dst, &src).unwrap();
    assert_eq!(
        dst,
        vec![15, 16, 17, 255, 250, 240, 120, 250, 30, 20, 0, 30]
    );
}

#[test]
fn additive_results_are_valid_premultiplied_pixels() {
    for (dst, src) in [
        ([0, 0, 0, 0], [30, 30, 30, 0]),
        ([200, 10, 0, 40], [100, 90, 0, 0]),
        ([5, 5, 5, 255], [9, 9, 9, 0]),
    ] {
        let [r, g, b, a] = add(dst, src);
        assert!(a >= r.max(g).max(b), "{dst:?} + {src:?}");
    }
    assert_eq!(cover_alpha([12, 40, 3, 0]), [12, 40, 3, 40]);
    assert_eq!(cover_alpha([12, 40, 3, 90]), [12, 40, 3, 90]);
}

#[test]
fn in_place_ops_reject_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(add_rgb_in_place(&mut dst, &[0u8; 4]).is_err());
    assert!(over_in_place(&mut dst, &[0u8; 7], 1.0).is_err());
}

#[test]
fn premul_scales_color_by_alpha() {
    assert_eq!(premul_rgba8([255, 128, 0, 128]), [128, 64, 0, 128]);
    assert_eq!(premul_rgba8([9, 9, 9, 255]), [9, 9, 9, 255]);
}
