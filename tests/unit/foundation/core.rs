use super::*;

#[test]
fn canvas_rejects_zero_and_oversized() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(70_000, 10).is_err());
    let c = Canvas::new(4, 3).unwrap();
    assert_eq!(c.rgba8_len(), 48);
}

#[test]
fn frame_params_camera_translation_negates_position() {
    let f = FrameParams::at(1.5).with_camera(Point::new(10.0, -4.0));
    assert_eq!(f.time_s, 1.5);
    assert_eq!(f.translation, Vec2::new(-10.0, 4.0));
    assert_eq!(FrameParams::default().translation, Vec2::ZERO);
}
