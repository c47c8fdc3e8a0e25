use super::*;
use serde_json::json;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: ColorF = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, ColorF::rgba(1.0, 0.0, 0.0, 1.0));

    let c: ColorF = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert!(close(c.b, 1.0));
    assert!(close(c.a, 128.0 / 255.0));

    assert!(serde_json::from_value::<ColorF>(json!("#12345")).is_err());
}

#[test]
fn parses_rgba_object_array_and_hsla() {
    let c: ColorF = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, ColorF::rgba(0.25, 0.5, 0.75, 1.0));

    let c: ColorF = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, ColorF::rgba(0.25, 0.5, 0.75, 0.9));

    let c: ColorF = serde_json::from_value(json!({"h": 0.0, "s": 1.0, "l": 0.5})).unwrap();
    assert!(close(c.r, 1.0) && close(c.g, 0.0) && close(c.b, 0.0));
}

#[test]
fn hsv_primaries() {
    let red = ColorF::from_hsv(0.0, 1.0, 1.0, 1.0);
    assert!(close(red.r, 1.0) && close(red.g, 0.0) && close(red.b, 0.0));
    let green = ColorF::from_hsv(1.0 / 3.0, 1.0, 1.0, 1.0);
    assert!(close(green.g, 1.0) && close(green.r, 0.0));
    let wrapped = ColorF::from_hsv(1.0, 1.0, 1.0, 1.0);
    assert_eq!(wrapped, red);
}

#[test]
fn additive_transform_zeroes_alpha_and_premultiplies() {
    let c = ColorF::rgba(1.0, 0.5, 0.25, 0.5).to_additive(0.5);
    assert_eq!(c.a, 0.0);
    assert!(close(c.r, 0.25));
    assert!(close(c.g, 0.125));
    assert!(close(c.b, 0.0625));

    let negative = ColorF::rgba(-1.0, 1.0, 1.0, 1.0).to_additive(-2.0);
    assert_eq!(negative, ColorF::rgba(0.0, 0.0, 0.0, 0.0));
}
