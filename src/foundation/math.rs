use std::f64::consts::PI;

/// `sin(pi * ratio)` with `ratio` clamped to `[0, 1]`.
///
/// Exactly 0 at both ends, exactly 1 at the midpoint.
pub fn bump(ratio: f64) -> f64 {
    let r = ratio.clamp(0.0, 1.0);
    if r == 0.0 || r == 1.0 {
        return 0.0;
    }
    (PI * r).sin()
}

/// Hermite smoothstep of `x` between edges `a` and `b`.
pub fn smoothstep(a: f64, b: f64, x: f64) -> f64 {
    if x <= a {
        return 0.0;
    }
    if x >= b {
        return 1.0;
    }
    let t = (x - a) / (b - a);
    (t * t * (3.0 - 2.0 * t)).clamp(0.0, 1.0)
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Fractional part wrapped into `[0, 1)`, also for negative inputs.
pub fn fract(x: f64) -> f64 {
    let f = x - x.floor();
    if f >= 1.0 { 0.0 } else { f }
}

/// Map a unit float to a byte with rounding and clamping.
pub(crate) fn unit_to_u8(x: f32) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

pub(crate) fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
