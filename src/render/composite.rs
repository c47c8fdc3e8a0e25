use crate::foundation::error::{GlowError, GlowResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u8};
use crate::render::device::BlendState;

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over with an extra opacity factor.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Saturating per-channel sum. Alpha is raised to cover the summed color.
pub fn add(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    cover_alpha([
        add_sat_u8(dst[0], src[0]),
        add_sat_u8(dst[1], src[1]),
        add_sat_u8(dst[2], src[2]),
        add_sat_u8(dst[3], src[3]),
    ])
}

/// Raise alpha to at least the largest color channel so the pixel stays valid premultiplied data.
pub fn cover_alpha(px: PremulRgba8) -> PremulRgba8 {
    let [r, g, b, a] = px;
    [r, g, b, a.max(r).max(g).max(b)]
}

/// Combine one source pixel into `dst` according to `blend`.
pub fn blend_pixel(dst: PremulRgba8, src: PremulRgba8, blend: BlendState) -> PremulRgba8 {
    match blend {
        BlendState::Additive => add(dst, src),
        BlendState::AlphaBlend => over(dst, src, 1.0),
        BlendState::Opaque => src,
    }
}

/// Add the color channels of `src` into `dst`, ignoring source alpha.
///
/// Destination alpha only grows as far as the summed color needs.
pub fn add_rgb_in_place(dst: &mut [u8], src: &[u8]) -> GlowResult<()> {
    check_lengths(dst, src, "add_rgb_in_place")?;
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sum = [
            add_sat_u8(d[0], s[0]),
            add_sat_u8(d[1], s[1]),
            add_sat_u8(d[2], s[2]),
            d[3],
        ];
        d.copy_from_slice(&cover_alpha(sum));
    }
    Ok(())
}

/// Premultiplied source-over of whole buffers.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> GlowResult<()> {
    check_lengths(dst, src, "over_in_place")?;
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Premultiply a straight RGBA8 color.
pub fn premul_rgba8(rgba: [u8; 4]) -> PremulRgba8 {
    let [r, g, b, a] = rgba;
    let a16 = u16::from(a);
    [
        mul_div255_u8(u16::from(r), a16),
        mul_div255_u8(u16::from(g), a16),
        mul_div255_u8(u16::from(b), a16),
        a,
    ]
}

fn check_lengths(dst: &[u8], src: &[u8], what: &str) -> GlowResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(GlowError::validation(format!(
            "{what} expects equal-length rgba8 buffers"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
