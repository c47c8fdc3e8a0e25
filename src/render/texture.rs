use crate::foundation::error::{GlowError, GlowResult};
use crate::foundation::math::fract;
use crate::render::device::{AddressMode, Filter, SamplerState};

/// Small premultiplied RGBA8 texture modulating strip colors on the shaded path.
///
/// `u` runs along the strip (`ratio + scroll`), `v` across it.
#[derive(Clone, Debug, PartialEq)]
pub struct StripTexture {
    width: u32,
    height: u32,
    texels: Vec<[u8; 4]>,
}

impl StripTexture {
    /// 1x1 white: shading reduces to plain vertex colors.
    pub fn white() -> Self {
        Self {
            width: 1,
            height: 1,
            texels: vec![[255; 4]],
        }
    }

    /// 1xN cross-strip falloff: full intensity along the center line, fading to 0 at both edges.
    pub fn soft_edge(height: u32) -> Self {
        let height = height.max(3);
        let last = (height - 1) as f64;
        let texels = (0..height)
            .map(|y| {
                let d = (2.0 * y as f64 / last - 1.0).abs();
                let k = ((1.0 - d * d) * 255.0).round().clamp(0.0, 255.0) as u8;
                [k; 4]
            })
            .collect();
        Self {
            width: 1,
            height,
            texels,
        }
    }

    /// Wrap tightly packed premultiplied RGBA8 bytes.
    pub fn from_premul_rgba8(width: u32, height: u32, data: &[u8]) -> GlowResult<Self> {
        if width == 0 || height == 0 {
            return Err(GlowError::validation("strip texture must be at least 1x1"));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| GlowError::validation("strip texture size overflow"))?;
        if data.len() != expected {
            return Err(GlowError::validation(format!(
                "strip texture expects {expected} bytes, got {}",
                data.len()
            )));
        }
        let texels = data
            .chunks_exact(4)
            .map(|c| [c[0], c[1], c[2], c[3]])
            .collect();
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Texture width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample at `(u, v)` and return unit-range channels.
    pub fn sample(&self, u: f64, v: f64, sampler: SamplerState) -> [f32; 4] {
        let x = address(u, sampler.address_u) * self.width as f64;
        let y = address(v, sampler.address_v) * self.height as f64;
        match sampler.filter {
            Filter::Point => {
                let t = self.texel(x.floor() as i64, y.floor() as i64, sampler);
                t.map(|c| f32::from(c) / 255.0)
            }
            Filter::Linear => {
                let fx = x - 0.5;
                let fy = y - 0.5;
                let x0 = fx.floor();
                let y0 = fy.floor();
                let tx = (fx - x0) as f32;
                let ty = (fy - y0) as f32;
                let (x0, y0) = (x0 as i64, y0 as i64);
                let a = self.texel(x0, y0, sampler);
                let b = self.texel(x0 + 1, y0, sampler);
                let c = self.texel(x0, y0 + 1, sampler);
                let d = self.texel(x0 + 1, y0 + 1, sampler);
                let mut out = [0.0f32; 4];
                for i in 0..4 {
                    let top = f32::from(a[i]) + (f32::from(b[i]) - f32::from(a[i])) * tx;
                    let bottom = f32::from(c[i]) + (f32::from(d[i]) - f32::from(c[i])) * tx;
                    out[i] = (top + (bottom - top) * ty) / 255.0;
                }
                out
            }
        }
    }

    fn texel(&self, x: i64, y: i64, sampler: SamplerState) -> [u8; 4] {
        let x = wrap_index(x, self.width, sampler.address_u);
        let y = wrap_index(y, self.height, sampler.address_v);
        self.texels[y * self.width as usize + x]
    }
}

impl Default for StripTexture {
    fn default() -> Self {
        Self::white()
    }
}

fn address(t: f64, mode: AddressMode) -> f64 {
    if !t.is_finite() {
        return 0.0;
    }
    match mode {
        AddressMode::Wrap => fract(t),
        AddressMode::Clamp => t.clamp(0.0, 1.0),
    }
}

fn wrap_index(i: i64, len: u32, mode: AddressMode) -> usize {
    let len = i64::from(len);
    match mode {
        AddressMode::Wrap => i.rem_euclid(len) as usize,
        AddressMode::Clamp => i.clamp(0, len - 1) as usize,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/texture.rs"]
mod tests;
