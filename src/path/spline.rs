use crate::foundation::core::Point;
use crate::foundation::error::{GlowError, GlowResult};

/// Catmull-Rom resampler.
///
/// The curve is parameterized uniformly over input-index space: output point `j` of `M` sits at
/// parameter `j * (n - 1) / (M - 1)`, so every input point is hit exactly when the parameter lands
/// on an integer. Spacing along the curve follows input spacing, not arc length.
#[derive(Clone, Copy, Debug, Default)]
pub struct SplineSmoother;

impl SplineSmoother {
    /// Resample `points` to exactly `count` points written into `out` (cleared first).
    ///
    /// Ends are clamped by duplicating the endpoint as the missing neighbour. Two input points
    /// reduce to linear interpolation.
    pub fn resample_into(
        &self,
        points: &[Point],
        count: usize,
        out: &mut Vec<Point>,
    ) -> GlowResult<()> {
        let n = points.len();
        if n < 2 {
            return Err(GlowError::degenerate(n));
        }
        out.clear();
        match count {
            0 => return Ok(()),
            1 => {
                out.push(points[0]);
                return Ok(());
            }
            _ => {}
        }

        let span = (n - 1) as f64;
        let last = (count - 1) as f64;
        if n == 2 {
            out.extend((0..count).map(|j| points[0].lerp(points[1], j as f64 / last)));
            return Ok(());
        }

        for j in 0..count {
            let t = span * (j as f64 / last);
            let seg = (t.floor() as usize).min(n - 2);
            let u = t - seg as f64;
            let p0 = points[seg.saturating_sub(1)];
            let p1 = points[seg];
            let p2 = points[seg + 1];
            let p3 = points[(seg + 2).min(n - 1)];
            out.push(catmull_rom(p0, p1, p2, p3, u));
        }
        Ok(())
    }

    /// Allocating convenience wrapper around [`SplineSmoother::resample_into`].
    pub fn resample(&self, points: &[Point], count: usize) -> GlowResult<Vec<Point>> {
        let mut out = Vec::with_capacity(count);
        self.resample_into(points, count, &mut out)?;
        Ok(out)
    }
}

fn catmull_rom(p0: Point, p1: Point, p2: Point, p3: Point, u: f64) -> Point {
    let u2 = u * u;
    let u3 = u2 * u;
    let axis = |a: f64, b: f64, c: f64, d: f64| {
        0.5 * ((2.0 * b)
            + (-a + c) * u
            + (2.0 * a - 5.0 * b + 4.0 * c - d) * u2
            + (-a + 3.0 * b - 3.0 * c + d) * u3)
    };
    Point::new(
        axis(p0.x, p1.x, p2.x, p3.x),
        axis(p0.y, p1.y, p2.y, p3.y),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/path/spline.rs"]
mod tests;
