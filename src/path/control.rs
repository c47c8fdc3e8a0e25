//! Control-point providers: raw position histories, explicit segments and arcs.

use std::collections::VecDeque;

use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{GlowError, GlowResult};

/// One recorded anchor sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// World-space anchor position.
    pub position: Point,
    /// Heading in radians at the time the sample was taken.
    pub heading: f64,
}

/// Bounded ring buffer of raw anchor samples.
///
/// The backing storage is allocated once with capacity `K`; pushing onto a full history evicts the
/// oldest sample instead of growing.
#[derive(Clone, Debug)]
pub struct PointHistory {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl PointHistory {
    /// Create an empty history holding at most `capacity` samples (minimum 2).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of retained samples.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Return `true` when no samples are retained.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent sample, if any.
    pub fn newest(&self) -> Option<Sample> {
        self.samples.back().copied()
    }

    /// Append a sample unless it lies within `min_move` of the newest one.
    ///
    /// Returns `true` when the sample was recorded.
    pub fn push_if_moved(&mut self, sample: Sample, min_move: f64) -> bool {
        if let Some(last) = self.samples.back_mut()
            && last.position.distance(sample.position) <= min_move.max(0.0)
        {
            // Heading still tracks the anchor while idle.
            last.heading = sample.heading;
            return false;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        true
    }

    /// Drop the oldest sample.
    pub fn retire_oldest(&mut self) -> Option<Sample> {
        self.samples.pop_front()
    }

    /// Write positions head-first (newest at ratio 0, oldest at ratio 1) into `out`.
    pub fn positions_into(&self, out: &mut Vec<Point>) {
        out.clear();
        out.extend(self.samples.iter().rev().map(|s| s.position));
    }
}

/// Write `count` evenly spaced points on the segment `start -> end` into `out`.
pub fn segment_points(
    start: Point,
    end: Point,
    count: usize,
    out: &mut Vec<Point>,
) -> GlowResult<()> {
    if count < 2 {
        return Err(GlowError::degenerate(count));
    }
    out.clear();
    let last = (count - 1) as f64;
    out.extend((0..count).map(|i| start.lerp(end, i as f64 / last)));
    Ok(())
}

/// Write `count` points on a circular arc into `out`.
///
/// Angles are in radians, measured from +X towards +Y (screen space, y down).
pub fn arc_points(
    center: Point,
    start_angle: f64,
    end_angle: f64,
    radius: f64,
    count: usize,
    out: &mut Vec<Point>,
) -> GlowResult<()> {
    if count < 2 {
        return Err(GlowError::degenerate(count));
    }
    if !radius.is_finite() || radius < 0.0 {
        return Err(GlowError::validation("arc radius must be finite and >= 0"));
    }
    out.clear();
    let last = (count - 1) as f64;
    out.extend((0..count).map(|i| {
        let a = start_angle + (end_angle - start_angle) * (i as f64 / last);
        center + Vec2::from_angle(a) * radius
    }));
    Ok(())
}

/// Local frame of a resolved control point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlFrame {
    /// Unit tangent along the path direction.
    pub tangent: Vec2,
    /// Unit perpendicular (tangent rotated by +90 degrees).
    pub normal: Vec2,
    /// Normalized position along the path, 0 at the origin end.
    pub ratio: f64,
}

/// Resolve the frame of point `i` of `points`.
///
/// Tangents use a central difference inside the path and one-sided differences at the ends.
/// Zero-length differences fall back to `fallback` (typically the previous point's tangent).
pub fn resolve_frame(points: &[Point], i: usize, fallback: Vec2) -> ControlFrame {
    let n = points.len();
    let ratio = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
    let (a, b) = match n {
        0 | 1 => (Point::ORIGIN, Point::ORIGIN),
        _ if i == 0 => (points[0], points[1]),
        _ if i + 1 >= n => (points[n - 2], points[n - 1]),
        _ => (points[i - 1], points[i + 1]),
    };
    let d = b - a;
    let len = d.hypot();
    let tangent = if len > f64::EPSILON && len.is_finite() {
        d / len
    } else {
        fallback
    };
    ControlFrame {
        tangent,
        normal: Vec2::new(-tangent.y, tangent.x),
        ratio,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/control.rs"]
mod tests;
