//! Interpolation math:
//! - component-wise lerp helpers
//! - uniform Catmull-Rom basis with mirrored boundary synthesis
//! - cubic-Bézier basis and fixed-resolution curve sampling in the
//!   (time, value) plane

use crate::animation::Vec3;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
    ]
}

/// Reflect `point` through `center` (linear extrapolation). Used to
/// synthesize the missing outer control points of a spline window at
/// sequence boundaries.
#[inline]
pub fn mirror_vec3(center: Vec3, point: Vec3) -> Vec3 {
    [
        2.0 * center[0] - point[0],
        2.0 * center[1] - point[1],
        2.0 * center[2] - point[2],
    ]
}

/// Uniform-parameter Catmull-Rom basis for one component. The curve passes
/// through `p1` at t=0 and `p2` at t=1 with tangents shaped by `p0`/`p3`.
#[inline]
pub fn catmull_rom_f32(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

#[inline]
pub fn catmull_rom_vec3(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    [
        catmull_rom_f32(p0[0], p1[0], p2[0], p3[0], t),
        catmull_rom_f32(p0[1], p1[1], p2[1], p3[1], t),
        catmull_rom_f32(p0[2], p1[2], p2[2], p3[2], t),
    ]
}

/// Cubic Bezier basis function
#[inline]
pub fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// One component of a cubic Bézier curve in the (time, value) plane,
/// precomputed as a fixed-resolution sample table. Evaluation finds the two
/// samples bracketing the requested time and blends linearly between them, so
/// the per-tick cost is a lookup rather than a numeric inversion.
#[derive(Clone, Debug)]
pub struct BezierChannel {
    samples: Vec<(f32, f32)>,
}

impl BezierChannel {
    /// Subdivide the curve defined by control points `p0..p3` (each a
    /// `(time, value)` pair) into `resolution` segments.
    pub fn sample(
        p0: (f32, f32),
        p1: (f32, f32),
        p2: (f32, f32),
        p3: (f32, f32),
        resolution: usize,
    ) -> Self {
        let n = resolution.max(2);
        let samples = (0..=n)
            .map(|i| {
                let s = i as f32 / n as f32;
                (
                    cubic_bezier(p0.0, p1.0, p2.0, p3.0, s),
                    cubic_bezier(p0.1, p1.1, p2.1, p3.1, s),
                )
            })
            .collect();
        Self { samples }
    }

    /// Value at the given curve time, clamped to the sampled range.
    pub fn value_at(&self, time: f32) -> f32 {
        let first = self.samples[0];
        let last = self.samples[self.samples.len() - 1];
        if time <= first.0 {
            return first.1;
        }
        if time >= last.0 {
            return last.1;
        }
        let idx = self
            .samples
            .partition_point(|&(x, _)| x < time)
            .clamp(1, self.samples.len() - 1);
        let (x0, y0) = self.samples[idx - 1];
        let (x1, y1) = self.samples[idx];
        let span = x1 - x0;
        if span.abs() <= f32::EPSILON {
            y1
        } else {
            lerp_f32(y0, y1, (time - x0) / span)
        }
    }
}
