//! Per-row interpolation state.

use super::RasterVertex;
use crate::math::lerp;

/// Fraction of the way down edge `a -> b` at row `y`, clamped to `[0, 1]`.
/// A horizontal edge yields 1.
#[inline]
pub(crate) fn edge_gradient(y: f32, a: &RasterVertex, b: &RasterVertex) -> f32 {
    if a.point.y == b.point.y {
        1.0
    } else {
        ((y - a.point.y) / (b.point.y - a.point.y)).clamp(0.0, 1.0)
    }
}

/// Left and right endpoint values of one scanline through a triangle.
///
/// Built fresh for each row from the two edges active at that row; nothing
/// here outlives the row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanlineSpan {
    pub x_start: i32,
    pub x_end: i32,
    pub z_start: f32,
    pub z_end: f32,
    pub light_start: f32,
    pub light_end: f32,
    pub u_start: f32,
    pub u_end: f32,
    pub v_start: f32,
    pub v_end: f32,
}

/// Interpolated values at one pixel of a span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub z: f32,
    /// Never negative.
    pub light: f32,
    pub u: f32,
    pub v: f32,
}

impl ScanlineSpan {
    /// Span at row `y` between the left edge `(la, lb)` and right edge `(ra, rb)`.
    ///
    /// Endpoint x values are floored to whole pixels.
    pub fn between(
        y: f32,
        (la, lb): (&RasterVertex, &RasterVertex),
        (ra, rb): (&RasterVertex, &RasterVertex),
    ) -> Self {
        let g1 = edge_gradient(y, la, lb);
        let g2 = edge_gradient(y, ra, rb);

        Self {
            x_start: lerp(la.point.x, lb.point.x, g1).floor() as i32,
            x_end: lerp(ra.point.x, rb.point.x, g2).floor() as i32,
            z_start: lerp(la.point.z, lb.point.z, g1),
            z_end: lerp(ra.point.z, rb.point.z, g2),
            light_start: lerp(la.light, lb.light, g1),
            light_end: lerp(ra.light, rb.light, g2),
            u_start: lerp(la.uv.x, lb.uv.x, g1),
            u_end: lerp(ra.uv.x, rb.uv.x, g2),
            v_start: lerp(la.uv.y, lb.uv.y, g1),
            v_end: lerp(ra.uv.y, rb.uv.y, g2),
        }
    }

    /// Pixels in `[x_start, x_end)`; zero or negative widths are empty.
    pub fn is_empty(&self) -> bool {
        self.x_end <= self.x_start
    }

    /// Values at column `x`, with `t = (x - x_start) / (x_end - x_start)`.
    ///
    /// Only meaningful for non-empty spans.
    #[inline]
    pub fn fragment(&self, x: i32) -> Fragment {
        let t = (x as f32 - self.x_start as f32) / (self.x_end as f32 - self.x_start as f32);
        Fragment {
            z: lerp(self.z_start, self.z_end, t),
            light: lerp(self.light_start, self.light_end, t).max(0.0),
            u: lerp(self.u_start, self.u_end, t),
            v: lerp(self.v_start, self.v_end, t),
        }
    }
}
