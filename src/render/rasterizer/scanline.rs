//! Scanline triangle fill with depth testing.
//!
//! # Algorithm Overview
//!
//! 1. **Sort vertices** by screen y, carrying light and UV along with each
//!    swap: `p1.y <= p2.y <= p3.y`.
//! 2. **Pick a side** for the middle vertex `p2`. The long edge `p1 -> p3`
//!    spans every row; the short edges `p1 -> p2` and `p2 -> p3` form the
//!    other side. Comparing inverse slopes tells which side that is.
//! 3. **Walk rows** from `floor(p1.y)` to `floor(p3.y)`. Above `p2.y` the
//!    short side is `p1 -> p2`, from `p2.y` on it is `p2 -> p3`. Each row
//!    becomes a [`ScanlineSpan`] filled left to right over `[x_start, x_end)`.
//!
//! ```text
//!          p1                    p1
//!          /\                    /\
//!         /  \                  /  \
//!        /    \ p2          p2 /    \
//!       /    /                  \    \
//!      /   /                      \   \
//!     /  /                          \  \
//!    / /                              \ \
//!   p3                                  p3
//!
//!   middle on the right     middle on the left
//! ```
//!
//! # Attribute interpolation
//!
//! Depth, light and UV are interpolated linearly in screen space: first down
//! each edge (by the row's vertical fraction), then across the row (by the
//! column's horizontal fraction). There is no perspective correction.
//!
//! # Pixel writes
//!
//! Every pixel goes through [`RenderTarget::write`], which applies the open
//! bounds `0 < x < width`, `0 < y < height` and the strict depth test. Row
//! and column loops are clamped to those bounds first, which only skips
//! pixels that the write would reject anyway.

use super::span::ScanlineSpan;
use super::{RasterVertex, DEPTH_SCALE};
use crate::colors::Color;
use crate::render::target::RenderTarget;
use crate::texture::{Sampler, Texture, Untextured};

/// Scanline rasterizer.
///
/// Stateless; the same instance can fill any number of triangles into any
/// target.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Fill one triangle into `target`.
    ///
    /// Each written pixel gets `color * light * texel`, where `texel` is
    /// white when no texture is bound. Returns the number of pixels that
    /// passed the depth test.
    ///
    /// Triangles with a non-finite screen x or y write nothing. Degenerate
    /// (zero-area) triangles produce empty spans.
    pub fn fill_triangle(
        &self,
        vertices: [RasterVertex; 3],
        color: Color,
        texture: Option<&Texture>,
        target: &mut RenderTarget,
    ) -> usize {
        // Branch on the texture once per triangle, not per pixel.
        match texture {
            Some(texture) => self.fill_with(vertices, color, texture, target),
            None => self.fill_with(vertices, color, &Untextured, target),
        }
    }

    fn fill_with<S: Sampler>(
        &self,
        vertices: [RasterVertex; 3],
        color: Color,
        sampler: &S,
        target: &mut RenderTarget,
    ) -> usize {
        if vertices.iter().any(|v| !v.point.is_finite()) {
            return 0;
        }

        let [p1, p2, p3] = Self::sort_vertices(vertices);
        let middle_is_right = Self::middle_is_right(&p1, &p2, &p3);

        let width = target.width() as i32;
        let height = target.height() as i32;

        let y_first = (p1.point.y.floor() as i32).max(1);
        let y_last = (p3.point.y.floor() as i32).min(height - 1);

        let mut written = 0;
        for y in y_first..=y_last {
            let row = y as f32;
            let upper = row < p2.point.y;

            let span = match (middle_is_right, upper) {
                (true, true) => ScanlineSpan::between(row, (&p1, &p3), (&p1, &p2)),
                (true, false) => ScanlineSpan::between(row, (&p1, &p3), (&p2, &p3)),
                (false, true) => ScanlineSpan::between(row, (&p1, &p2), (&p1, &p3)),
                (false, false) => ScanlineSpan::between(row, (&p2, &p3), (&p1, &p3)),
            };
            if span.is_empty() {
                continue;
            }

            let x_first = span.x_start.max(1);
            let x_last = span.x_end.min(width);
            for x in x_first..x_last {
                let fragment = span.fragment(x);
                let texel = sampler.sample(fragment.u, fragment.v);
                let shaded = color * fragment.light * texel;
                if target.write(x, y, fragment.z / DEPTH_SCALE, shaded) {
                    written += 1;
                }
            }
        }
        written
    }

    /// Sorts vertices by screen y (ascending), attributes travelling with
    /// their vertex. Three compare-and-swaps suffice.
    fn sort_vertices(mut v: [RasterVertex; 3]) -> [RasterVertex; 3] {
        if v[1].point.y < v[0].point.y {
            v.swap(0, 1);
        }
        if v[2].point.y < v[1].point.y {
            v.swap(1, 2);
        }
        if v[1].point.y < v[0].point.y {
            v.swap(0, 1);
        }
        v
    }

    /// Whether `p2` lies to the right of the long edge `p1 -> p3`.
    ///
    /// Compares the inverse slopes of `p1 -> p2` and `p1 -> p3`, each taken as
    /// zero when its edge is horizontal. When `p1 -> p2` itself is horizontal
    /// its slope says nothing about the side, so the x order decides instead.
    fn middle_is_right(p1: &RasterVertex, p2: &RasterVertex, p3: &RasterVertex) -> bool {
        if p2.point.y == p1.point.y {
            return p2.point.x > p1.point.x;
        }
        let inverse_slope = |a: &RasterVertex, b: &RasterVertex| {
            let dy = b.point.y - a.point.y;
            if dy > 0.0 {
                (b.point.x - a.point.x) / dy
            } else {
                0.0
            }
        };
        inverse_slope(p1, p2) > inverse_slope(p1, p3)
    }
}
