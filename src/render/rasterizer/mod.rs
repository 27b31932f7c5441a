//! Triangle rasterization.
//!
//! Only one algorithm is provided: a scanline fill that walks the rows of a
//! y-sorted triangle, interpolating depth, light and texture coordinates
//! along the two active edges and then across each row (Gouraud shading,
//! screen-space linear interpolation).
//!
//! - [`ScanlineRasterizer`]: the fill itself
//! - [`ScanlineSpan`]: interpolation endpoints for one row

mod scanline;
mod span;

pub use scanline::ScanlineRasterizer;
pub use span::{Fragment, ScanlineSpan};

use crate::math::vec2::Vec2;
use crate::projection::ScreenPoint;

/// Screen-space depths are divided by this before they reach the depth
/// buffer. Keeps stored values below the clear sentinel for any distance
/// inside the far plane.
pub const DEPTH_SCALE: f32 = 100.0;

/// A projected vertex with the attributes interpolated across a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterVertex {
    pub point: ScreenPoint,
    /// Light intensity computed at the vertex.
    pub light: f32,
    pub uv: Vec2,
}

impl RasterVertex {
    pub const fn new(point: ScreenPoint, light: f32, uv: Vec2) -> Self {
        Self { point, light, uv }
    }

    /// Fully lit, untextured vertex at (x, y) with depth z.
    pub const fn flat(x: f32, y: f32, z: f32) -> Self {
        Self::new(ScreenPoint::new(x, y, z), 1.0, Vec2::ZERO)
    }
}
