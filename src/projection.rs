//! Perspective parameters and the world-to-screen projector.
//!
//! [`Projection`] holds the lens (FOV, aspect, clip distances) and builds the
//! projection matrix. [`Projector`] maps world points through a combined
//! view-projection matrix to [`ScreenPoint`]s for a render target of a given
//! size.

use serde::{Deserialize, Serialize};

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
}

impl Projection {
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near plane distance (must be > 0)
    /// * `z_far` - Far plane distance (must be > z_near)
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Creates a projection from degrees instead of radians.
    pub fn from_degrees(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Updates the aspect ratio (typically called on window resize).
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Generates the right-handed perspective projection matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }
}

/// Row order of the render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum YAxis {
    /// Row 0 is the top of the image; NDC +Y maps to small row numbers.
    #[default]
    Down,
    /// Row 0 is the bottom of the image; NDC +Y maps to large row numbers.
    Up,
}

/// A projected vertex.
///
/// `z` is the Euclidean distance from the eye to the original world point,
/// not the clip-space depth. It is only used as an ordering key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl ScreenPoint {
    /// Returned for points that cannot be projected (`w == 0`).
    pub const HIDDEN: Self = Self {
        x: f32::NAN,
        y: f32::NAN,
        z: f32::NAN,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// True when the screen position can be rasterized.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Maps world-space points onto a `width` x `height` pixel grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    width: u32,
    height: u32,
    y_axis: YAxis,
}

impl Projector {
    pub fn new(width: u32, height: u32, y_axis: YAxis) -> Self {
        Self {
            width,
            height,
            y_axis,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn y_axis(&self) -> YAxis {
        self.y_axis
    }

    /// Project `world` through `view_projection`.
    ///
    /// NDC `[-1, 1]` maps to `[0, width]` x `[0, height]`. When the clip-space
    /// `w` is exactly zero the result is [`ScreenPoint::HIDDEN`]; other
    /// degenerate inputs may yield non-finite coordinates, which callers
    /// must check with [`ScreenPoint::is_finite`].
    pub fn project(&self, world: Vec3, view_projection: &Mat4, eye: Vec3) -> ScreenPoint {
        let Some(ndc) = (*view_projection * Vec4::point(world)).perspective_divide() else {
            return ScreenPoint::HIDDEN;
        };

        let x = (ndc.x * 0.5 + 0.5) * self.width as f32;
        let y = match self.y_axis {
            YAxis::Down => (0.5 - ndc.y * 0.5) * self.height as f32,
            YAxis::Up => (ndc.y * 0.5 + 0.5) * self.height as f32,
        };
        ScreenPoint::new(x, y, world.distance(eye))
    }
}
