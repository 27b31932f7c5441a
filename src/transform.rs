//! Mesh placement in the world.
//!
//! A [`Transform`] poses a mesh with a translation, Euler rotation (radians,
//! applied X then Y then Z in the matrix product) and per-axis scale. The
//! mesh keeps its model-space faces; [`crate::mesh::Mesh::world_faces`] runs
//! them through [`Transform::to_matrix`] and [`Transform::normal_matrix`]
//! every frame.

use crate::math::{mat4::Mat4, vec3::Vec3};

/// Object-to-world pose.
///
/// ```ignore
/// let pose = Transform::from_translation(Vec3::new(0.0, 0.0, -5.0))
///     .with_rotation(Vec3::new(0.0, 0.5, 0.0))
///     .with_uniform_scale(2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(self, s: f32) -> Self {
        self.with_scale(Vec3::splat(s))
    }

    /// Add `delta` radians to each Euler angle.
    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation += delta;
    }

    fn rotation_matrix(&self) -> Mat4 {
        Mat4::rotation_x(self.rotation.x)
            * Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_z(self.rotation.z)
    }

    /// `T * Rx * Ry * Rz * S`: scale first, translation last.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.translation) * self.rotation_matrix() * Mat4::scaling(self.scale)
    }

    /// Inverse transpose of the linear part, `R * S^-1` since `R` is
    /// orthonormal. Keeps normals perpendicular to their surface under
    /// non-uniform scale; translation has no effect on directions.
    pub fn normal_matrix(&self) -> Mat4 {
        let inv_scale = Vec3::new(1.0 / self.scale.x, 1.0 / self.scale.y, 1.0 / self.scale.z);
        self.rotation_matrix() * Mat4::scaling(inv_scale)
    }
}
