//! Lighting for the renderer.

use crate::math::vec3::Vec3;

/// A point light evaluated once per vertex (Gouraud shading).
///
/// The intensity is an ambient floor plus a Lambert-style term:
/// `max(0, dot(n, normalize(p - light)) * diffuse + ambient)`.
/// The light direction runs from the light towards the surface, so a
/// normal pointing into the surface receives full light. This matches the
/// normal orientation produced by flat-normal synthesis and the default
/// culling rule (see `render::cull`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    /// Weight of the angular term (default: 0.8)
    pub diffuse: f32,
    /// Constant floor added to every vertex (default: 0.2)
    pub ambient: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Vec3::new(10.0, 10.0, 10.0))
    }
}

impl PointLight {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            diffuse: 0.8,
            ambient: 0.2,
        }
    }

    /// Scalar light intensity at a vertex, never negative.
    pub fn intensity(&self, vertex: Vec3, normal: Vec3) -> f32 {
        let to_surface = (vertex - self.position).normalize();
        (normal.normalize().dot(to_surface) * self.diffuse + self.ambient).max(0.0)
    }
}
