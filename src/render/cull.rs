//! Backface culling and per-vertex shading setup.
//!
//! Each world-space face is reduced to a [`LitFace`]: positions, one light
//! intensity per vertex, and resolved texture coordinates. Absent normals and
//! UVs are filled in here, once per face, so the rasterizer never branches on
//! optional attributes.
//!
//! # Sign convention
//!
//! The face normal is the normalized mean of the vertex normals and the test
//! value is `dot(normal, centroid - eye)`. Under [`CullMode::KeepAwayFacing`]
//! a face is rejected when that value is negative, i.e. the normal points back
//! at the eye. This pairs with flat normals synthesized as
//! `cross(v1 - v0, v0 - v2)`, which point into a surface whose faces are wound
//! counter-clockwise from outside. Geometry with outward normals should use
//! [`CullMode::KeepEyeFacing`] or have its normals inverted on load.

use serde::{Deserialize, Serialize};

use crate::light::PointLight;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::mesh::Face;

/// Which faces survive culling, by the sign of `dot(normal, centroid - eye)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CullMode {
    /// Reject when the dot product is negative. Zero passes.
    #[default]
    KeepAwayFacing,
    /// Reject when the dot product is positive. Zero passes.
    KeepEyeFacing,
    /// Never reject.
    Off,
}

impl CullMode {
    /// Whether a face with the given facing value is discarded.
    ///
    /// NaN facing values (degenerate faces) are never rejected here; they
    /// draw nothing later because their screen coordinates are not usable.
    #[inline]
    pub fn rejects(self, facing: f32) -> bool {
        match self {
            CullMode::KeepAwayFacing => facing < 0.0,
            CullMode::KeepEyeFacing => facing > 0.0,
            CullMode::Off => false,
        }
    }

    pub fn next(self) -> Self {
        match self {
            CullMode::KeepAwayFacing => CullMode::KeepEyeFacing,
            CullMode::KeepEyeFacing => CullMode::Off,
            CullMode::Off => CullMode::KeepAwayFacing,
        }
    }
}

/// A face that survived culling, ready for projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LitFace {
    pub positions: [Vec3; 3],
    /// Light intensity per vertex, each `>= 0`.
    pub lights: [f32; 3],
    pub uvs: [Vec2; 3],
}

/// `dot(normal, centroid - eye)` for a face whose normals are all known.
pub fn facing(normals: &[Vec3; 3], centroid: Vec3, eye: Vec3) -> f32 {
    let mean = (normals[0] + normals[1] + normals[2]) / 3.0;
    mean.normalize().dot(centroid - eye)
}

/// Cull `face` and compute its per-vertex light intensities.
///
/// Returns `None` when the face is rejected by `mode`.
pub fn prepare_face(
    face: &Face,
    light: &PointLight,
    eye: Vec3,
    mode: CullMode,
) -> Option<LitFace> {
    let positions = face.positions();

    let normals = if face.vertices.iter().all(|v| v.normal.is_some()) {
        face.vertices.map(|v| v.normal.unwrap_or(Vec3::ZERO))
    } else {
        let flat = face.flat_normal();
        face.vertices.map(|v| v.normal.unwrap_or(flat))
    };

    if mode.rejects(facing(&normals, face.centroid(), eye)) {
        return None;
    }

    let lights = [0, 1, 2].map(|i| light.intensity(positions[i], normals[i]));
    let uvs = face.vertices.map(|v| v.uv.unwrap_or(Vec2::ZERO));

    Some(LitFace {
        positions,
        lights,
        uvs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{Mesh, Vertex};
    use approx::assert_relative_eq;

    fn face_with_normal(normal: Vec3) -> Face {
        Face::new(
            Vertex::new(Vec3::new(-1.0, 0.0, 0.0)).with_normal(normal),
            Vertex::new(Vec3::new(1.0, 0.0, 0.0)).with_normal(normal),
            Vertex::new(Vec3::new(0.0, 1.0, 0.0)).with_normal(normal),
        )
    }

    #[test]
    fn zero_facing_value_is_not_culled() {
        // Eye lies in the face's plane, so the normal is perpendicular to the view ray.
        let face = face_with_normal(Vec3::Z);
        let eye = Vec3::new(10.0, 1.0 / 3.0, 0.0);
        assert_eq!(facing(&[Vec3::Z; 3], face.centroid(), eye), 0.0);
        assert!(prepare_face(&face, &PointLight::default(), eye, CullMode::KeepAwayFacing).is_some());
        assert!(prepare_face(&face, &PointLight::default(), eye, CullMode::KeepEyeFacing).is_some());
    }

    #[test]
    fn modes_mirror_each_other() {
        let eye = Vec3::new(0.0, 0.0, 10.0);
        let light = PointLight::default();
        let toward_eye = face_with_normal(Vec3::Z);
        let away_from_eye = face_with_normal(-Vec3::Z);

        assert!(prepare_face(&toward_eye, &light, eye, CullMode::KeepAwayFacing).is_none());
        assert!(prepare_face(&away_from_eye, &light, eye, CullMode::KeepAwayFacing).is_some());
        assert!(prepare_face(&toward_eye, &light, eye, CullMode::KeepEyeFacing).is_some());
        assert!(prepare_face(&away_from_eye, &light, eye, CullMode::KeepEyeFacing).is_none());
        assert!(prepare_face(&toward_eye, &light, eye, CullMode::Off).is_some());
    }

    #[test]
    fn cube_shows_only_front_face_from_positive_z() {
        let eye = Vec3::new(0.0, 0.0, 10.0);
        let light = PointLight::new(eye);
        let kept: Vec<LitFace> = Mesh::cube()
            .faces()
            .iter()
            .filter_map(|f| prepare_face(f, &light, eye, CullMode::KeepAwayFacing))
            .collect();

        // Only the front pair faces the eye; sides are seen from behind their
        // planes and the back pair is rejected.
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|f| f.positions.iter().all(|p| p.z == 1.0)));
    }

    #[test]
    fn missing_attributes_are_filled_once() {
        let face = Face::new(
            Vertex::new(Vec3::new(-1.0, -1.0, 0.0)),
            Vertex::new(Vec3::new(1.0, -1.0, 0.0)),
            Vertex::new(Vec3::new(0.0, 1.0, 0.0)).with_uv(Vec2::ONE),
        );
        // Counter-clockwise seen from +Z, so the synthesized normal is -Z and
        // a distant light on +Z shines straight along it.
        let light = PointLight::new(Vec3::new(0.0, 0.0, 1000.0));
        let lit = prepare_face(&face, &light, Vec3::new(0.0, 0.0, 10.0), CullMode::KeepAwayFacing)
            .unwrap();

        assert_eq!(lit.uvs, [Vec2::ZERO, Vec2::ZERO, Vec2::ONE]);
        for l in lit.lights {
            assert_relative_eq!(l, 1.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn light_is_never_negative() {
        let face = face_with_normal(-Vec3::Z);
        let light = PointLight::new(Vec3::new(0.0, 0.0, -100.0));
        let lit = prepare_face(&face, &light, Vec3::new(0.0, 0.0, 10.0), CullMode::Off).unwrap();
        assert!(lit.lights.iter().all(|&l| l == 0.0));
    }
}
