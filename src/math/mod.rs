//! Small linear algebra types used by the pipeline.
//!
//! All types are `f32` and `Copy`. Matrices follow the column-vector
//! convention (`Mat4 * v`), see [`mat4`].

pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;

/// Linear interpolation between two scalars. `t` is not clamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
