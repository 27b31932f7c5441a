//! RGB colors and ARGB8888 packing.
//!
//! Shading math works on [`Color`] (normalized `f32` channels). Buffers store
//! packed `u32` ARGB values so a frame can be handed to the presentation
//! layer as raw bytes.

use std::ops::Mul;

use serde::{Deserialize, Serialize};

/// An RGB color with channels nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self::new(
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0,
        )
    }

    /// Pack into opaque ARGB8888. Channels are clamped to `[0, 1]`.
    pub fn to_argb(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u32;
        0xFF00_0000 | (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Unpack an ARGB8888 value; alpha is ignored.
    pub fn from_argb(argb: u32) -> Self {
        Self::new(
            ((argb >> 16) & 0xFF) as f32 / 255.0,
            ((argb >> 8) & 0xFF) as f32 / 255.0,
            (argb & 0xFF) as f32 / 255.0,
        )
    }
}

/// Scale every channel (light intensity).
impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

/// Channel-wise modulation (texture tinting).
impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        Self::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}
