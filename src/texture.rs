//! Textures and texel sampling.
//!
//! A [`Texture`] is a read-only grid of RGB samples. The rasterizer reads it
//! through the [`Sampler`] trait, so the "no texture bound" case is the
//! [`Untextured`] sampler rather than a per-pixel `Option` check.

use std::fmt;
use std::path::Path;

use crate::colors::Color;

#[derive(Debug)]
pub enum TextureError {
    Image(image::ImageError),
    /// Width or height is zero.
    Empty,
    /// Raw pixel data does not match `width * height`.
    SizeMismatch { expected: usize, actual: usize },
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::Image(e)
    }
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Image(e) => write!(f, "image error: {}", e),
            TextureError::Empty => write!(f, "texture has a zero dimension"),
            TextureError::SizeMismatch { expected, actual } => write!(
                f,
                "texture data has {} texels, expected {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Image(e) => Some(e),
            _ => None,
        }
    }
}

/// Anything that maps texture coordinates to a color in `[0, 1]`.
pub trait Sampler {
    fn sample(&self, u: f32, v: f32) -> Color;
}

/// Neutral sampler used when no texture is bound: always white.
#[derive(Clone, Copy, Debug, Default)]
pub struct Untextured;

impl Sampler for Untextured {
    #[inline]
    fn sample(&self, _u: f32, _v: f32) -> Color {
        Color::WHITE
    }
}

/// Represents a 2D texture for texture mapping.
#[derive(Clone, Debug)]
pub struct Texture {
    data: Vec<u32>, // ARGB, row 0 is the top of the image
    width: u32,
    height: u32,
}

impl Texture {
    /// Build a texture from packed ARGB texels in row-major, top-left order.
    pub fn from_argb(width: u32, height: u32, data: Vec<u32>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Build a texture by evaluating `f(x, y)` for every texel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self, TextureError>
    where
        F: FnMut(u32, u32) -> Color,
    {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y).to_argb())
            .collect();
        Self::from_argb(width, height, data)
    }

    /// Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img = image::open(path.as_ref())?.to_rgb8();
        let (width, height) = img.dimensions();

        let data = img
            .pixels()
            .map(|p| Color::from_rgb8(p.0).to_argb())
            .collect();

        log::info!(
            "loaded texture {} ({}x{})",
            path.as_ref().display(),
            width,
            height
        );
        Self::from_argb(width, height, data)
    }

    /// Texel address for `(u, v)`.
    ///
    /// `v` is flipped so that `v = 1` is the top row. Both axes wrap, so
    /// coordinates outside `[0, 1]` (including negative ones) repeat the
    /// image instead of clamping.
    #[inline]
    pub fn texel_coords(&self, u: f32, v: f32) -> (u32, u32) {
        let w = self.width as f32;
        let h = self.height as f32;
        let x = ((u * w).floor() as i64).rem_euclid(self.width as i64);
        let y = ((h - v * h).floor() as i64).rem_euclid(self.height as i64);
        (x as u32, y as u32)
    }

    /// Color of the texel at integer coordinates, top-left origin.
    pub fn texel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(Color::from_argb(self.data[(y * self.width + x) as usize]))
        } else {
            None
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Sampler for Texture {
    /// Nearest-neighbor lookup with wraparound addressing.
    #[inline]
    fn sample(&self, u: f32, v: f32) -> Color {
        let (x, y) = self.texel_coords(u, v);
        Color::from_argb(self.data[(y * self.width + x) as usize])
    }
}
