//! Paired color and depth buffers that a frame is rendered into.

use std::fmt;

use crate::colors::Color;

use super::depth::DepthBuffer;
use super::framebuffer::FrameBuffer;

/// Errors raised when a render target is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    /// The color and depth buffers disagree on size.
    DimensionMismatch {
        frame: (u32, u32),
        depth: (u32, u32),
    },
    /// Width or height is zero.
    ZeroSize,
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetError::DimensionMismatch { frame, depth } => write!(
                f,
                "frame buffer is {}x{} but depth buffer is {}x{}",
                frame.0, frame.1, depth.0, depth.1
            ),
            TargetError::ZeroSize => write!(f, "render target must be at least 1x1"),
        }
    }
}

impl std::error::Error for TargetError {}

/// A frame buffer and depth buffer of identical dimensions.
///
/// The dimension check happens once, here, so the per-pixel path never has
/// to consider mismatched buffers.
#[derive(Clone, Debug)]
pub struct RenderTarget {
    frame: FrameBuffer,
    depth: DepthBuffer,
}

impl RenderTarget {
    pub fn new(width: u32, height: u32) -> Result<Self, TargetError> {
        Self::from_buffers(
            FrameBuffer::new(width, height, Color::BLACK),
            DepthBuffer::new(width, height),
        )
    }

    /// Pair caller-supplied buffers, rejecting mismatched or empty sizes.
    pub fn from_buffers(frame: FrameBuffer, depth: DepthBuffer) -> Result<Self, TargetError> {
        let frame_size = (frame.width(), frame.height());
        let depth_size = (depth.width(), depth.height());
        if frame_size != depth_size {
            return Err(TargetError::DimensionMismatch {
                frame: frame_size,
                depth: depth_size,
            });
        }
        if frame_size.0 == 0 || frame_size.1 == 0 {
            return Err(TargetError::ZeroSize);
        }
        Ok(Self { frame, depth })
    }

    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    /// Reset every color cell to `background` and every depth cell to the
    /// clear sentinel.
    pub fn clear(&mut self, background: Color) {
        self.frame.clear(background);
        self.depth.clear();
    }

    /// Depth-tested pixel write.
    ///
    /// Only pixels with `0 < x < width` and `0 < y < height` are eligible, so
    /// row 0 and column 0 are never filled. The write lands when `depth` is
    /// strictly less than the stored value; both buffers are then updated.
    #[inline]
    pub fn write(&mut self, x: i32, y: i32, depth: f32, color: Color) -> bool {
        if x <= 0 || y <= 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return false;
        }
        if !self.depth.test_and_set(x as u32, y as u32, depth) {
            return false;
        }
        self.frame.set_pixel(x, y, color);
        true
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Direct access for overlays that bypass the depth test.
    pub fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }
}
