//! Per-pixel depth buffer.

/// Value every cell is reset to at the start of a frame.
///
/// Larger than any depth the rasterizer can write, since stored depths are
/// scaled eye distances below the far plane.
pub const DEPTH_CLEAR: f32 = 2.0;

/// Nearest-depth record for each pixel. Smaller is nearer.
///
/// A cell only ever changes to a strictly smaller value; equal depths keep
/// the first writer.
#[derive(Clone, Debug)]
pub struct DepthBuffer {
    depths: Vec<f32>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            depths: vec![DEPTH_CLEAR; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self) {
        self.depths.fill(DEPTH_CLEAR);
    }

    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.depths[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Store `depth` at (x, y) if it is strictly nearer than the current
    /// value. Returns whether the write happened. NaN never passes.
    #[inline]
    pub fn test_and_set(&mut self, x: u32, y: u32, depth: f32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let cell = &mut self.depths[y as usize * self.width as usize + x as usize];
        if depth < *cell {
            *cell = depth;
            true
        } else {
            false
        }
    }

    pub fn depths(&self) -> &[f32] {
        &self.depths
    }
}
