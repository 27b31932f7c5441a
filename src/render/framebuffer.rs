//! Color buffer for one frame.
//!
//! Pixels are stored as packed ARGB8888 (`u32`) in row-major order so the
//! finished frame can be handed to a streaming texture without conversion.

use std::path::Path;

use crate::colors::Color;

/// An owned 2D grid of colors, cleared to a background color every frame.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            pixels: vec![background.to_argb(); width as usize * height as usize],
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

    pub fn clear(&mut self, background: Color) {
        self.pixels.fill(background.to_argb());
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Write a pixel without depth testing (overlays, wireframes).
    /// Out-of-bounds coordinates are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.to_argb();
        }
    }

    /// Packed ARGB value at (x, y), or None if out of bounds.
    #[inline]
    pub fn argb(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.argb(x, y).map(Color::from_argb)
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Draws a line between two points using Bresenham's line algorithm.
    ///
    /// Only integer arithmetic is used: an error term tracks the distance
    /// between the ideal line and the current pixel, and each step moves
    /// along the major axis, stepping the minor axis once the accumulated
    /// error crosses the threshold.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let step_x = if x0 < x1 { 1 } else { -1 };
        let step_y = if y0 < y1 { 1 } else { -1 };

        // Positive error favors x movement, negative favors y.
        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += step_x;
            }
            // Both branches may fire, giving a diagonal step.
            if e2 < dx {
                err += dx;
                y += step_y;
            }
        }
    }

    /// The frame as bytes in ARGB8888 (native-endian `u32`) layout.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and u8 has alignment 1, so viewing the
        // initialized u32 slice as 4x as many bytes is valid for its lifetime.
        unsafe {
            std::slice::from_raw_parts(self.pixels.as_ptr() as *const u8, self.pixels.len() * 4)
        }
    }

    /// Write the frame to an image file (format chosen by extension).
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        let image = image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let argb = self.pixels[y as usize * self.width as usize + x as usize];
            image::Rgb([(argb >> 16) as u8, (argb >> 8) as u8, argb as u8])
        });
        image.save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_every_pixel() {
        let mut fb = FrameBuffer::new(8, 4, Color::BLACK);
        fb.set_pixel(3, 2, Color::WHITE);
        fb.clear(Color::RED);
        assert!(fb.pixels().iter().all(|&p| p == Color::RED.to_argb()));
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut fb = FrameBuffer::new(4, 4, Color::BLACK);
        fb.set_pixel(-1, 0, Color::WHITE);
        fb.set_pixel(4, 0, Color::WHITE);
        assert_eq!(fb.argb(-1, 0), None);
        assert!(fb.pixels().iter().all(|&p| p == Color::BLACK.to_argb()));
    }

    #[test]
    fn line_hits_both_endpoints_and_diagonal() {
        let mut fb = FrameBuffer::new(8, 8, Color::BLACK);
        fb.draw_line(1, 1, 5, 5, Color::WHITE);
        for i in 1..=5 {
            assert_eq!(fb.pixel(i, i), Some(Color::WHITE));
        }
        assert_eq!(fb.pixel(2, 1), Some(Color::BLACK));
    }

    #[test]
    fn bytes_cover_every_pixel() {
        let fb = FrameBuffer::new(3, 2, Color::WHITE);
        assert_eq!(fb.as_bytes().len(), 3 * 2 * 4);
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));
    }
}
