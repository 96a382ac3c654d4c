// Core types shared by the analysis pipeline and the overlay renderer.

use serde::Deserialize;

/// One camera frame as flat RGBA bytes, row-major, origin top-left.
/// Rebuilt fresh every frame; the analysis code only ever borrows it.
pub struct PixelBuffer {
    pub width: usize,  // frame width in pixels
    pub height: usize, // frame height in pixels
    pub data: Vec<u8>, // length = width * height * 4, channel order r,g,b,a
}

impl PixelBuffer {
    /// Channel triple of pixel `i` (0..width*height). Alpha is carried in
    /// the buffer but nothing downstream reads it.
    #[inline]
    pub fn rgb(&self, i: usize) -> (u8, u8, u8) {
        let o = i * 4;
        (self.data[o], self.data[o + 1], self.data[o + 2])
    }
}

/// What the window displays each frame.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>, // each entry is 0x00RRGGBB for minifb
}

/// Image-space point with sub-pixel precision. Also does duty as a 2D
/// vector in the geometry helpers.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Where the tracked ball is believed to be this frame.
/// The radius is the marker size we draw, not a measured ball size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlobEstimate {
    pub center: Point2,
    pub radius: f32,
}

/// A closed four-corner polygon. Corner order is fixed by the builder:
/// the first pair's extended ends, then the second pair's in reverse, so
/// the outline walks around the shape without crossing itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quadrilateral {
    pub corners: [Point2; 4],
}
