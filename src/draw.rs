// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows your live camera image.
// 2) Overlay primitives: circle marker, crosshair, skeleton lines, and a
//    translucent body box blended in linear light.
// 3) A tiny 5x7 bitmap font to render HUD text on top of the video.

use crate::error::Error;
use crate::pose::{Keypoint, KeypointRole, SKELETON};
use crate::types::{FrameBuffer, PixelBuffer, Quadrilateral};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

pub struct Overlay {
    window: Window, // the on-screen window you see
}

impl Overlay {
    /// Create a window sized to the camera feed.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new image (live video).
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    // Toggles: T flips the ball marker, P flips the pose overlays.
    pub fn t_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::T, KeyRepeat::No)
    }

    pub fn p_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::P, KeyRepeat::No)
    }
}

/// Copy a camera frame into the screen buffer, packing each r,g,b triple
/// as 0x00RRGGBB. The overlays draw on top of this afterwards.
pub fn blit(frame: &PixelBuffer, screen: &mut FrameBuffer) {
    for (i, out) in screen.pixels.iter_mut().enumerate() {
        let (r, g, b) = frame.rgb(i);
        *out = ((r as u32) << 16) | ((g as u32) << 8) | (b as u32);
    }
}

/* ---------- Software drawing: pixels, lines, circles, crosshair ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
/// Visual: the exact pixel at (x,y) changes color.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
/// Visual: a straight 1-pixel line appears on top of the camera image.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Draw a 1-pixel circle outline using the midpoint algorithm.
/// Visual: a ring around the tracked ball.
pub fn draw_circle(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;
    while x >= y {
        // One computed octant, mirrored eight ways.
        put_pixel(fb, cx + x, cy + y, color);
        put_pixel(fb, cx + y, cy + x, color);
        put_pixel(fb, cx - y, cy + x, color);
        put_pixel(fb, cx - x, cy + y, color);
        put_pixel(fb, cx - x, cy - y, color);
        put_pixel(fb, cx - y, cy - x, color);
        put_pixel(fb, cx + y, cy - x, color);
        put_pixel(fb, cx + x, cy - y, color);
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Draw a small filled dot. Visual: joint markers on the skeleton.
pub fn draw_disc(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                put_pixel(fb, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Draw a small crosshair centered at (cx,cy).
/// Visual: a "+" shape (with a tiny gap at the center) marks the ball center.
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: u32) {
    // Horizontal line (left part)
    draw_line(fb, cx - size, cy, cx - 2, cy, color);
    // Horizontal line (right part)
    draw_line(fb, cx + 2, cy, cx + size, cy, color);
    // Vertical line (top part)
    draw_line(fb, cx, cy - size, cx, cy - 2, color);
    // Vertical line (bottom part)
    draw_line(fb, cx, cy + 2, cx, cy + size, color);
    // Small center dot to anchor the crosshair visually
    put_pixel(fb, cx, cy, color);
}

/* ---------- Gamma LUT + translucent body box ---------- */

/// Precomputed sRGB conversion tables so the translucent fill can blend in
/// linear light without calling powf per pixel.
pub struct GammaLut {
    // sRGB(0..255) -> linear (0..1) as f32
    srgb_to_linear: [f32; 256],
    // linear(0..1) -> sRGB(0..255) via 4096-step quantization
    linear_to_srgb: [u8; 4096],
}

impl GammaLut {
    /// Build both tables once at startup.
    pub fn new() -> Self {
        let mut s2l = [0.0f32; 256];
        for (v, slot) in s2l.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *slot = if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            };
        }

        let mut l2s = [0u8; 4096];
        for (i, slot) in l2s.iter_mut().enumerate() {
            let l = (i as f32) / 4095.0;
            let s = if l <= 0.003_130_8 {
                12.92 * l
            } else {
                1.055 * l.powf(1.0 / 2.4) - 0.055
            };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self {
            srgb_to_linear: s2l,
            linear_to_srgb: l2s,
        }
    }

    #[inline]
    fn to_linear(&self, v: u8) -> f32 {
        self.srgb_to_linear[v as usize]
    }

    #[inline]
    fn to_srgb(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * 4095.0).round() as usize;
        self.linear_to_srgb[idx]
    }
}

/// Mix `color` into one screen pixel at opacity `alpha`, in linear light.
#[inline]
fn blend_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32, alpha: f32, lut: &GammaLut) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    let base = fb.pixels[idx];

    let inv = 1.0 - alpha;
    let mut out = 0u32;
    for shift in [16u32, 8, 0] {
        let b = lut.to_linear(((base >> shift) & 0xFF) as u8);
        let c = lut.to_linear(((color >> shift) & 0xFF) as u8);
        out |= (lut.to_srgb(alpha * c + inv * b) as u32) << shift;
    }
    fb.pixels[idx] = out;
}

/// Fill the body box with a translucent wash of `color`.
/// Scanline fill: for each row, intersect the row with the four edges and
/// fill between the outermost crossings. Correct for the convex shapes the
/// builder emits.
pub fn fill_quad(fb: &mut FrameBuffer, quad: &Quadrilateral, color: u32, alpha: f32, lut: &GammaLut) {
    let mut y_min = f32::INFINITY;
    let mut y_max = f32::NEG_INFINITY;
    for c in &quad.corners {
        y_min = y_min.min(c.y);
        y_max = y_max.max(c.y);
    }
    let y_first = y_min.floor().max(0.0) as i32;
    let y_last = y_max.ceil().min(fb.height as f32) as i32;

    for y in y_first..y_last {
        let scan = y as f32 + 0.5; // sample rows at their centers

        let mut x_min = f32::INFINITY;
        let mut x_max = f32::NEG_INFINITY;
        for i in 0..4 {
            let p = quad.corners[i];
            let q = quad.corners[(i + 1) % 4];
            // Half-open span test so a shared corner counts exactly once.
            if (p.y <= scan && scan < q.y) || (q.y <= scan && scan < p.y) {
                let t = (scan - p.y) / (q.y - p.y);
                let x = p.x + t * (q.x - p.x);
                x_min = x_min.min(x);
                x_max = x_max.max(x);
            }
        }

        if x_min <= x_max {
            for x in x_min.round() as i32..=x_max.round() as i32 {
                blend_pixel(fb, x, y, color, alpha, lut);
            }
        }
    }
}

/// Stroke the body box outline on top of the fill.
pub fn draw_quad_outline(fb: &mut FrameBuffer, quad: &Quadrilateral, color: u32) {
    for i in 0..4 {
        let p = quad.corners[i];
        let q = quad.corners[(i + 1) % 4];
        draw_line(
            fb,
            p.x.round() as i32,
            p.y.round() as i32,
            q.x.round() as i32,
            q.y.round() as i32,
            color,
        );
    }
}

/* ---------- Skeleton ---------- */

/// Draw bones between confidently seen joints, then a dot on each joint.
/// Visual: a stick figure following the body.
pub fn draw_skeleton(
    fb: &mut FrameBuffer,
    keypoints: &[Keypoint],
    min_score: f32,
    bone_color: u32,
    joint_color: u32,
) {
    let seen = |role: KeypointRole| {
        keypoints
            .iter()
            .find(|k| k.role == role && k.score > min_score)
    };

    for &(a, b) in SKELETON.iter() {
        if let (Some(ka), Some(kb)) = (seen(a), seen(b)) {
            draw_line(
                fb,
                ka.position.x.round() as i32,
                ka.position.y.round() as i32,
                kb.position.x.round() as i32,
                kb.position.y.round() as i32,
                bone_color,
            );
        }
    }

    for k in keypoints.iter().filter(|k| k.score > min_score) {
        draw_disc(
            fb,
            k.position.x.round() as i32,
            k.position.y.round() as i32,
            3,
            joint_color,
        );
    }
}

/* ---------- 5x7 bitmap font (ASCII subset the HUD needs) ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Uppercase letters for "LIVE", "BALL", "POSE", "ON", "OFF", "FPS", "T:", "P:"
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),

        // Punctuation: space, vertical bar, colon, dot
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y).
/// Visual: a tiny glyph with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow pass: offset by (1,1) in black to improve readability
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32 + 1, y + ry as i32 + 1, 0x00000000);
                }
            }
        }

        // Foreground pass: actual glyph in chosen color
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32, y + ry as i32, color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Visual: a compact HUD string appears; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point2;

    fn black_screen(width: usize, height: usize) -> FrameBuffer {
        FrameBuffer {
            width,
            height,
            pixels: vec![0u32; width * height],
        }
    }

    #[test]
    fn blit_packs_rgb_into_screen_words() {
        let frame = PixelBuffer {
            width: 2,
            height: 1,
            data: vec![0x11, 0x22, 0x33, 0xFF, 0xAA, 0xBB, 0xCC, 0xFF],
        };
        let mut screen = black_screen(2, 1);
        blit(&frame, &mut screen);
        assert_eq!(screen.pixels, vec![0x0011_2233, 0x00AA_BBCC]);
    }

    #[test]
    fn drawing_clips_at_the_buffer_edges() {
        let mut screen = black_screen(4, 4);
        // Everything below aims partly or fully outside; none of it may panic.
        put_pixel(&mut screen, -1, 2, 0xFFFFFF);
        put_pixel(&mut screen, 2, 99, 0xFFFFFF);
        draw_line(&mut screen, -5, -5, 8, 8, 0xFFFFFF);
        draw_circle(&mut screen, 0, 0, 10, 0xFFFFFF);
        draw_disc(&mut screen, 3, 3, 5, 0xFFFFFF);
        draw_crosshair(&mut screen, -2, 2, 4, 0xFFFFFF);

        // The diagonal line did land where it crosses the buffer.
        assert_eq!(screen.pixels[0], 0xFFFFFF);
    }

    #[test]
    fn fill_quad_covers_inside_and_spares_outside() {
        let mut screen = black_screen(10, 10);
        let lut = GammaLut::new();
        let quad = Quadrilateral {
            corners: [
                Point2::new(2.0, 2.0),
                Point2::new(7.0, 2.0),
                Point2::new(7.0, 7.0),
                Point2::new(2.0, 7.0),
            ],
        };
        // Full opacity so filled pixels take the color exactly.
        fill_quad(&mut screen, &quad, 0x00FF0000, 1.0, &lut);

        assert_eq!(screen.pixels[4 * 10 + 4], 0x00FF0000); // center
        assert_eq!(screen.pixels[0], 0); // corner untouched
        assert_eq!(screen.pixels[9 * 10 + 9], 0); // far corner untouched
    }

    #[test]
    fn skeleton_skips_unsure_joints() {
        let mut screen = black_screen(20, 20);
        let kps = [
            Keypoint {
                role: KeypointRole::LeftShoulder,
                position: Point2::new(2.0, 2.0),
                score: 0.9,
            },
            Keypoint {
                role: KeypointRole::RightShoulder,
                position: Point2::new(18.0, 2.0),
                score: 0.1, // too unsure to draw
            },
        ];
        draw_skeleton(&mut screen, &kps, 0.4, 0xFFFFFF, 0x00FF00);

        // No bone between the shoulders: midpoint of that line stays black.
        assert_eq!(screen.pixels[2 * 20 + 10], 0);
        // The confident joint still gets its dot.
        assert_eq!(screen.pixels[2 * 20 + 2], 0x00FF00);
    }
}
