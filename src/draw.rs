// Window + software drawing utilities for the scratch-off demo.
// Visual effects provided here:
// 1) A window that shows the masked image.
// 2) A brush outline + crosshair that follow the mouse.
// 3) A tiny 5x7 bitmap font for the HUD line.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use scratch_mask::types::FrameBuffer;
use scratch_mask::Error;

pub struct Drawer {
    window: Window,
}

impl Drawer {
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in window pixels; `None` while the cursor is outside the window.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    /// Held: every frame turns into one erase stroke under the cursor.
    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Pressed: throw the mask away and start a fresh card.
    pub fn c_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::C, KeyRepeat::No)
    }
}

/* ---------- Software drawing ---------- */

#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 || x as usize >= fb.width {
        return;
    }
    if let Some(px) = fb.pixels.get_mut(y as usize * fb.width + x as usize) {
        *px = color;
    }
}

/// Axis-aligned 1-pixel segment; `len` may be negative.
fn draw_span(fb: &mut FrameBuffer, x: i32, y: i32, len: i32, vertical: bool, color: u32) {
    let (lo, hi) = if len < 0 { (len, 0) } else { (0, len) };
    for t in lo..=hi {
        if vertical { put_pixel(fb, x, y + t, color) } else { put_pixel(fb, x + t, y, color) }
    }
}

/// "+" at (cx,cy) with a 1-pixel hole around the center dot.
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: u32) {
    let arm = size - 2;
    draw_span(fb, cx - size, cy, arm, false, color);
    draw_span(fb, cx + size, cy, -arm, false, color);
    draw_span(fb, cx, cy - size, arm, true, color);
    draw_span(fb, cx, cy + size, -arm, true, color);
    put_pixel(fb, cx, cy, color);
}

/// 1-pixel circle outline (midpoint algorithm).
/// Visual: shows how far the brush reaches on screen.
pub fn draw_circle(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    if radius <= 0 { return; }
    let (mut x, mut y) = (radius, 0);
    let mut err = 1 - radius;
    while x >= y {
        for (dx, dy) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
            put_pixel(fb, cx + dx, cy + dy, color);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/* ---------- 5x7 HUD font ---------- */

// Only what the HUD prints: digits, "REVEALED", "SUBTRACT", "CUT", "RESET", "FPS", " |:.%".
// One byte per row, bit 4 is the leftmost column.
const GLYPHS: &[(char, [u8; 7])] = &[
    ('0', [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E]),
    ('1', [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('2', [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F]),
    ('3', [0x1E, 0x01, 0x01, 0x0E, 0x01, 0x01, 0x1E]),
    ('4', [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02]),
    ('5', [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E]),
    ('6', [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E]),
    ('7', [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08]),
    ('8', [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E]),
    ('9', [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C]),
    ('A', [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
    ('B', [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E]),
    ('C', [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E]),
    ('D', [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C]),
    ('E', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F]),
    ('F', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10]),
    ('L', [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F]),
    ('P', [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10]),
    ('R', [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11]),
    ('S', [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E]),
    ('T', [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
    ('U', [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
    ('V', [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04]),
    (' ', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('|', [0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
    (':', [0x00, 0x04, 0x00, 0x00, 0x04, 0x00, 0x00]),
    ('.', [0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x00]),
    ('%', [0x19, 0x1A, 0x02, 0x04, 0x08, 0x0B, 0x13]),
];

fn glyph5x7(ch: char) -> Option<&'static [u8; 7]> {
    GLYPHS.iter().find(|(c, _)| *c == ch).map(|(_, rows)| rows)
}

/// Draw `text` left to right from (x,y), 6 pixels per character.
/// Each glyph gets a black drop shadow one pixel down-right.
pub fn draw_text_5x7(fb: &mut FrameBuffer, x: i32, y: i32, text: &str, color: u32) {
    for (i, ch) in text.chars().enumerate() {
        let Some(rows) = glyph5x7(ch) else { continue };
        let gx = x + 6 * i as i32;
        for (offset, ink) in [(1, 0x00_00_00_00), (0, color)] {
            for (ry, bits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if *bits & (0x10u8 >> rx) != 0 {
                        put_pixel(fb, gx + rx + offset, y + ry as i32 + offset, ink);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawing_off_screen_is_clipped() {
        let mut fb = FrameBuffer::new(8, 8);
        draw_circle(&mut fb, -20, -20, 5, 0xFF);
        draw_crosshair(&mut fb, 100, 100, 12, 0xFF);
        assert!(fb.pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn circle_touches_its_four_extremes() {
        let mut fb = FrameBuffer::new(11, 11);
        draw_circle(&mut fb, 5, 5, 4, 0xAB);
        for (x, y) in [(9, 5), (1, 5), (5, 9), (5, 1)] {
            assert_eq!(fb.pixels[y * 11 + x], 0xAB);
        }
        assert_eq!(fb.pixels[5 * 11 + 5], 0);
    }

    #[test]
    fn text_draws_shadow_then_ink() {
        let mut fb = FrameBuffer::new(16, 10);
        fb.pixels.fill(0x55);
        draw_text_5x7(&mut fb, 0, 0, "1", 0xEE);
        // '1' top row is a single dot in column 2
        assert_eq!(fb.pixels[2], 0xEE);
        assert_eq!(fb.pixels[..16].iter().filter(|&&p| p == 0xEE).count(), 1);
        // bottom row spans columns 1..=3; its shadow ends at (4, 7)
        assert_eq!(fb.pixels[6 * 16 + 3], 0xEE);
        assert_eq!(fb.pixels[7 * 16 + 4], 0);
        assert_eq!(fb.pixels[7 * 16 + 5], 0x55);
    }

    #[test]
    fn crosshair_leaves_gap_around_center() {
        let mut fb = FrameBuffer::new(21, 21);
        draw_crosshair(&mut fb, 10, 10, 6, 0x77);
        assert_eq!(fb.pixels[10 * 21 + 10], 0x77);
        assert_eq!(fb.pixels[10 * 21 + 11], 0);
        assert_eq!(fb.pixels[10 * 21 + 12], 0x77);
        assert_eq!(fb.pixels[10 * 21 + 4], 0x77);
        assert_eq!(fb.pixels[10 * 21 + 3], 0);
        assert_eq!(fb.pixels[16 * 21 + 10], 0x77);
    }

    #[test]
    fn hud_characters_all_have_glyphs() {
        for ch in "REVEALED 42.0% | C: RESET | SUBTRACT CUT FPS".chars() {
            assert!(glyph5x7(ch).is_some(), "missing glyph for {ch:?}");
        }
    }
}
