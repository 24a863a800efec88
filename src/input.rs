// Pointer -> mask space.
// The host owns the on-screen rectangle of the image; a pointer event is first
// normalized against that rectangle, dropped if it lands outside, then floored
// onto the mask grid.

use crate::types::TexelCoord;

/// Where the masked image sits on screen, in window pixels (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ImageRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Normalized image coordinates of a pointer, `None` outside `[0,1]²`.
    pub fn to_uv(&self, px: f32, py: f32) -> Option<(f32, f32)> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let u = (px - self.x) / self.width;
        let v = (py - self.y) / self.height;
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return None;
        }
        Some((u, v))
    }

    /// Mask texel under a pointer, `None` when the pointer is off the image.
    pub fn texel_at(&self, px: f32, py: f32, resolution: usize) -> Option<TexelCoord> {
        self.to_uv(px, py).map(|(u, v)| texel_for_uv(u, v, resolution))
    }

    /// Whether a window pixel is covered by the image (half-open on the far edges).
    #[inline]
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && py >= self.y && px < self.x + self.width && py < self.y + self.height
    }
}

/// `floor(u * resolution)`, `floor(v * resolution)`.
/// `u == 1.0` lands one past the last texel, which the clamped stamp bounds absorb.
pub fn texel_for_uv(u: f32, v: f32, resolution: usize) -> TexelCoord {
    let res = resolution as f32;
    TexelCoord::new((u * res).floor() as i32, (v * res).floor() as i32)
}
