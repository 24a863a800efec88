// Plain data shared by the brush, the mask and the demo host.

use serde::Deserialize;

/// RGB frame the demo window shows.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // window width (pixels)
    pub height: usize,     // window height (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// Alpha channel of a brush image, row-major, origin top-left, values in [0,1].
/// Dimensions never change after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushFootprint {
    width: usize,
    height: usize,
    opacity: Vec<f32>,
}

impl BrushFootprint {
    /// `opacity.len()` must equal `width * height`; values are clamped into [0,1].
    pub(crate) fn new(width: usize, height: usize, mut opacity: Vec<f32>) -> Self {
        debug_assert_eq!(opacity.len(), width * height);
        for a in &mut opacity {
            *a = if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) };
        }
        Self { width, height, opacity }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f32 {
        self.opacity[y * self.width + x]
    }

    pub fn opacity(&self) -> &[f32] {
        &self.opacity
    }
}

/// How a brush sample is folded into a mask texel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// `remaining = max(0, remaining - alpha)`: graded erosion that accumulates.
    #[default]
    Subtract,
    /// Any texel the brush covers (alpha past the skip threshold) drops straight to 0.
    Cut,
}

/// Integer texel coordinate in mask space. May lie outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexelCoord {
    pub x: i32,
    pub y: i32,
}

impl TexelCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
