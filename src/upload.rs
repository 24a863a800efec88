// Renderer-facing side of the mask: a single-channel 8-bit texture.
// 255 = fully visible cover, 0 = fully erased. No inversion, no gamma.

use crate::mask::MaskBuffer;

/// Uniform name the compositing shader binds the mask under.
pub const MASK_TEXTURE_NAME: &str = "_MaskTex";

/// R8 copy of a mask, reused across uploads.
pub struct MaskTexture {
    resolution: usize,
    texels: Vec<u8>,
}

impl MaskTexture {
    /// Allocate a texture matching `mask`, filled from its current state.
    pub fn new(mask: &MaskBuffer) -> Self {
        let mut tex = Self { resolution: mask.resolution(), texels: vec![255; mask.snapshot().len()] };
        tex.write(mask);
        tex
    }

    pub fn name(&self) -> &'static str {
        MASK_TEXTURE_NAME
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn texels(&self) -> &[u8] {
        &self.texels
    }

    /// Re-upload if the mask changed since the last refresh. Returns whether it did.
    pub fn refresh(&mut self, mask: &mut MaskBuffer) -> bool {
        if !mask.take_dirty() {
            return false;
        }
        self.write(mask);
        true
    }

    /// Nearest-texel lookup for a normalized coordinate, as a shader sampler would.
    #[inline]
    pub fn sample_nearest(&self, u: f32, v: f32) -> u8 {
        let last = self.resolution - 1;
        let x = ((u * self.resolution as f32) as usize).min(last);
        let y = ((v * self.resolution as f32) as usize).min(last);
        self.texels[y * self.resolution + x]
    }

    fn write(&mut self, mask: &MaskBuffer) {
        debug_assert_eq!(mask.resolution(), self.resolution);
        for (dst, &r) in self.texels.iter_mut().zip(mask.snapshot()) {
            // truncating, like writing a float into byte storage
            *dst = (r * 255.0) as u8;
        }
    }
}
