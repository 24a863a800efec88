// sRGB <-> linear lookup tables for the cover/reveal mix.
// Blending in linear light keeps half-scratched edges from going muddy.

pub struct GammaLut {
    // sRGB(0..255) -> linear (0..1)
    srgb_to_linear: [f32; 256],
    // linear(0..1) -> sRGB(0..255), 4096 steps (index = (linear * 4095).round())
    linear_to_srgb: [u8; 4096],
}

impl GammaLut {
    pub fn new() -> Self {
        let mut s2l = [0.0f32; 256];
        for (v, out) in s2l.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *out = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        let mut l2s = [0u8; 4096];
        for (i, out) in l2s.iter_mut().enumerate() {
            let l = i as f32 / 4095.0;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *out = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { srgb_to_linear: s2l, linear_to_srgb: l2s }
    }

    #[inline]
    pub fn srgb_u8_to_linear(&self, v: u8) -> f32 {
        self.srgb_to_linear[v as usize]
    }

    #[inline]
    pub fn linear_to_srgb_u8(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * 4095.0).round() as usize;
        self.linear_to_srgb[idx]
    }

    /// `t * top + (1 - t) * bottom` per channel, in linear light.
    /// Both pixels are 0x00RRGGBB.
    pub fn mix(&self, top: u32, bottom: u32, t: f32) -> u32 {
        let mut out = 0u32;
        for shift in [16u32, 8, 0] {
            let a = self.srgb_u8_to_linear(((top >> shift) & 0xFF) as u8);
            let b = self.srgb_u8_to_linear(((bottom >> shift) & 0xFF) as u8);
            let c = self.linear_to_srgb_u8(t * a + (1.0 - t) * b) as u32;
            out |= c << shift;
        }
        out
    }
}
