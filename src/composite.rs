// Host-side compositing: what a shader would do with `_MaskTex`.
// Visual: cover where the mask is 1.0, reveal where it is 0.0, linear-light mix between.

use image::imageops::FilterType;
use image::DynamicImage;
use scratch_mask::types::FrameBuffer;
use scratch_mask::{Error, ImageRect, MaskTexture};

use crate::gamma::GammaLut;

/// Resize any decoded image to exactly `width × height` and pack it as 0x00RRGGBB.
pub fn frame_from_image(img: &DynamicImage, width: usize, height: usize) -> FrameBuffer {
    let rgb = img.resize_exact(width as u32, height as u32, FilterType::Triangle).to_rgb8();
    let pixels = rgb
        .pixels()
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
        .collect();
    FrameBuffer { width, height, pixels }
}

/// Brushed-silver foil: the default cover when no image is configured.
pub fn foil(width: usize, height: usize) -> FrameBuffer {
    let mut fb = FrameBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            // diagonal sheen + fine horizontal streaks
            let t = (x + y) as f32 / (width + height).max(1) as f32;
            let sheen = 150.0 + 60.0 * (t * std::f32::consts::PI * 3.0).sin();
            let streak = if (y * 7 + x / 13) % 5 == 0 { 12.0 } else { 0.0 };
            let v = (sheen + streak).clamp(0.0, 255.0) as u32;
            fb.pixels[y * width + x] = (v << 16) | (v << 8) | v.saturating_sub(8);
        }
    }
    fb
}

/// Colored checkerboard: the default image under the cover.
pub fn checker(width: usize, height: usize, cell: usize) -> FrameBuffer {
    let cell = cell.max(1);
    let mut fb = FrameBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let on = ((x / cell) + (y / cell)) % 2 == 0;
            let r = (x * 255 / width.max(1)) as u32;
            let b = (y * 255 / height.max(1)) as u32;
            fb.pixels[y * width + x] = if on { (r << 16) | (0x40 << 8) | b } else { 0x00_F0_D0_20 };
        }
    }
    fb
}

/// Draw the masked image into `screen` at `rect`.
/// `cover` and `reveal` must both be `rect`-sized; `rect` must fit on screen.
pub fn composite_masked(
    screen: &mut FrameBuffer,
    rect: &ImageRect,
    cover: &FrameBuffer,
    reveal: &FrameBuffer,
    mask: &MaskTexture,
    lut: &GammaLut,
) -> Result<(), Error> {
    let (w, h) = (rect.width as usize, rect.height as usize);
    if cover.width != w || cover.height != h || reveal.width != w || reveal.height != h {
        return Err(Error::Composite(format!(
            "layers must be {w}x{h} (cover {}x{}, reveal {}x{})",
            cover.width, cover.height, reveal.width, reveal.height
        )));
    }
    let (ox, oy) = (rect.x as usize, rect.y as usize);
    if ox + w > screen.width || oy + h > screen.height {
        return Err(Error::Composite("image rect does not fit the screen".into()));
    }

    for iy in 0..h {
        let v = (iy as f32 + 0.5) / h as f32;
        let src_row = iy * w;
        let dst_row = (oy + iy) * screen.width + ox;
        for ix in 0..w {
            let u = (ix as f32 + 0.5) / w as f32;
            let m = mask.sample_nearest(u, v);
            let i = src_row + ix;
            screen.pixels[dst_row + ix] = match m {
                255 => cover.pixels[i],  // untouched
                0 => reveal.pixels[i],   // fully scratched
                _ => lut.mix(cover.pixels[i], reveal.pixels[i], m as f32 / 255.0),
            };
        }
    }
    Ok(())
}
