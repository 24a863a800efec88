// Brush footprint + continuous opacity lookups over the unit square.
// The mask never reads brush pixels directly; it asks `sample(u, v)` for
// every texel under a stroke.

use std::path::Path;

use image::{DynamicImage, Rgba32FImage};
use log::info;

use crate::error::Error;
use crate::types::BrushFootprint;

/// Largest radius `gaussian` accepts: a 4097 x 4097 footprint.
pub const MAX_GAUSSIAN_RADIUS: u32 = 2048;

/// Platform hook for brush images that live in GPU-only storage.
///
/// Implementations render the resident image into an off-screen target and
/// copy the pixels back into CPU memory. Called once, at brush construction.
pub trait ReadBack {
    fn read_back(&self) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>>;
}

/// Where the brush pixels come from.
pub enum BrushSource {
    /// Pixels already sit in CPU memory (anything `image` decoded).
    Readable(DynamicImage),
    /// Pixels must be copied out through an off-screen render first.
    Resident(Box<dyn ReadBack>),
}

impl From<DynamicImage> for BrushSource {
    fn from(img: DynamicImage) -> Self {
        BrushSource::Readable(img)
    }
}

/// Immutable brush footprint answering bilinear opacity queries.
#[derive(Debug, Clone)]
pub struct BrushSampler {
    footprint: BrushFootprint,
}

impl BrushSampler {
    /// Normalize any source into a CPU-readable alpha array.
    /// A failed read-back is fatal: the sampler is never built from partial data.
    pub fn from_source(source: BrushSource) -> Result<Self, Error> {
        let img = match source {
            BrushSource::Readable(img) => img,
            BrushSource::Resident(gpu) => gpu
                .read_back()
                .map_err(|e| Error::BrushReadback(e.to_string()))?,
        };
        Self::from_image(&img)
    }

    /// Keep only the alpha channel of `img`, as [0,1] floats.
    pub fn from_image(img: &DynamicImage) -> Result<Self, Error> {
        let rgba: Rgba32FImage = img.to_rgba32f();
        let (w, h) = rgba.dimensions();
        if w == 0 || h == 0 {
            return Err(Error::EmptyBrush { width: w, height: h });
        }
        let alpha: Vec<f32> = rgba.pixels().map(|p| p[3]).collect();
        info!("brush footprint {w}x{h} built from image");
        Ok(Self { footprint: BrushFootprint::new(w as usize, h as usize, alpha) })
    }

    /// Decode a brush image from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| Error::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_image(&img)
    }

    /// Build a footprint by evaluating `f(x, y)` for every brush pixel.
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> f32) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyBrush { width: width as u32, height: height as u32 });
        }
        let mut opacity = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                opacity.push(f(x, y));
            }
        }
        Ok(Self { footprint: BrushFootprint::new(width, height, opacity) })
    }

    /// Single-pixel brush that answers `alpha` everywhere inside the unit square.
    pub fn constant(alpha: f32) -> Self {
        Self { footprint: BrushFootprint::new(1, 1, vec![alpha]) }
    }

    /// Round soft brush with peak 1.0 at the center, (2r+1) pixels across.
    /// `sigma` controls how quickly it fades toward the rim.
    /// Radii above [`MAX_GAUSSIAN_RADIUS`] are rejected.
    pub fn gaussian(radius: u32, sigma: f32) -> Result<Self, Error> {
        if radius > MAX_GAUSSIAN_RADIUS {
            return Err(Error::InvalidRadius(radius));
        }
        let r = radius as i32;
        let d = (2 * r + 1) as usize;
        let s2 = 2.0 * sigma * sigma;
        let mut opacity = Vec::with_capacity(d * d);
        let mut maxw = 0.0_f32;

        for y in -r..=r {
            for x in -r..=r {
                let r2 = (x * x + y * y) as f32;
                let w = if s2 > 0.0 { (-r2 / s2).exp() } else if r2 == 0.0 { 1.0 } else { 0.0 };
                maxw = maxw.max(w);
                opacity.push(w);
            }
        }
        // Peak 1.0, not sum 1.0: full strength at the center.
        if maxw > 0.0 {
            for w in &mut opacity { *w /= maxw; }
        }
        Ok(Self { footprint: BrushFootprint::new(d, d, opacity) })
    }

    pub fn footprint(&self) -> &BrushFootprint {
        &self.footprint
    }

    /// Bilinear opacity at continuous `(u, v)`; 0 outside `[0,1]²` (NaN included).
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return 0.0;
        }
        let fp = &self.footprint;
        let (w, h) = (fp.width(), fp.height());

        let x = u * (w - 1) as f32;
        let y = v * (h - 1) as f32;
        let x0 = (x.floor() as usize).min(w - 1);
        let y0 = (y.floor() as usize).min(h - 1);
        let x1 = (x0 + 1).min(w - 1);
        let y1 = (y0 + 1).min(h - 1);
        let fx = x - x0 as f32;
        let fy = y - y0 as f32;

        // a + (b - a) * t keeps flat regions exact
        let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
        let top = lerp(fp.at(x0, y0), fp.at(x1, y0), fx);
        let bottom = lerp(fp.at(x0, y1), fp.at(x1, y1), fx);
        lerp(top, bottom, fy).clamp(0.0, 1.0)
    }
}
