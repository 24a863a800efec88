// The erasable mask: a square grid of "remaining opacity" per texel.
// 1.0 = untouched cover, 0.0 = fully scratched off. Values only ever go down.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};

use crate::brush::BrushSampler;
use crate::error::Error;
use crate::types::{BlendMode, TexelCoord};

/// Brush samples below this are treated as no coverage (noise floor of the footprint).
pub const ALPHA_SKIP_THRESHOLD: f32 = 0.01;

pub struct MaskBuffer {
    resolution: usize,
    remaining: Vec<f32>, // resolution * resolution, row-major, y * resolution + x
    brush: BrushSampler,
    blend: BlendMode,
    dirty: bool,
    generation: u64, // completed erase calls
}

impl MaskBuffer {
    /// All-ones grid of `resolution × resolution` texels, subtractive blending.
    pub fn new(resolution: u32, brush: BrushSampler) -> Result<Self, Error> {
        Self::with_blend(resolution, brush, BlendMode::Subtract)
    }

    pub fn with_blend(resolution: u32, brush: BrushSampler, blend: BlendMode) -> Result<Self, Error> {
        if resolution == 0 {
            return Err(Error::InvalidResolution(resolution));
        }
        let n = resolution as usize;
        info!("mask {n}x{n} allocated ({blend:?} blending)");
        Ok(Self {
            resolution: n,
            remaining: vec![1.0; n * n],
            brush,
            blend,
            // the fresh all-ones grid still has to reach the renderer once
            dirty: true,
            generation: 0,
        })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn blend(&self) -> BlendMode {
        self.blend
    }

    pub fn brush(&self) -> &BrushSampler {
        &self.brush
    }

    /// Stamp the brush over the `2r × 2r` box centered on `center`.
    ///
    /// The box is clipped to the grid, but brush coordinates stay anchored to
    /// the requested (unclipped) box. Texels outside the grid, outside the
    /// brush square, or under brush alpha < [`ALPHA_SKIP_THRESHOLD`] are left
    /// bit-for-bit unchanged. A radius of 0 is clamped to 1.
    ///
    /// Returns how many texels received a brush sample.
    pub fn erase(&mut self, center: TexelCoord, radius: u32) -> usize {
        let r = if radius == 0 {
            warn!("erase called with radius 0; clamping to 1 texel");
            1
        } else {
            i64::from(radius)
        };
        let res = self.resolution as i64;
        let (cx, cy) = (i64::from(center.x), i64::from(center.y));

        let min_x = (cx - r).clamp(0, res - 1);
        let max_x = (cx + r).clamp(0, res - 1);
        let min_y = (cy - r).clamp(0, res - 1);
        let max_y = (cy + r).clamp(0, res - 1);
        let span = (2 * r) as f32;

        let mut touched = 0usize;
        for y in min_y..=max_y {
            let bv = (y - (cy - r)) as f32 / span;
            if !(0.0..=1.0).contains(&bv) {
                continue;
            }
            let row = y as usize * self.resolution;
            for x in min_x..=max_x {
                let bu = (x - (cx - r)) as f32 / span;
                if !(0.0..=1.0).contains(&bu) {
                    continue;
                }

                let a = self.brush.sample(bu, bv);
                if a < ALPHA_SKIP_THRESHOLD {
                    continue;
                }

                let idx = row + x as usize;
                let after = match self.blend {
                    BlendMode::Subtract => (self.remaining[idx] - a).max(0.0),
                    BlendMode::Cut => 0.0,
                };
                debug_assert!((0.0..=1.0).contains(&after), "mask texel {idx} left [0,1]: {after}");
                self.remaining[idx] = after;
                touched += 1;
            }
        }

        // Even an empty stroke re-flags the grid; the host re-uploads after every call.
        self.dirty = true;
        self.generation += 1;
        debug!(
            "erase at ({}, {}) r={} -> {} texels",
            center.x, center.y, r, touched
        );
        touched
    }

    /// Read-only view of the grid after the last completed `erase`.
    pub fn snapshot(&self) -> &[f32] {
        &self.remaining
    }

    /// Remaining opacity at `(x, y)`, `None` outside the grid.
    pub fn texel(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.resolution || y >= self.resolution {
            return None;
        }
        Some(self.remaining[y * self.resolution + x])
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of completed `erase` calls. Lets independent readers tell whether
    /// their copy is stale without touching the shared dirty flag.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns whether the grid changed since the last call, and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Mean of `1 - remaining` over the grid: 0.0 untouched, 1.0 fully revealed.
    pub fn erased_fraction(&self) -> f64 {
        let erased: f64 = self.remaining.iter().map(|&r| 1.0 - f64::from(r)).sum();
        erased / self.remaining.len() as f64
    }
}

/// A mask that may be erased from several threads.
/// One lock covers the whole grid; each stroke and each snapshot copy holds it
/// from start to finish, so readers never see half a stroke.
#[derive(Clone)]
pub struct SharedMask {
    inner: Arc<Mutex<MaskBuffer>>,
}

impl SharedMask {
    pub fn new(mask: MaskBuffer) -> Self {
        Self { inner: Arc::new(Mutex::new(mask)) }
    }

    fn lock(&self) -> MutexGuard<'_, MaskBuffer> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn erase(&self, center: TexelCoord, radius: u32) -> usize {
        self.lock().erase(center, radius)
    }

    /// Copy of the grid as of the last completed stroke.
    pub fn snapshot(&self) -> Vec<f32> {
        self.lock().snapshot().to_vec()
    }

    /// Copy the grid into `out` unless `seen` already holds the current generation.
    /// Each reader keeps its own `seen`, starting at `None`; the mask's dirty
    /// flag is left alone. Returns whether a copy was made.
    pub fn copy_if_newer(&self, out: &mut Vec<f32>, seen: &mut Option<u64>) -> bool {
        let mask = self.lock();
        if *seen == Some(mask.generation()) {
            return false;
        }
        out.clear();
        out.extend_from_slice(mask.snapshot());
        *seen = Some(mask.generation());
        true
    }

    /// Run `f` against the grid while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&MaskBuffer) -> R) -> R {
        f(&self.lock())
    }
}
