//! Scratch-off mask engine.
//!
//! A [`MaskBuffer`] holds how much of a cover image is still present at each
//! texel. Dragging a brush calls [`MaskBuffer::erase`], which stamps the alpha
//! footprint of a [`BrushSampler`] into the grid with clamped subtraction.
//! The host reads the grid back through [`MaskBuffer::snapshot`] or an R8
//! [`MaskTexture`] and composites `cover * mask + reveal * (1 - mask)`.

pub mod brush;
pub mod config;
pub mod error;
pub mod input;
pub mod mask;
pub mod types;
pub mod upload;

pub use brush::{BrushSampler, BrushSource, ReadBack, MAX_GAUSSIAN_RADIUS};
pub use config::Config;
pub use error::Error;
pub use input::{texel_for_uv, ImageRect};
pub use mask::{MaskBuffer, SharedMask, ALPHA_SKIP_THRESHOLD};
pub use types::{BlendMode, BrushFootprint, TexelCoord};
pub use upload::{MaskTexture, MASK_TEXTURE_NAME};
