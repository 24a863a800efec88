// One error type for the whole crate.
// Every variant states *where* things went wrong.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Mask grid side length must be at least 1.
    #[error("mask resolution must be >= 1 (got {0})")]
    InvalidResolution(u32),
    /// Brush radius must be at least 1 texel.
    #[error("erase radius must be >= 1 texel (got {0})")]
    InvalidRadius(u32),
    /// Opening or decoding an image (brush, cover, reveal) failed.
    #[error("image decode error ({}): {source}", .path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// The off-screen render-and-read-back of a GPU-resident brush failed.
    #[error("brush read-back error: {0}")]
    BrushReadback(String),
    #[error("brush image has no pixels ({width}x{height})")]
    EmptyBrush { width: u32, height: u32 },
    #[error("config error ({}): {message}", .path.display())]
    Config { path: PathBuf, message: String },
    /// Cover, reveal, mask and screen disagree on size.
    #[error("composite error: {0}")]
    Composite(String),
    #[error("window init error: {0}")]
    WindowInit(String),
    #[error("window update error: {0}")]
    WindowUpdate(String),
}
