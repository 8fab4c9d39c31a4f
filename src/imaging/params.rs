//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between [`operations`](super::operations) (which decides where a
//! thumbnail goes and how big it is) and the [`backend`](super::backend)
//! (which does the actual pixel work), so the walker can run against a mock.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 80). Clamped on construction.
//! - [`ThumbnailParams`]: Full specification for one thumbnail: source, output,
//!   scale factor, crop window, quality, out-of-bounds crop policy.

use crate::config::CropPolicy;
use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Parameters for a thumbnail operation (downscale + center crop + re-encode).
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Divisor applied to both source dimensions before cropping.
    pub scale_factor: u32,
    /// Crop window dimensions.
    pub crop_width: u32,
    pub crop_height: u32,
    pub quality: Quality,
    pub crop_policy: CropPolicy,
    /// RGBA fill for [`CropPolicy::Pad`].
    pub pad_color: [u8; 4],
}
