//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the seam between the walker and the pixel
//! work: one call turns a source file into a thumbnail file. The production
//! implementation is [`RustBackend`](super::rust_backend::RustBackend); tests
//! use the recording `MockBackend` below.

use super::params::ThumbnailParams;
use image::ImageFormat;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a single image produced no thumbnail.
///
/// Every variant is local to one file: the walker logs it and moves on.
#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("Failed to encode {path}: {reason}")]
    Encode { path: PathBuf, reason: String },
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(SourceFormat),
    #[error("Image {width}x{height} is too small to scale down by {factor}")]
    TooSmall { width: u32, height: u32, factor: u32 },
    #[error("Crop {crop_width}x{crop_height} exceeds resized image {width}x{height}")]
    CropOutOfBounds {
        crop_width: u32,
        crop_height: u32,
        width: u32,
        height: u32,
    },
}

impl ThumbnailError {
    pub(crate) fn decode(path: &Path, reason: impl fmt::Display) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn encode(path: &Path, reason: impl fmt::Display) -> Self {
        Self::Encode {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Format class detected from file content at decode time.
///
/// Only JPEG and PNG have a matching encoder; everything else decodes fine but
/// fails when the thumbnail is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFormat {
    Jpeg,
    Png,
    Unsupported(String),
}

impl SourceFormat {
    pub fn from_image_format(format: Option<ImageFormat>) -> Self {
        match format {
            Some(ImageFormat::Jpeg) => Self::Jpeg,
            Some(ImageFormat::Png) => Self::Png,
            Some(other) => Self::Unsupported(
                other
                    .extensions_str()
                    .first()
                    .copied()
                    .unwrap_or("unknown")
                    .to_string(),
            ),
            None => Self::Unsupported("unknown".to_string()),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jpeg => f.write_str("jpeg"),
            Self::Png => f.write_str("png"),
            Self::Unsupported(name) => f.write_str(name),
        }
    }
}

/// Pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// What a successful thumbnail operation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailOutput {
    pub format: SourceFormat,
    /// Size after the proportional downscale.
    pub resized: Dimensions,
    /// Size of the file actually written.
    pub written: Dimensions,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Decode `params.source`, downscale, center-crop and encode to
    /// `params.output` in the source's format.
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<ThumbnailOutput, ThumbnailError>;
}
