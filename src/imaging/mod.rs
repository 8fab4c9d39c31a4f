//! Thumbnail derivation in pure Rust via the `image` crate.
//!
//! | Step | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader::with_guessed_format` |
//! | **Downscale** | `resize_exact` with Catmull-Rom, both edges divided by the scale factor |
//! | **Crop** | centered window, out-of-bounds handled by [`CropPolicy`](crate::config::CropPolicy) |
//! | **Encode** | JPEG (quality) or PNG (lossless), matching the source |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for scale and crop geometry (unit testable)
//! - **Parameters**: Data structures describing one thumbnail operation
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Naming and planning on top of the backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{Dimensions, ImageBackend, SourceFormat, ThumbnailError, ThumbnailOutput};
pub use calculations::{CropRect, center_crop, scaled_dimensions};
pub use operations::{ThumbnailConfig, create_thumbnail, plan_thumbnail, thumbnail_file_name};
pub use params::{Quality, ThumbnailParams};
pub use rust_backend::RustBackend;
