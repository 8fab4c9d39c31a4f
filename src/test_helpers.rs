//! Shared test utilities for the gallery-manifest test suite.
//!
//! Images are synthesized with the `image` crate instead of being checked in,
//! so every test controls the exact dimensions and format it needs.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! create_test_jpeg(&tmp.path().join("images/dawn.jpg"), 200, 150);
//! touch(&tmp.path().join("images/notes.txt"));
//! ```

use crate::manifest::CatalogEntry;
use image::{ImageEncoder, ImageFormat, RgbImage, RgbaImage};
use std::path::Path;

// =========================================================================
// File fixtures
// =========================================================================

/// Create a placeholder file (and its parent directories).
pub fn touch(path: &Path) {
    ensure_parent(path);
    std::fs::write(path, "fake image").unwrap();
}

fn ensure_parent(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    ensure_parent(path);
    let img = gradient(width, height);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Create a small valid PNG file with the given dimensions.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    ensure_parent(path);
    gradient(width, height)
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

/// Create a small valid GIF file with the given dimensions.
pub fn create_test_gif(path: &Path, width: u32, height: u32) {
    ensure_parent(path);
    RgbaImage::from_pixel(width, height, image::Rgba([200, 100, 50, 255]))
        .save_with_format(path, ImageFormat::Gif)
        .unwrap();
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All entry urls in walk order.
pub fn entry_urls(entries: &[CatalogEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.url.as_str()).collect()
}

/// All entry titles in walk order.
pub fn entry_titles(entries: &[CatalogEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.title.as_str()).collect()
}
