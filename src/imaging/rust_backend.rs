//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Step | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, BMP, TIFF, WebP) | `image::ImageReader` with content sniffing |
//! | Downscale | `DynamicImage::resize_exact` with `CatmullRom` |
//! | Center crop | `DynamicImage::crop_imm`, or `imageops::overlay` onto a padded canvas |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (configurable quality) |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (lossless) |
//!
//! The output format always follows the format sniffed from the source
//! content, never the file extension.

use super::backend::{Dimensions, ImageBackend, SourceFormat, ThumbnailError, ThumbnailOutput};
use super::calculations::{center_crop, scaled_dimensions};
use super::params::ThumbnailParams;
use crate::config::CropPolicy;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, Rgba, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// A decoded source image, alive only while one file is processed.
pub struct DecodedImage {
    pub pixels: DynamicImage,
    pub format: SourceFormat,
}

impl DecodedImage {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::from((self.pixels.width(), self.pixels.height()))
    }
}

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-step mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Open and decode an image, detecting its format from the content.
///
/// The file handle is released when this returns, on success or failure.
pub fn decode(path: &Path) -> Result<DecodedImage, ThumbnailError> {
    let reader = ImageReader::open(path)
        .map_err(|e| ThumbnailError::decode(path, e))?
        .with_guessed_format()
        .map_err(|e| ThumbnailError::decode(path, e))?;
    let format = SourceFormat::from_image_format(reader.format());
    let pixels = reader
        .decode()
        .map_err(|e| ThumbnailError::decode(path, e))?;
    Ok(DecodedImage { pixels, format })
}

/// Shrink both dimensions by `factor`, truncating.
fn scale_down(img: &DynamicImage, factor: u32) -> Result<DynamicImage, ThumbnailError> {
    let (width, height) = scaled_dimensions((img.width(), img.height()), factor);
    if width == 0 || height == 0 {
        return Err(ThumbnailError::TooSmall {
            width: img.width(),
            height: img.height(),
            factor,
        });
    }
    Ok(img.resize_exact(width, height, FilterType::CatmullRom))
}

/// Cut the centered crop window out of `img`, applying the crop policy when
/// the window does not fit.
fn crop_center(img: &DynamicImage, params: &ThumbnailParams) -> Result<DynamicImage, ThumbnailError> {
    let dims = (img.width(), img.height());
    let rect = center_crop(dims, (params.crop_width, params.crop_height));

    if rect.fits_within(dims) {
        return Ok(img.crop_imm(rect.x as u32, rect.y as u32, rect.width, rect.height));
    }

    let out_of_bounds = || ThumbnailError::CropOutOfBounds {
        crop_width: params.crop_width,
        crop_height: params.crop_height,
        width: dims.0,
        height: dims.1,
    };

    match params.crop_policy {
        CropPolicy::Clamp => {
            let (x, y, width, height) = rect.clamp_to(dims).ok_or_else(out_of_bounds)?;
            Ok(img.crop_imm(x, y, width, height))
        }
        CropPolicy::Pad => {
            let mut canvas =
                RgbaImage::from_pixel(rect.width, rect.height, Rgba(params.pad_color));
            image::imageops::overlay(&mut canvas, &img.to_rgba8(), -rect.x, -rect.y);
            Ok(DynamicImage::ImageRgba8(canvas))
        }
        CropPolicy::Fail => Err(out_of_bounds()),
    }
}

fn create_output(path: &Path) -> Result<BufWriter<File>, ThumbnailError> {
    let file = File::create(path).map_err(|e| ThumbnailError::encode(path, e))?;
    Ok(BufWriter::new(file))
}

/// Encode `img` to `path` with the encoder matching the source format.
///
/// Unsupported formats are rejected before the output file is created.
fn save_image(
    img: &DynamicImage,
    path: &Path,
    format: &SourceFormat,
    quality: u32,
) -> Result<(), ThumbnailError> {
    match format {
        SourceFormat::Jpeg => {
            let writer = create_output(path)?;
            let encoder = JpegEncoder::new_with_quality(writer, quality as u8);
            // JPEG has no alpha channel
            DynamicImage::ImageRgb8(img.to_rgb8())
                .write_with_encoder(encoder)
                .map_err(|e| ThumbnailError::encode(path, e))
        }
        SourceFormat::Png => {
            let writer = create_output(path)?;
            img.write_with_encoder(PngEncoder::new(writer))
                .map_err(|e| ThumbnailError::encode(path, e))
        }
        SourceFormat::Unsupported(_) => Err(ThumbnailError::UnsupportedFormat(format.clone())),
    }
}

impl ImageBackend for RustBackend {
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<ThumbnailOutput, ThumbnailError> {
        let decoded = decode(&params.source)?;
        let resized = scale_down(&decoded.pixels, params.scale_factor)?;
        let cropped = crop_center(&resized, params)?;

        save_image(
            &cropped,
            &params.output,
            &decoded.format,
            params.quality.value(),
        )?;

        Ok(ThumbnailOutput {
            format: decoded.format,
            resized: Dimensions::from((resized.width(), resized.height())),
            written: Dimensions::from((cropped.width(), cropped.height())),
        })
    }
}
