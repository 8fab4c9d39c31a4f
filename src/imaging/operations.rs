//! High-level thumbnail operations.
//!
//! These functions turn configuration into [`ThumbnailParams`], decide where
//! the thumbnail file lives, and hand the work to a backend.

use super::backend::{ImageBackend, ThumbnailError, ThumbnailOutput};
use super::params::{Quality, ThumbnailParams};
use crate::config::{CropPolicy, ThumbnailNaming, ThumbnailsConfig};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Result type for thumbnail operations.
pub type Result<T> = std::result::Result<T, ThumbnailError>;

/// Configuration for thumbnail generation.
#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    pub scale_factor: u32,
    pub crop: (u32, u32),
    pub quality: Quality,
    pub crop_policy: CropPolicy,
    pub pad_color: [u8; 4],
    pub naming: ThumbnailNaming,
}

impl ThumbnailConfig {
    pub fn from_catalog_config(config: &ThumbnailsConfig) -> Self {
        Self {
            scale_factor: config.scale_factor,
            crop: (config.crop_width, config.crop_height),
            quality: Quality::new(config.quality),
            crop_policy: config.crop_policy,
            pad_color: config.pad_color,
            naming: config.naming,
        }
    }
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self::from_catalog_config(&ThumbnailsConfig::default())
    }
}

/// File name of the thumbnail for a source file.
///
/// `source_url` is the project-relative source path; it only matters for
/// [`ThumbnailNaming::Hashed`], where it keeps same-named files from
/// different directories apart.
pub fn thumbnail_file_name(source: &Path, source_url: &str, naming: ThumbnailNaming) -> String {
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    match naming {
        ThumbnailNaming::Basename => file_name,
        ThumbnailNaming::Hashed => {
            let digest = Sha256::digest(source_url.as_bytes());
            let short: String = digest[..4].iter().map(|b| format!("{b:02x}")).collect();
            match file_name.rsplit_once('.') {
                Some((stem, ext)) => format!("{stem}-{short}.{ext}"),
                None => format!("{file_name}-{short}"),
            }
        }
    }
}

/// Plan a thumbnail operation without executing it.
pub fn plan_thumbnail(
    source: &Path,
    source_url: &str,
    thumbnail_dir: &Path,
    config: &ThumbnailConfig,
) -> ThumbnailParams {
    let output: PathBuf =
        thumbnail_dir.join(thumbnail_file_name(source, source_url, config.naming));

    ThumbnailParams {
        source: source.to_path_buf(),
        output,
        scale_factor: config.scale_factor,
        crop_width: config.crop.0,
        crop_height: config.crop.1,
        quality: config.quality,
        crop_policy: config.crop_policy,
        pad_color: config.pad_color,
    }
}

/// Create a thumbnail image from planned parameters.
pub fn create_thumbnail(
    backend: &impl ImageBackend,
    params: &ThumbnailParams,
) -> Result<ThumbnailOutput> {
    backend.thumbnail(params)
}
