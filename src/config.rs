//! Catalog configuration module.
//!
//! Handles loading, validating, and merging `catalog.toml`. Stock defaults
//! reproduce the historical fixed layout (`images/` → `assets/thumbnail/` +
//! `data/images.json`, 415×415 crops of a 1/5 downscale); a user file in the
//! project root overrides any subset of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! images = "images"              # Source tree, relative to the project root
//! thumbnails = "assets/thumbnail" # Flat thumbnail output directory
//! data = "data"                  # Directory receiving the manifest
//! manifest = "images.json"       # Manifest file name
//!
//! [thumbnails]
//! enabled = true
//! scale_factor = 5               # Each dimension divided by this before cropping
//! crop_width = 415
//! crop_height = 415
//! quality = 80                   # JPEG quality (1-100); PNG is always lossless
//! crop_policy = "clamp"          # clamp | pad | fail
//! pad_color = [255, 255, 255, 255]
//! naming = "basename"            # basename | hashed
//!
//! [manifest]
//! strict = false                 # Drop records whose thumbnail failed
//!
//! [scan]
//! follow_links = true
//! ```
//!
//! Config files are sparse and unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the optional config file in the project root.
pub const CONFIG_FILENAME: &str = "catalog.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Catalog configuration loaded from `catalog.toml`.
///
/// All fields have defaults matching the original fixed layout. User config
/// files need only specify the values they want to override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Directory layout below the project root.
    pub paths: PathsConfig,
    /// Thumbnail derivation settings.
    pub thumbnails: ThumbnailsConfig,
    /// Manifest emission settings.
    pub manifest: ManifestConfig,
    /// Source tree traversal settings.
    pub scan: ScanConfig,
}

impl CatalogConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thumbnails;
        if t.scale_factor == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.scale_factor must be at least 1".into(),
            ));
        }
        if t.crop_width == 0 || t.crop_height == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.crop_width and crop_height must be non-zero".into(),
            ));
        }
        if !(1..=100).contains(&t.quality) {
            return Err(ConfigError::Validation(
                "thumbnails.quality must be 1-100".into(),
            ));
        }

        let p = &self.paths;
        for (key, value) in [
            ("images", &p.images),
            ("thumbnails", &p.thumbnails),
            ("data", &p.data),
            ("manifest", &p.manifest),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "paths.{key} must not be empty"
                )));
            }
        }
        if p.manifest.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "paths.manifest must be a file name, not a path".into(),
            ));
        }
        Ok(())
    }
}

/// Directory layout, every entry relative to the project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Source image tree.
    pub images: String,
    /// Flat directory receiving generated thumbnails.
    pub thumbnails: String,
    /// Directory receiving the manifest.
    pub data: String,
    /// Manifest file name inside `data`.
    pub manifest: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            images: "images".to_string(),
            thumbnails: "assets/thumbnail".to_string(),
            data: "data".to_string(),
            manifest: "images.json".to_string(),
        }
    }
}

/// What to do when the centered crop window is larger than the resized image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropPolicy {
    /// Intersect the window with the image; the thumbnail comes out smaller.
    #[default]
    Clamp,
    /// Keep the full window size, filling uncovered pixels with `pad_color`.
    Pad,
    /// Treat the image as unprocessable.
    Fail,
}

/// How thumbnail file names are derived from source files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailNaming {
    /// Same file name as the source. Same-named sources in different
    /// directories overwrite each other; the last one walked wins.
    #[default]
    Basename,
    /// `<stem>-<hash>.<ext>`, hash taken over the project-relative source path.
    Hashed,
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Generate thumbnails at all. When off, records carry no `thumbnail` field.
    pub enabled: bool,
    /// Both dimensions are divided (truncating) by this factor before cropping.
    pub scale_factor: u32,
    /// Width of the centered crop window.
    pub crop_width: u32,
    /// Height of the centered crop window.
    pub crop_height: u32,
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
    /// Behavior when the crop window exceeds the resized image.
    pub crop_policy: CropPolicy,
    /// RGBA fill used by the `pad` crop policy.
    pub pad_color: [u8; 4],
    /// Thumbnail file naming scheme.
    pub naming: ThumbnailNaming,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scale_factor: 5,
            crop_width: 415,
            crop_height: 415,
            quality: 80,
            crop_policy: CropPolicy::Clamp,
            pad_color: [255, 255, 255, 255],
            naming: ThumbnailNaming::Basename,
        }
    }
}

/// Manifest emission settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Drop records whose thumbnail could not be generated instead of
    /// publishing a reference to a file that does not exist.
    pub strict: bool,
}

/// Source tree traversal settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Descend into symlinked directories and catalog symlinked files.
    /// Symlink loops are detected and skipped.
    pub follow_links: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { follow_links: true }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(CatalogConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `catalog.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist, `Err` if it exists but is
/// not valid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<CatalogConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CatalogConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `catalog.toml` in the project root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(project_root: &Path) -> Result<CatalogConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(project_root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `catalog.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Gallery Manifest Configuration
# ==============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Place this file in the project root
# as catalog.toml. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Layout (all paths relative to the project root)
# ---------------------------------------------------------------------------
[paths]
# Source image tree, walked recursively.
images = "images"

# Flat directory receiving one thumbnail per source image.
thumbnails = "assets/thumbnail"

# Directory receiving the manifest, created if missing.
data = "data"

# Manifest file name. Rewritten from scratch on every run.
manifest = "images.json"

# ---------------------------------------------------------------------------
# Thumbnails
# ---------------------------------------------------------------------------
[thumbnails]
# Set to false to emit a manifest without thumbnail entries.
enabled = true

# Source dimensions are divided by this factor (integer truncation),
# then a centered crop_width x crop_height window is cut out.
scale_factor = 5
crop_width = 415
crop_height = 415

# JPEG quality (1 = worst, 100 = best). PNG output is always lossless.
quality = 80

# When the downscaled image is smaller than the crop window:
#   "clamp" - keep only the part of the window covered by the image
#   "pad"   - keep the full window, filling the rest with pad_color
#   "fail"  - skip the thumbnail for that image
crop_policy = "clamp"
pad_color = [255, 255, 255, 255]

# "basename" keeps the source file name (same-named files in different
# folders overwrite each other); "hashed" appends a hash of the source path.
naming = "basename"

# ---------------------------------------------------------------------------
# Manifest
# ---------------------------------------------------------------------------
[manifest]
# Drop images whose thumbnail failed instead of listing a missing file.
strict = false

# ---------------------------------------------------------------------------
# Scanning
# ---------------------------------------------------------------------------
[scan]
# Follow symlinked files and directories. Loops are detected and skipped.
follow_links = true
"##
}
