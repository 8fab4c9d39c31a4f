//! Source tree walk: image discovery plus per-image thumbnail generation.
//!
//! ## Directory Structure
//!
//! ```text
//! project/                         # Project root; all manifest paths are relative to it
//! ├── images/                      # Source tree, any depth
//! │   ├── dawn.jpg
//! │   ├── notes.txt                # Not an image: never opened, never listed
//! │   └── travel/
//! │       ├── kyoto.png
//! │       └── rome.JPG
//! ├── assets/thumbnail/            # Flat thumbnail output
//! └── data/images.json             # Manifest
//! ```
//!
//! ## Traversal
//!
//! Depth-first, each directory's entries in file-name order, so two runs over
//! the same tree always produce the same sequence. Symlinks are followed by
//! default; a link pointing back at one of its ancestors is reported and
//! skipped rather than recursed into.
//!
//! ## Classification
//!
//! A file is an image when its name ends in one of [`IMAGE_EXTENSIONS`],
//! compared case-insensitively. Content is not inspected here; a mislabeled or
//! corrupt file is caught later by the decoder and only costs that image its
//! thumbnail.
//!
//! ## Failure Policy
//!
//! Per-image thumbnail failures are logged and recorded in the entry's
//! [`ThumbnailStatus`]; the walk continues. Only traversal errors (missing
//! root, unreadable directory) abort the walk.

use crate::config::CatalogConfig;
use crate::imaging::{ImageBackend, ThumbnailConfig, create_thumbnail, plan_thumbnail};
use crate::manifest::{CatalogEntry, ThumbnailStatus};
use std::fs;
use std::io;
use std::path::{Component, Path};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// File name suffixes treated as images.
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".webp"];

/// Walk `source`, generating thumbnails into `thumbnail_dir` when enabled.
///
/// Returns one entry per discovered image, in walk order. Paths in the
/// entries are relative to `project_root`.
pub fn scan(
    backend: &impl ImageBackend,
    source: &Path,
    project_root: &Path,
    thumbnail_dir: &Path,
    config: &CatalogConfig,
) -> Result<Vec<CatalogEntry>, ScanError> {
    let thumbnail_config = config
        .thumbnails
        .enabled
        .then(|| ThumbnailConfig::from_catalog_config(&config.thumbnails));

    let walker = WalkDir::new(source)
        .follow_links(config.scan.follow_links)
        .sort_by_file_name();

    let mut entries = Vec::new();
    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) if err.loop_ancestor().is_some() => {
                warn!(path = ?err.path(), "skipping symlink loop");
                continue;
            }
            Err(err) if err.path().is_some_and(is_broken_symlink) => {
                warn!(path = ?err.path(), error = %err, "skipping broken symlink");
                continue;
            }
            Err(err) => return Err(ScanError::Walk(err)),
        };

        if entry.file_type().is_dir() {
            continue;
        }
        if !is_image(&entry.file_name().to_string_lossy()) {
            continue;
        }

        entries.push(catalog_image(
            backend,
            entry.path(),
            project_root,
            thumbnail_dir,
            thumbnail_config.as_ref(),
        ));
    }

    Ok(entries)
}

/// Build the entry for one image, running the thumbnail step if configured.
fn catalog_image(
    backend: &impl ImageBackend,
    path: &Path,
    project_root: &Path,
    thumbnail_dir: &Path,
    thumbnail_config: Option<&ThumbnailConfig>,
) -> CatalogEntry {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let title = image_title(&file_name);
    let url = relative_url(project_root, path);

    let thumbnail = match thumbnail_config {
        None => ThumbnailStatus::NotAttempted,
        Some(config) => {
            let params = plan_thumbnail(path, &url, thumbnail_dir, config);
            let thumb_url = relative_url(project_root, &params.output);
            match create_thumbnail(backend, &params) {
                Ok(output) => {
                    debug!(
                        source = %url,
                        thumbnail = %thumb_url,
                        resized = %output.resized,
                        written = %output.written,
                        "thumbnail written"
                    );
                    ThumbnailStatus::Generated { url: thumb_url }
                }
                Err(err) => {
                    warn!(source = %url, error = %err, "thumbnail failed, keeping image");
                    ThumbnailStatus::Failed {
                        url: thumb_url,
                        reason: err.to_string(),
                    }
                }
            }
        }
    };

    CatalogEntry {
        source: path.to_path_buf(),
        title,
        url,
        thumbnail,
    }
}

/// A link whose target does not exist. Links to unreadable targets are not
/// broken; listing them fails the walk like any other directory.
fn is_broken_symlink(path: &Path) -> bool {
    let is_link = path
        .symlink_metadata()
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    is_link && matches!(fs::metadata(path), Err(e) if e.kind() == io::ErrorKind::NotFound)
}

/// Whether a file name carries one of the image extensions.
pub fn is_image(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Title for an image: the file name minus its last extension.
///
/// - `photo.JPG` → `photo`
/// - `archive.tar.png` → `archive.tar`
/// - `.png` → `` (the whole name is the extension)
pub fn image_title(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(dot) => file_name[..dot].to_string(),
        None => file_name.to_string(),
    }
}

/// Path of `path` relative to `base`, joined with `/` on every platform.
///
/// Paths outside `base` climb out with `..` segments.
pub fn relative_url(base: &Path, path: &Path) -> String {
    let base: Vec<Component> = base.components().collect();
    let target: Vec<Component> = path.components().collect();
    let common = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = vec!["..".to_string(); base.len() - common];
    parts.extend(
        target[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().to_string()),
    );
    parts.join("/")
}
