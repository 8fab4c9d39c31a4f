//! Gallery manifest: the JSON document front-end code reads.
//!
//! ```json
//! {
//!   "images": [
//!     {
//!       "title": "dawn",
//!       "url": "images/landscapes/dawn.jpg",
//!       "alt": "dawn",
//!       "thumbnail": "assets/thumbnail/dawn.jpg"
//!     }
//!   ]
//! }
//! ```
//!
//! Records appear in walk order. `thumbnail` is omitted when thumbnail
//! generation was not attempted. When it was attempted and failed, the record
//! still carries the path the thumbnail would have had, unless the manifest is
//! built in strict mode, in which case the record is dropped.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Cannot create manifest directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot write manifest {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One image as published in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// File name without its last extension.
    pub title: String,
    /// Source path relative to the project root, `/`-separated.
    pub url: String,
    /// Alternative text; the title unless something better is known.
    pub alt: String,
    /// Thumbnail path relative to the project root, `/`-separated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Outcome of the thumbnail step for one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailStatus {
    /// The file at `url` was written.
    Generated { url: String },
    /// Generation was attempted and failed; `url` is where it would have gone.
    Failed { url: String, reason: String },
    /// Thumbnails are disabled for this run.
    NotAttempted,
}

impl ThumbnailStatus {
    /// The path the manifest publishes, dangling or not.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Generated { url } | Self::Failed { url, .. } => Some(url),
            Self::NotAttempted => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// A discovered image: what the walker knows about it.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// Absolute path of the source file.
    pub source: PathBuf,
    pub title: String,
    pub url: String,
    pub thumbnail: ThumbnailStatus,
}

impl CatalogEntry {
    pub fn to_record(&self) -> ImageRecord {
        ImageRecord {
            title: self.title.clone(),
            url: self.url.clone(),
            alt: self.title.clone(),
            thumbnail: self.thumbnail.url().map(str::to_string),
        }
    }
}

/// The ordered list of image records, written once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub images: Vec<ImageRecord>,
}

impl Manifest {
    /// Build the manifest from catalog entries, preserving their order.
    ///
    /// With `strict`, entries whose thumbnail failed are left out.
    pub fn build(entries: &[CatalogEntry], strict: bool) -> Self {
        let images = entries
            .iter()
            .filter(|e| !(strict && e.thumbnail.is_failed()))
            .map(CatalogEntry::to_record)
            .collect();
        Self { images }
    }

    /// Serialize with 2-space indentation.
    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the manifest to `dir/file_name`, creating `dir` if needed and
    /// replacing any previous file. Returns the written path.
    pub fn persist(&self, dir: &Path, file_name: &str) -> Result<PathBuf, ManifestError> {
        fs::create_dir_all(dir).map_err(|source| ManifestError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(file_name);
        let json = self.to_json()?;
        fs::write(&path, json).map_err(|source| ManifestError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Read a previously written manifest.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(title: &str, thumbnail: ThumbnailStatus) -> CatalogEntry {
        CatalogEntry {
            source: PathBuf::from(format!("/p/images/{title}.jpg")),
            title: title.to_string(),
            url: format!("images/{title}.jpg"),
            thumbnail,
        }
    }

    fn generated(title: &str) -> ThumbnailStatus {
        ThumbnailStatus::Generated {
            url: format!("assets/thumbnail/{title}.jpg"),
        }
    }

    fn failed(title: &str) -> ThumbnailStatus {
        ThumbnailStatus::Failed {
            url: format!("assets/thumbnail/{title}.jpg"),
            reason: "decode".to_string(),
        }
    }

    #[test]
    fn record_alt_defaults_to_title() {
        let record = entry("dawn", generated("dawn")).to_record();
        assert_eq!(record.title, "dawn");
        assert_eq!(record.alt, "dawn");
        assert_eq!(record.url, "images/dawn.jpg");
        assert_eq!(record.thumbnail.as_deref(), Some("assets/thumbnail/dawn.jpg"));
    }

    #[test]
    fn build_preserves_order() {
        let entries = vec![
            entry("b", generated("b")),
            entry("a", generated("a")),
            entry("c", generated("c")),
        ];
        let manifest = Manifest::build(&entries, false);
        let titles: Vec<&str> = manifest.images.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "a", "c"]);
    }

    #[test]
    fn failed_thumbnail_keeps_dangling_reference() {
        let entries = vec![entry("broken", failed("broken"))];
        let manifest = Manifest::build(&entries, false);
        assert_eq!(manifest.images.len(), 1);
        assert_eq!(
            manifest.images[0].thumbnail.as_deref(),
            Some("assets/thumbnail/broken.jpg")
        );
    }

    #[test]
    fn strict_drops_failed_thumbnails() {
        let entries = vec![
            entry("ok", generated("ok")),
            entry("broken", failed("broken")),
            entry("plain", ThumbnailStatus::NotAttempted),
        ];
        let manifest = Manifest::build(&entries, true);
        let titles: Vec<&str> = manifest.images.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["ok", "plain"]);
    }

    #[test]
    fn not_attempted_omits_thumbnail_field() {
        let manifest = Manifest::build(&[entry("a", ThumbnailStatus::NotAttempted)], false);
        let json = manifest.to_json().unwrap();
        assert!(!json.contains("thumbnail"));
    }

    #[test]
    fn json_shape_and_indentation() {
        let manifest = Manifest::build(&[entry("dawn", generated("dawn"))], false);
        let json = manifest.to_json().unwrap();
        let expected = r#"{
  "images": [
    {
      "title": "dawn",
      "url": "images/dawn.jpg",
      "alt": "dawn",
      "thumbnail": "assets/thumbnail/dawn.jpg"
    }
  ]
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn empty_manifest_still_has_images_key() {
        let json = Manifest::default().to_json().unwrap();
        assert_eq!(json, "{\n  \"images\": []\n}");
    }

    #[test]
    fn persist_creates_directory_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("data");

        let first = Manifest::build(
            &[entry("a", generated("a")), entry("b", generated("b"))],
            false,
        );
        let path = first.persist(&dir, "images.json").unwrap();
        assert_eq!(path, dir.join("images.json"));

        let second = Manifest::build(&[entry("c", generated("c"))], false);
        second.persist(&dir, "images.json").unwrap();

        let loaded = Manifest::load(&path).unwrap();
        assert_eq!(loaded, second);
    }

    #[test]
    fn persist_into_file_path_fails() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("data");
        fs::write(&blocker, "not a directory").unwrap();

        let result = Manifest::default().persist(&blocker, "images.json");
        assert!(matches!(result, Err(ManifestError::CreateDir { .. })));
    }

    #[test]
    fn load_parses_records_back() {
        let tmp = TempDir::new().unwrap();
        let manifest = Manifest::build(
            &[
                entry("x", generated("x")),
                entry("y", ThumbnailStatus::NotAttempted),
            ],
            false,
        );
        let path = manifest.persist(tmp.path(), "images.json").unwrap();

        let loaded = Manifest::load(&path).unwrap();
        assert_eq!(loaded.images, manifest.images);
        assert_eq!(loaded.images[1].thumbnail, None);
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let result = Manifest::load(Path::new("/nonexistent/images.json"));
        assert!(matches!(result, Err(ManifestError::Read { .. })));
    }
}
