//! Run driver: layout resolution, output bootstrapping, walk, manifest write.
//!
//! ```text
//! Layout::resolve   project root + catalog.toml paths → absolute directories
//! run               mkdir thumbnails → scan (thumbnails per image) → build → persist
//! check             scan only, no thumbnails, nothing written
//! ```
//!
//! Structural failures (missing source tree, uncreatable thumbnail directory,
//! unreadable directory, unwritable manifest) abort the run with a
//! [`PipelineError`]. Per-image failures never reach this level; they are
//! counted in the [`RunSummary`].

use crate::config::{CatalogConfig, PathsConfig};
use crate::imaging::{ImageBackend, RustBackend};
use crate::manifest::{CatalogEntry, Manifest, ManifestError, ThumbnailStatus};
use crate::scan::{ScanError, scan};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Project root not found: {path}: {source}")]
    ProjectRoot {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Images folder not found: {0}")]
    SourceMissing(PathBuf),
    #[error("Cannot create thumbnail directory {path}: {source}")]
    ThumbnailDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

/// Absolute locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub project_root: PathBuf,
    pub source: PathBuf,
    pub thumbnail_dir: PathBuf,
    pub data_dir: PathBuf,
    pub manifest_file: String,
}

impl Layout {
    /// Resolve the run layout under `project_root`.
    ///
    /// The project root and the source tree must exist. Only the root is
    /// canonicalized: a symlinked `images/` keeps its in-root spelling so
    /// manifest urls stay `images/...`. `source` overrides `paths.images`
    /// when given.
    pub fn resolve(
        project_root: &Path,
        source: Option<&Path>,
        paths: &PathsConfig,
    ) -> Result<Self, PipelineError> {
        let root = fs::canonicalize(project_root).map_err(|e| PipelineError::ProjectRoot {
            path: project_root.to_path_buf(),
            source: e,
        })?;

        let source = match source {
            Some(dir) => source_override(dir, project_root, &root),
            None => root.join(&paths.images),
        };
        if !source.is_dir() {
            return Err(PipelineError::SourceMissing(source));
        }

        Ok(Self {
            thumbnail_dir: root.join(&paths.thumbnails),
            data_dir: root.join(&paths.data),
            manifest_file: paths.manifest.clone(),
            project_root: root,
            source,
        })
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.data_dir.join(&self.manifest_file)
    }
}

/// Place a `--source` override relative to the canonical root.
///
/// A directory under the project root is rebased onto it without resolving
/// links; anything outside is canonicalized.
fn source_override(dir: &Path, project_root: &Path, root: &Path) -> PathBuf {
    let absolute = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
    if let Ok(rest) = absolute.strip_prefix(root) {
        return root.join(rest);
    }
    if let Ok(given_root) = std::path::absolute(project_root)
        && let Ok(rest) = absolute.strip_prefix(&given_root)
    {
        return root.join(rest);
    }
    fs::canonicalize(&absolute).unwrap_or(absolute)
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct RunSummary {
    /// Every discovered image, including ones left out of a strict manifest.
    pub entries: Vec<CatalogEntry>,
    pub manifest: Manifest,
    pub manifest_path: PathBuf,
}

impl RunSummary {
    pub fn generated(&self) -> usize {
        self.count(|s| matches!(s, ThumbnailStatus::Generated { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(ThumbnailStatus::is_failed)
    }

    /// Entries discovered but not published (strict mode only).
    pub fn dropped(&self) -> usize {
        self.entries.len() - self.manifest.images.len()
    }

    fn count(&self, pred: impl Fn(&ThumbnailStatus) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.thumbnail)).count()
    }
}

/// Full run with the production image backend.
pub fn run(layout: &Layout, config: &CatalogConfig) -> Result<RunSummary, PipelineError> {
    run_with_backend(&RustBackend::new(), layout, config)
}

/// Full run using a specific backend (allows testing with mock).
pub fn run_with_backend(
    backend: &impl ImageBackend,
    layout: &Layout,
    config: &CatalogConfig,
) -> Result<RunSummary, PipelineError> {
    if config.thumbnails.enabled {
        fs::create_dir_all(&layout.thumbnail_dir).map_err(|source| {
            PipelineError::ThumbnailDir {
                path: layout.thumbnail_dir.clone(),
                source,
            }
        })?;
    }

    info!(source = %layout.source.display(), "scanning images");
    let entries = scan(
        backend,
        &layout.source,
        &layout.project_root,
        &layout.thumbnail_dir,
        config,
    )?;

    let manifest = Manifest::build(&entries, config.manifest.strict);
    let manifest_path = manifest.persist(&layout.data_dir, &layout.manifest_file)?;
    info!(
        path = %manifest_path.display(),
        images = manifest.images.len(),
        "manifest written"
    );

    Ok(RunSummary {
        entries,
        manifest,
        manifest_path,
    })
}

/// Walk the source tree without generating thumbnails or writing anything.
pub fn check(layout: &Layout, config: &CatalogConfig) -> Result<Vec<CatalogEntry>, PipelineError> {
    let mut dry = config.clone();
    dry.thumbnails.enabled = false;
    Ok(scan(
        &RustBackend::new(),
        &layout.source,
        &layout.project_root,
        &layout.thumbnail_dir,
        &dry,
    )?)
}
