//! CLI output formatting for `build` and `check`.
//!
//! # Information-First Display
//!
//! Every image is shown by its positional index and title, with the manifest
//! paths as indented context lines. The listing reads as a content inventory
//! while still pointing at the exact files involved.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Images
//! 001 dawn
//!     Source: images/dawn.jpg
//!     Thumbnail: assets/thumbnail/dawn.jpg
//! 002 (.png)
//!     Source: images/.png
//!     Thumbnail: failed (Failed to decode ...)
//!
//! Wrote data/images.json: 2 images, 1 thumbnail, 1 failed
//! ```
//!
//! ## Check
//!
//! ```text
//! Images
//! 001 dawn
//!     Source: images/dawn.jpg
//!
//! Found 1 image
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! do no I/O.

use crate::manifest::{CatalogEntry, ThumbnailStatus};
use crate::pipeline::RunSummary;
use crate::scan::relative_url;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an image line: titled images show title, untitled show filename in parens.
///
/// ```text
/// 001 sunset            // titled
/// 001 (.png)            // empty title, the filename is the identity
/// ```
fn image_line(index: usize, title: &str, filename: &str) -> String {
    if title.is_empty() {
        format!("{} ({})", format_index(index), filename)
    } else {
        format!("{} {}", format_index(index), title)
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

fn thumbnail_line(status: &ThumbnailStatus) -> Option<String> {
    match status {
        ThumbnailStatus::Generated { url } => Some(format!("Thumbnail: {}", url)),
        ThumbnailStatus::Failed { reason, .. } => Some(format!("Thumbnail: failed ({})", reason)),
        ThumbnailStatus::NotAttempted => None,
    }
}

fn entry_lines(entries: &[CatalogEntry], with_thumbnails: bool) -> Vec<String> {
    let mut lines = vec!["Images".to_string()];
    for (i, entry) in entries.iter().enumerate() {
        let filename = entry
            .source
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| entry.url.clone());

        lines.push(image_line(i + 1, &entry.title, &filename));
        lines.push(format!("{}Source: {}", indent(1), entry.url));
        if with_thumbnails && let Some(line) = thumbnail_line(&entry.thumbnail) {
            lines.push(format!("{}{}", indent(1), line));
        }
    }
    lines
}

// ============================================================================
// build
// ============================================================================

/// Format the result of a full run: per-image listing plus a totals line.
pub fn format_build_output(summary: &RunSummary, project_root: &std::path::Path) -> Vec<String> {
    let mut lines = entry_lines(&summary.entries, true);
    lines.push(String::new());

    let mut totals = vec![
        plural(summary.manifest.images.len(), "image"),
        plural(summary.generated(), "thumbnail"),
    ];
    if summary.failed() > 0 {
        totals.push(format!("{} failed", summary.failed()));
    }
    if summary.dropped() > 0 {
        totals.push(format!("{} dropped", summary.dropped()));
    }

    lines.push(format!(
        "Wrote {}: {}",
        relative_url(project_root, &summary.manifest_path),
        totals.join(", ")
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(summary: &RunSummary, project_root: &std::path::Path) {
    for line in format_build_output(summary, project_root) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// Format the image listing of a dry run.
pub fn format_check_output(entries: &[CatalogEntry]) -> Vec<String> {
    let mut lines = entry_lines(entries, false);
    lines.push(String::new());
    lines.push(format!("Found {}", plural(entries.len(), "image")));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(entries: &[CatalogEntry]) {
    for line in format_check_output(entries) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
