//! # Gallery Manifest
//!
//! Walks an image folder, cuts a center-cropped thumbnail for every image and
//! writes a JSON manifest that a static front end reads to render its gallery.
//!
//! # Architecture
//!
//! One pass over the source tree does everything:
//!
//! ```text
//! images/**  →  walk (sorted, symlinks followed)  →  per image:
//!                  title + url                        decode → ÷5 → 415×415 crop → encode
//!                                                     assets/thumbnail/<name>
//!            →  data/images.json   {"images": [{title, url, alt, thumbnail}]}
//! ```
//!
//! A thumbnail failure never stops the walk. The image still gets its record;
//! the failure is logged and counted. Only structural problems (missing
//! source tree, unreadable directory, unwritable output) abort the run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `catalog.toml` loading, validation, merging over stock defaults |
//! | [`scan`] | Source tree walk, image classification, title and path derivation |
//! | [`imaging`] | Pure-Rust thumbnail derivation behind the [`imaging::ImageBackend`] trait |
//! | [`manifest`] | Manifest records and JSON persistence |
//! | [`pipeline`] | Layout resolution and the `build` / `check` drivers |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Deterministic Output
//!
//! Directory entries are visited in file-name order, so the same tree always
//! yields a byte-identical manifest. Diffs of `images.json` in version control
//! show real content changes only.
//!
//! ## Flat Thumbnail Directory
//!
//! Thumbnails are named after the source file name alone, so two images with
//! the same name in different folders share one thumbnail (the later one in
//! walk order wins). `naming = "hashed"` in `catalog.toml` appends a digest of
//! the source path when that matters.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, resampling and encoding all go through the `image` crate. No
//! system libraries, no external processes.

pub mod config;
pub mod imaging;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
