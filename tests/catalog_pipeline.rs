//! End-to-end runs over real image files.
//!
//! Every test builds a throwaway project in a temp dir, synthesizes its source
//! images with the `image` crate, runs the full pipeline with the production
//! backend, and inspects what landed on disk.

use gallery_manifest::config::{CatalogConfig, PathsConfig};
use gallery_manifest::manifest::Manifest;
use gallery_manifest::pipeline::{self, Layout, PipelineError};
use image::{DynamicImage, ImageFormat, ImageReader, Rgb, RgbImage};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_image(path: &Path, width: u32, height: u32, color: [u8; 3], format: ImageFormat) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)));
    // The GIF encoder wants RGBA input
    let img = match format {
        ImageFormat::Gif => DynamicImage::ImageRgba8(img.to_rgba8()),
        _ => img,
    };
    img.save_with_format(path, format).unwrap();
}

fn dimensions(path: &Path) -> (u32, u32) {
    ImageReader::open(path)
        .unwrap()
        .with_guessed_format()
        .unwrap()
        .into_dimensions()
        .unwrap()
}

fn layout(root: &Path) -> Layout {
    Layout::resolve(root, None, &PathsConfig::default()).unwrap()
}

#[test]
fn large_jpeg_gets_full_size_crop() {
    let tmp = TempDir::new().unwrap();
    write_image(
        &tmp.path().join("images/big.jpg"),
        2100,
        2100,
        [120, 90, 60],
        ImageFormat::Jpeg,
    );

    let summary = pipeline::run(&layout(tmp.path()), &CatalogConfig::default()).unwrap();

    assert_eq!(summary.generated(), 1);
    let thumb = tmp.path().join("assets/thumbnail/big.jpg");
    assert_eq!(dimensions(&thumb), (415, 415));

    let manifest = Manifest::load(&tmp.path().join("data/images.json")).unwrap();
    let record = &manifest.images[0];
    assert_eq!(record.title, "big");
    assert_eq!(record.alt, "big");
    assert_eq!(record.url, "images/big.jpg");
    assert_eq!(record.thumbnail.as_deref(), Some("assets/thumbnail/big.jpg"));
}

#[test]
fn small_png_is_clamped_to_its_resized_bounds() {
    let tmp = TempDir::new().unwrap();
    write_image(
        &tmp.path().join("images/wide/strip.png"),
        1000,
        500,
        [0, 200, 0],
        ImageFormat::Png,
    );

    pipeline::run(&layout(tmp.path()), &CatalogConfig::default()).unwrap();

    let thumb = tmp.path().join("assets/thumbnail/strip.png");
    assert_eq!(dimensions(&thumb), (200, 100));
    let format = ImageReader::open(&thumb)
        .unwrap()
        .with_guessed_format()
        .unwrap()
        .format();
    assert_eq!(format, Some(ImageFormat::Png));
}

#[test]
fn corrupt_image_keeps_record_and_run_continues() {
    let tmp = TempDir::new().unwrap();
    write_image(
        &tmp.path().join("images/a.jpg"),
        600,
        600,
        [10, 10, 10],
        ImageFormat::Jpeg,
    );
    fs::write(tmp.path().join("images/b.jpg"), "not really a jpeg").unwrap();
    write_image(
        &tmp.path().join("images/c.png"),
        600,
        600,
        [10, 10, 10],
        ImageFormat::Png,
    );

    let summary = pipeline::run(&layout(tmp.path()), &CatalogConfig::default()).unwrap();

    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.generated(), 2);
    assert_eq!(summary.manifest.images.len(), 3);
    assert_eq!(
        summary.manifest.images[1].thumbnail.as_deref(),
        Some("assets/thumbnail/b.jpg")
    );
    assert!(!tmp.path().join("assets/thumbnail/b.jpg").exists());
    assert!(tmp.path().join("assets/thumbnail/c.png").exists());
}

#[test]
fn gif_source_fails_at_encode_but_is_listed() {
    let tmp = TempDir::new().unwrap();
    write_image(
        &tmp.path().join("images/anim.gif"),
        500,
        500,
        [1, 2, 3],
        ImageFormat::Gif,
    );

    let summary = pipeline::run(&layout(tmp.path()), &CatalogConfig::default()).unwrap();

    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.manifest.images[0].url, "images/anim.gif");
    assert!(!tmp.path().join("assets/thumbnail/anim.gif").exists());
}

#[test]
fn strict_mode_leaves_failures_out() {
    let tmp = TempDir::new().unwrap();
    write_image(
        &tmp.path().join("images/ok.png"),
        500,
        500,
        [1, 2, 3],
        ImageFormat::Png,
    );
    fs::write(tmp.path().join("images/broken.png"), [0u8; 16]).unwrap();

    let mut config = CatalogConfig::default();
    config.manifest.strict = true;
    pipeline::run(&layout(tmp.path()), &config).unwrap();

    let manifest = Manifest::load(&tmp.path().join("data/images.json")).unwrap();
    let urls: Vec<&str> = manifest.images.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, vec!["images/ok.png"]);
}

#[test]
fn same_file_name_last_in_walk_order_wins() {
    let tmp = TempDir::new().unwrap();
    write_image(
        &tmp.path().join("images/a/pic.png"),
        500,
        500,
        [255, 0, 0],
        ImageFormat::Png,
    );
    write_image(
        &tmp.path().join("images/b/pic.png"),
        500,
        500,
        [0, 0, 255],
        ImageFormat::Png,
    );

    let summary = pipeline::run(&layout(tmp.path()), &CatalogConfig::default()).unwrap();

    let thumbs: Vec<Option<&str>> = summary
        .manifest
        .images
        .iter()
        .map(|r| r.thumbnail.as_deref())
        .collect();
    assert_eq!(
        thumbs,
        vec![
            Some("assets/thumbnail/pic.png"),
            Some("assets/thumbnail/pic.png")
        ]
    );

    let written = image::open(tmp.path().join("assets/thumbnail/pic.png"))
        .unwrap()
        .to_rgb8();
    assert_eq!(written.get_pixel(0, 0), &Rgb([0, 0, 255]));
}

#[test]
fn repeated_runs_write_identical_manifests() {
    let tmp = TempDir::new().unwrap();
    for name in ["z.png", "m/b.png", "m/a.png", "a.png"] {
        write_image(
            &tmp.path().join("images").join(name),
            100,
            100,
            [5, 5, 5],
            ImageFormat::Png,
        );
    }
    let layout = layout(tmp.path());

    pipeline::run(&layout, &CatalogConfig::default()).unwrap();
    let first = fs::read(layout.manifest_path()).unwrap();
    pipeline::run(&layout, &CatalogConfig::default()).unwrap();
    let second = fs::read(layout.manifest_path()).unwrap();

    assert_eq!(first, second);
    let manifest: Manifest = serde_json::from_slice(&first).unwrap();
    let urls: Vec<&str> = manifest.images.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["images/a.png", "images/m/a.png", "images/m/b.png", "images/z.png"]
    );
}

#[test]
fn empty_tree_writes_empty_manifest() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("images")).unwrap();

    pipeline::run(&layout(tmp.path()), &CatalogConfig::default()).unwrap();

    let json = fs::read_to_string(tmp.path().join("data/images.json")).unwrap();
    assert_eq!(json, "{\n  \"images\": []\n}");
}

#[test]
fn missing_images_folder_aborts_before_writing() {
    let tmp = TempDir::new().unwrap();

    let result = Layout::resolve(tmp.path(), None, &PathsConfig::default());

    assert!(matches!(result, Err(PipelineError::SourceMissing(_))));
    assert!(!tmp.path().join("data").exists());
}

#[test]
fn catalog_toml_overrides_layout() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("catalog.toml"),
        "[paths]\nimages = \"photos\"\nmanifest = \"gallery.json\"\n",
    )
    .unwrap();
    write_image(
        &tmp.path().join("photos/p.jpg"),
        100,
        100,
        [9, 9, 9],
        ImageFormat::Jpeg,
    );

    let config = gallery_manifest::config::load_config(tmp.path()).unwrap();
    let layout = Layout::resolve(tmp.path(), None, &config.paths).unwrap();
    pipeline::run(&layout, &config).unwrap();

    let manifest = Manifest::load(&tmp.path().join("data/gallery.json")).unwrap();
    assert_eq!(manifest.images[0].url, "photos/p.jpg");
}
