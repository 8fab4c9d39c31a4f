use clap::{Parser, Subcommand};
use gallery_manifest::{config, output, pipeline};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gallery-manifest")]
#[command(about = "Center-cropped thumbnails and a JSON manifest for an image folder")]
#[command(long_about = "\
Center-cropped thumbnails and a JSON manifest for an image folder

Every image under the source tree gets a thumbnail (downscaled by 5, then a
centered 415x415 crop) and a record in the manifest.

Project layout (defaults, override in catalog.toml):

  <root>/
  ├── catalog.toml                 # Optional config
  ├── images/                      # Source tree, any depth
  │   ├── dawn.jpg
  │   └── travel/kyoto.png
  ├── assets/thumbnail/            # Thumbnails, one flat directory
  │   ├── dawn.jpg
  │   └── kyoto.png
  └── data/images.json             # {\"images\": [{title, url, alt, thumbnail}]}

Paths in the manifest are relative to the project root.
Set RUST_LOG=debug to see every thumbnail as it is written.

Run 'gallery-manifest gen-config' to generate a documented catalog.toml.")]
#[command(version)]
struct Cli {
    /// Project root; manifest paths are relative to it
    #[arg(long, default_value = "..", global = true)]
    root: PathBuf,

    /// Image source tree (overrides paths.images)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Leave images whose thumbnail failed out of the manifest
    #[arg(long, global = true)]
    strict: bool,

    /// Write the manifest without generating thumbnails
    #[arg(long, global = true)]
    no_thumbnails: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate thumbnails and write the manifest (default)
    Build,
    /// List the images that would be cataloged, writing nothing
    Check,
    /// Print a stock catalog.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.as_ref().unwrap_or(&Command::Build) {
        Command::Build => {
            let (layout, catalog_config) = prepare(&cli)?;
            let summary = pipeline::run(&layout, &catalog_config)?;
            output::print_build_output(&summary, &layout.project_root);
        }
        Command::Check => {
            let (layout, catalog_config) = prepare(&cli)?;
            let entries = pipeline::check(&layout, &catalog_config)?;
            output::print_check_output(&entries);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `catalog.toml`, apply command-line overrides and resolve the layout.
fn prepare(
    cli: &Cli,
) -> Result<(pipeline::Layout, config::CatalogConfig), Box<dyn std::error::Error>> {
    let mut catalog_config = config::load_config(&cli.root)?;
    if cli.strict {
        catalog_config.manifest.strict = true;
    }
    if cli.no_thumbnails {
        catalog_config.thumbnails.enabled = false;
    }

    let layout =
        pipeline::Layout::resolve(&cli.root, cli.source.as_deref(), &catalog_config.paths)?;
    Ok((layout, catalog_config))
}
