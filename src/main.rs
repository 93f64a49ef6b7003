use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use imagemap::designer::{CoordinateResolver, ImageOutcome, OverlayProcessor};
use imagemap::settings::{Config, SettingsPersistence};
use imagemap::{init_logging, DocumentManifest, FsVault, BUILD_DATE, VERSION};
use tracing::{info, warn};

/// Render image map overlays for a document manifest.
#[derive(Debug, Parser)]
#[command(name = "imagemap", version)]
struct Cli {
    /// Document manifest (JSON) listing the source path, frontmatter and images
    manifest: PathBuf,

    /// Root directory of the document store; defaults to the manifest's folder
    #[arg(long)]
    vault: Option<PathBuf>,

    /// Configuration file (.toml or .json); defaults to the user config
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => match SettingsPersistence::load_default() {
            Ok(settings) => Ok(settings.config().clone()),
            Err(e) => {
                warn!("Ignoring default configuration: {}", e);
                Ok(Config::default())
            }
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("imagemap {} (built {})", VERSION, BUILD_DATE);

    let args = Cli::parse();
    let config = load_config(args.config.as_ref())?;

    let root = match args.vault {
        Some(dir) => dir,
        None => args
            .manifest
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    let vault = Arc::new(FsVault::new(root));

    let manifest = DocumentManifest::load(&args.manifest).await?;
    let document = manifest.to_document(&vault);

    let processor = OverlayProcessor::new(vault.clone(), vault)
        .with_resolver(CoordinateResolver::new(config.resolver))
        .with_render_settings(config.overlay);

    for outcome in processor.process_document(&document).await {
        if let ImageOutcome::Rendered(container) = outcome {
            println!("{}", container.to_html());
        }
    }
    Ok(())
}
