//! # Imagemap
//!
//! Clickable, styled vector overlays for images embedded in rendered
//! documents, with:
//! - Shape definitions inline on the image or in document frontmatter
//! - Polygons, rectangles, ellipses and circles with style, labels and links
//! - External SVG overlays layered together with generated shapes
//! - An interactive editor that saves drawn shapes next to the image
//!
//! ## Architecture
//!
//! Imagemap is organized as a workspace with multiple crates:
//!
//! 1. **imagemap-core** - Errors, image attributes and readiness, host traits
//! 2. **imagemap-designer** - Shape model, resolver, renderer, compositor, editor
//! 3. **imagemap-settings** - Configuration and persistence
//! 4. **imagemap-fs** - Filesystem document store and document manifests
//! 5. **imagemap** - Logging setup and the command line driver
//!
//! The binary reads a document manifest, resolves and renders every image's
//! overlay against a directory used as the document store, and prints the
//! composed HTML.

pub use imagemap_core as host;
pub use imagemap_designer as designer;
pub use imagemap_fs as fs;
pub use imagemap_settings as settings;

pub use imagemap_fs::{DocumentManifest, FsVault, ManifestImage};

pub use imagemap_core::{
    Error, HostError, ImageAttributes, ImageReady, ImageSize, Result, ShapeError,
};
pub use imagemap_designer::{
    EditorSession, ImageOutcome, OverlayContainer, OverlayProcessor, RenderSettings,
    RenderedDocument, ShapeDefinition, ShapeLayer,
};
pub use imagemap_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, keeping stdout for rendered HTML
/// - RUST_LOG environment variable support, `info` when unset
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
