//! Document manifests for the command line driver.
//!
//! A manifest describes one rendered document the way a host hands it to the
//! overlay processor:
//!
//! ```json
//! {
//!   "source_path": "notes/house.md",
//!   "frontmatter": { "imageMaps": { "ground": { "rects": [[0, 0, 10, 10]] } } },
//!   "images": [
//!     { "attributes": { "src": "plan.png", "data-map": "ground" } },
//!     { "attributes": { "src": "remote.png", "data-coordinates": "[]" }, "width": 800, "height": 600 }
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::Context;
use imagemap_core::{ImageAttributes, ImageReady, ImageSize, LinkResolver};
use imagemap_designer::{RenderedDocument, RenderedImage};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::fs_vault::FsVault;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentManifest {
    pub source_path: String,
    #[serde(default)]
    pub frontmatter: Option<Value>,
    #[serde(default)]
    pub images: Vec<ManifestImage>,
}

/// One image node. Without an explicit size the image file is measured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestImage {
    #[serde(default)]
    pub attributes: ImageAttributes,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl DocumentManifest {
    /// Reads a JSON manifest.
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid manifest {}", path.display()))
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the rendered document, measuring images in `vault`.
    ///
    /// An image whose size cannot be determined never becomes ready, so it
    /// fails on its own without affecting the others.
    pub fn to_document(&self, vault: &FsVault) -> RenderedDocument {
        let images = self
            .images
            .iter()
            .map(|image| {
                let ready = match image.natural_size(vault, &self.source_path) {
                    Some(size) => ImageReady::loaded(size),
                    None => {
                        let (_never_fired, ready) = ImageReady::pending();
                        ready
                    }
                };
                RenderedImage::new(image.attributes.clone(), ready)
            })
            .collect();
        RenderedDocument {
            source_path: self.source_path.clone(),
            frontmatter: self.frontmatter.clone(),
            images,
        }
    }
}

impl ManifestImage {
    /// Explicit size if given, otherwise the dimensions of the image file.
    pub fn natural_size(&self, vault: &FsVault, source_path: &str) -> Option<ImageSize> {
        if let (Some(w), Some(h)) = (self.width, self.height) {
            let size = ImageSize::new(w, h);
            return size.is_valid().then_some(size);
        }
        let src = self.attributes.src()?;
        let Some(path) = vault.first_linkpath_dest(src, source_path) else {
            warn!("Image {} not found in {}", src, vault.root().display());
            return None;
        };
        let full = vault.full_path(&path).ok()?;
        match image::image_dimensions(&full) {
            Ok((w, h)) => Some(ImageSize::new(w, h)),
            Err(e) => {
                warn!("Failed to measure image {}: {}", full.display(), e);
                None
            }
        }
    }
}
