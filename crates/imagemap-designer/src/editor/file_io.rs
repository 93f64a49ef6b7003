//! Saving the editor model to the host store.

use imagemap_core::{LinkResolver, Notifier, Result, Vault};
use tracing::{error, info};

use super::EditorSession;

/// Host services the editor needs to save.
#[derive(Clone, Copy)]
pub struct EditorHost<'a> {
    pub links: &'a dyn LinkResolver,
    pub vault: &'a dyn Vault,
    pub notifier: &'a dyn Notifier,
    /// Path of the document the image was opened from.
    pub active_path: &'a str,
}

impl EditorSession {
    /// Where the map for this image is written.
    ///
    /// `<resolved image path><suffix>` when the image source resolves to a
    /// stored file, otherwise the last path segment of the source (or the
    /// fallback stem) plus the suffix.
    pub fn map_file_path(&self, links: &dyn LinkResolver, active_path: &str) -> String {
        let suffix = &self.settings().map_file_suffix;
        let src = self.image().src();
        if let Some(resolved) = src.and_then(|s| links.first_linkpath_dest(s, active_path)) {
            return format!("{}{}", resolved, suffix);
        }
        let stem = src
            .and_then(|s| s.rsplit('/').next())
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.settings().fallback_stem);
        format!("{}{}", stem, suffix)
    }

    /// Serializes the model in the legacy layout and writes it in one
    /// request. Returns the written path.
    ///
    /// On failure the user is notified and the model is kept so the save can
    /// be retried.
    pub async fn save(&self, host: &EditorHost<'_>) -> Result<String> {
        let path = self.map_file_path(host.links, host.active_path);
        match self.write_map(host.vault, &path).await {
            Ok(()) => {
                info!("Saved {} shapes to {}", self.shape_count(), path);
                host.notifier
                    .notify(&format!("Image map saved to {}", path));
                Ok(path)
            }
            Err(e) => {
                error!("Failed to save image map to {}: {}", path, e);
                host.notifier.notify("Failed to save coordinates");
                Err(e)
            }
        }
    }

    async fn write_map(&self, vault: &dyn Vault, path: &str) -> Result<()> {
        let json = self.to_map_file().to_json_pretty()?;
        vault.write(path, &json).await?;
        Ok(())
    }
}
