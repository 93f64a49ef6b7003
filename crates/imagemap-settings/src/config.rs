//! Configuration for imagemap
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into sections:
//! - Overlay (default visual, label defaults, shape class)
//! - Editor (handles, canvas class, map file naming)
//! - Resolver (frontmatter table key)

use imagemap_designer::{EditorSettings, RenderSettings, ResolverSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{SettingsError, SettingsResult};

/// Name of the directory under the platform config dir.
pub const APP_DIR_NAME: &str = "imagemap";

/// File name of the default configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Supported on-disk formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overlay rendering defaults
    pub overlay: RenderSettings,
    /// Editor presentation and persistence
    pub editor: EditorSettings,
    /// Coordinate resolution
    pub resolver: ResolverSettings,
}

impl Config {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a `.json` or `.toml` file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file does not
    /// exist. An existing but invalid file is still an error.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            info!(
                "No configuration at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save configuration to a `.json` or `.toml` file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = ConfigFormat::from_path(path)?;

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Default location of the configuration file
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("platform config directory not found".to_string())
            })
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let overlay = &self.overlay;
        if !overlay.default_stroke_width.is_finite() || overlay.default_stroke_width < 0.0 {
            return Err(SettingsError::invalid(
                "overlay.default_stroke_width",
                "must be >= 0",
            ));
        }
        if !(0.0..=1.0).contains(&overlay.default_opacity) {
            return Err(SettingsError::invalid(
                "overlay.default_opacity",
                "must be between 0 and 1",
            ));
        }
        if !overlay.text_size.is_finite() || overlay.text_size <= 0.0 {
            return Err(SettingsError::invalid("overlay.text_size", "must be > 0"));
        }
        if overlay.shape_class.trim().is_empty() {
            return Err(SettingsError::invalid(
                "overlay.shape_class",
                "must not be empty",
            ));
        }

        let editor = &self.editor;
        if !editor.handle_radius.is_finite() || editor.handle_radius <= 0.0 {
            return Err(SettingsError::invalid("editor.handle_radius", "must be > 0"));
        }
        if editor.map_file_suffix.is_empty() {
            return Err(SettingsError::invalid(
                "editor.map_file_suffix",
                "must not be empty",
            ));
        }
        if editor.fallback_stem.is_empty() || editor.fallback_stem.contains('/') {
            return Err(SettingsError::invalid(
                "editor.fallback_stem",
                "must be a non-empty file name",
            ));
        }

        if self.resolver.table_key.trim().is_empty() {
            return Err(SettingsError::invalid(
                "resolver.table_key",
                "must not be empty",
            ));
        }

        Ok(())
    }
}
