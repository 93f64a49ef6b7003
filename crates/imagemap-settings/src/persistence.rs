//! Settings Persistence
//!
//! Ties a [`Config`] to the file it was loaded from so it can be edited and
//! written back.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::SettingsResult;

/// A configuration together with its backing file
#[derive(Debug, Clone)]
pub struct SettingsPersistence {
    config: Config,
    path: PathBuf,
}

impl SettingsPersistence {
    /// Create a persistence layer with the default config, backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            config: Config::default(),
            path: path.into(),
        }
    }

    /// Load settings from `path`, using defaults if the file is missing
    pub fn load(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        let config = Config::load_or_default(&path)?;
        Ok(Self { config, path })
    }

    /// Load settings from the platform default location
    pub fn load_default() -> SettingsResult<Self> {
        Self::load(Config::default_path()?)
    }

    /// Save settings to the backing file
    pub fn save(&self) -> SettingsResult<()> {
        self.config.save_to_file(&self.path)
    }

    /// Get reference to config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable reference to config
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate settings
    pub fn validate(&self) -> SettingsResult<()> {
        self.config.validate()
    }
}
