//! Imagemap Settings Crate
//!
//! Handles configuration for overlay rendering, the editor and coordinate
//! resolution, and its persistence as JSON or TOML.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{Config, ConfigFormat};
pub use error::{SettingsError, SettingsResult};
pub use persistence::SettingsPersistence;
