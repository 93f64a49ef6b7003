//! Coordinate source resolution.
//!
//! Decides which shape definition applies to an image. First match wins and
//! sources are never merged:
//! 1. inline `data-coordinates` JSON
//! 2. `data-map` key looked up in the document's image map table
//! 3. nothing

use imagemap_core::ImageAttributes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::serialization::ShapeDefinition;

/// Frontmatter key holding the document's image map table.
pub const DEFAULT_TABLE_KEY: &str = "imageMaps";

/// Resolver settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Frontmatter key of the image map table.
    pub table_key: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            table_key: DEFAULT_TABLE_KEY.to_string(),
        }
    }
}

/// Resolves the shape definition for an image.
#[derive(Debug, Clone, Default)]
pub struct CoordinateResolver {
    settings: ResolverSettings,
}

impl CoordinateResolver {
    pub fn new(settings: ResolverSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Returns the definition for `attrs`, or `None` when no source applies.
    ///
    /// Malformed inline JSON is logged and resolution falls through to the
    /// map reference.
    pub fn resolve(
        &self,
        attrs: &ImageAttributes,
        frontmatter: Option<&Value>,
    ) -> Option<ShapeDefinition> {
        if let Some(json) = attrs.coordinates() {
            debug!("data-coordinates found: {}", json);
            match ShapeDefinition::from_json_str(json) {
                Ok(def) => return Some(def),
                Err(e) => error!(
                    "Invalid data-coordinates JSON on {}: {}. Check your syntax or frontmatter.",
                    attrs.src().unwrap_or("<image>"),
                    e
                ),
            }
        }

        let key = attrs.map_key()?;
        debug!("data-map: {}", key);
        let entry = frontmatter?.get(&self.settings.table_key)?.get(key)?;
        if entry.is_null() {
            return None;
        }
        match ShapeDefinition::from_value(entry.clone()) {
            Ok(def) => {
                debug!(
                    "{} entry '{}' resolved ({})",
                    self.settings.table_key,
                    key,
                    if def.is_legacy() { "legacy" } else { "regions" }
                );
                Some(def)
            }
            Err(e) => {
                error!("Invalid {} entry '{}': {}", self.settings.table_key, key, e);
                None
            }
        }
    }
}

/// Resolves with the default table key.
pub fn resolve_coordinates(
    attrs: &ImageAttributes,
    frontmatter: Option<&Value>,
) -> Option<ShapeDefinition> {
    CoordinateResolver::default().resolve(attrs, frontmatter)
}
