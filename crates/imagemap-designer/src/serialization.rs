//! Wire formats for shape definitions.
//!
//! Two formats coexist and are both legal renderer input:
//! - the legacy object of `polygons` / `rects` / `ellipses` arrays, which
//!   is also the format of persisted `.map.json` files
//! - the region sequence, where every entry names its own `type` and may
//!   carry `style`, `text` and `link`
//!
//! [`ShapeDefinition`] is the tagged union at the boundary. Everything past
//! the boundary works on the canonical [`ShapeLayer`].

use imagemap_core::ShapeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::model::{
    CoordinateSpace, Region, RegionEllipse, RegionPolygon, RegionRectangle, RegionShape, ShapeLayer,
};

/// Legacy shape object. Carries no style, text or link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyShapes {
    #[serde(default)]
    pub polygons: Vec<String>,
    #[serde(default)]
    pub rects: Vec<[f64; 4]>,
    #[serde(default)]
    pub ellipses: Vec<[f64; 4]>,
    #[serde(default, skip_serializing_if = "CoordinateSpace::is_pixel")]
    pub space: CoordinateSpace,
}

impl LegacyShapes {
    pub fn new(space: CoordinateSpace) -> Self {
        Self {
            space,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty() && self.rects.is_empty() && self.ellipses.is_empty()
    }

    /// Regions in fixed group order: polygons, then rects, then ellipses.
    /// Polygon strings that do not decode are logged and skipped.
    pub fn to_layer(&self) -> ShapeLayer {
        let mut layer = ShapeLayer::new(self.space);
        for (idx, points) in self.polygons.iter().enumerate() {
            match RegionPolygon::parse(points) {
                Ok(poly) => layer.push(Region::new(poly)),
                Err(e) => warn!("Skipping legacy polygon #{}: {}", idx, e),
            }
        }
        for &[x, y, w, h] in &self.rects {
            layer.push(Region::new(RegionRectangle::new(x, y, w, h)));
        }
        for &[cx, cy, rx, ry] in &self.ellipses {
            layer.push(Region::new(RegionEllipse::new(cx, cy, rx, ry)));
        }
        layer
    }

    /// Groups a layer's regions by kind. Circles are stored as ellipses with
    /// equal radii; style, text and link have no legacy representation and
    /// are dropped.
    pub fn from_layer(layer: &ShapeLayer) -> Self {
        let mut shapes = LegacyShapes::new(layer.space);
        for region in layer.iter() {
            if region.style.is_some() || region.text.is_some() || region.link.is_some() {
                debug!("Dropping style/text/link of a {} in legacy output", region.kind());
            }
            match &region.shape {
                RegionShape::Polygon(p) => shapes.polygons.push(p.points.to_string()),
                RegionShape::Rectangle(r) => shapes.rects.push(r.to_tuple()),
                RegionShape::Ellipse(e) => shapes.ellipses.push(e.to_tuple()),
                RegionShape::Circle(c) => shapes.ellipses.push(c.to_ellipse().to_tuple()),
            }
        }
        shapes
    }

    /// Pretty-printed JSON as written to `.map.json` files.
    pub fn to_json_pretty(&self) -> Result<String, ShapeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ShapeError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A shape definition in either wire format.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeDefinition {
    Legacy(LegacyShapes),
    Regions {
        space: CoordinateSpace,
        regions: Vec<Region>,
    },
}

impl ShapeDefinition {
    /// Parses JSON text into a definition.
    pub fn from_json_str(json: &str) -> Result<Self, ShapeError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Decodes an already-parsed JSON value.
    ///
    /// - an array is a region sequence in pixel space
    /// - an object with a `regions` array is a region sequence, optionally
    ///   tagged with `space`
    /// - any other object is the legacy format
    pub fn from_value(value: Value) -> Result<Self, ShapeError> {
        match value {
            Value::Array(items) => Ok(ShapeDefinition::Regions {
                space: CoordinateSpace::Pixel,
                regions: decode_regions(items),
            }),
            Value::Object(mut map) => match map.remove("regions") {
                Some(Value::Array(items)) => {
                    let space = match map.remove("space") {
                        Some(v) => serde_json::from_value(v)?,
                        None => CoordinateSpace::Pixel,
                    };
                    Ok(ShapeDefinition::Regions {
                        space,
                        regions: decode_regions(items),
                    })
                }
                Some(other) => {
                    // Not a region sequence: put it back and read the rest
                    // as a legacy object, which ignores unknown keys.
                    map.insert("regions".to_string(), other);
                    Ok(ShapeDefinition::Legacy(serde_json::from_value(
                        Value::Object(map),
                    )?))
                }
                None => Ok(ShapeDefinition::Legacy(serde_json::from_value(
                    Value::Object(map),
                )?)),
            },
            other => Err(ShapeError::UnsupportedDefinition {
                expected: "array or object".to_string(),
                actual: json_type_name(&other).to_string(),
            }),
        }
    }

    pub fn space(&self) -> CoordinateSpace {
        match self {
            ShapeDefinition::Legacy(shapes) => shapes.space,
            ShapeDefinition::Regions { space, .. } => *space,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, ShapeDefinition::Legacy(_))
    }

    /// Normalizes either format into the canonical layer.
    pub fn to_layer(&self) -> ShapeLayer {
        match self {
            ShapeDefinition::Legacy(shapes) => shapes.to_layer(),
            ShapeDefinition::Regions { space, regions } => {
                ShapeLayer::with_regions(*space, regions.clone())
            }
        }
    }
}

impl From<LegacyShapes> for ShapeDefinition {
    fn from(shapes: LegacyShapes) -> Self {
        ShapeDefinition::Legacy(shapes)
    }
}

/// Decodes each region on its own so one bad entry does not discard the
/// rest of the sequence.
fn decode_regions(items: Vec<Value>) -> Vec<Region> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Region>(item) {
            Ok(region) => Some(region),
            Err(e) => {
                let err = ShapeError::InvalidRegion {
                    index,
                    reason: e.to_string(),
                };
                warn!("No SVG shape for region: {}", err);
                None
            }
        })
        .collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
