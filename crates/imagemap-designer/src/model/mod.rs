//! Region model shared by the renderer and the editor.
//!
//! A [`Region`] is one clickable area: a [`RegionShape`] plus optional
//! [`Style`], [`TextLabel`] and link. A [`ShapeLayer`] is the canonical,
//! ordered list of regions together with the coordinate space their numbers
//! live in. Both wire formats decode into it (see `serialization`).

use serde::{Deserialize, Serialize};

mod circle;
mod ellipse;
mod polygon;
mod rectangle;
mod style;

pub use circle::RegionCircle;
pub use ellipse::RegionEllipse;
pub use polygon::{PointList, RegionPolygon};
pub use rectangle::RegionRectangle;
pub use style::{StrokeType, Style, TextLabel, TextPosition};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Which space the numbers of a shape definition are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSpace {
    /// Natural image pixels.
    #[default]
    Pixel,
    /// 0-100 along each image axis, as produced by the editor.
    Percent,
}

impl CoordinateSpace {
    pub fn is_pixel(&self) -> bool {
        matches!(self, CoordinateSpace::Pixel)
    }

    /// Per-axis factors that map this space onto a `width` x `height`
    /// pixel box.
    pub fn scale_to_pixels(&self, width: f64, height: f64) -> (f64, f64) {
        match self {
            CoordinateSpace::Pixel => (1.0, 1.0),
            CoordinateSpace::Percent => (width / 100.0, height / 100.0),
        }
    }
}

/// Geometry operations every region shape supports.
pub trait RegionGeometry {
    /// Point text annotations are anchored to before positional offsets.
    fn anchor(&self) -> Point;

    /// Points where the editor draws handles after the shape is completed.
    fn handles(&self) -> Vec<Point>;

    /// Axis-aligned bounds as `(min_x, min_y, max_x, max_y)`.
    fn bounds(&self) -> (f64, f64, f64, f64);

    /// The shape with x values multiplied by `sx` and y values by `sy`.
    fn scaled(&self, sx: f64, sy: f64) -> RegionShape;
}

/// Kind of primitive a region draws as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Polygon,
    Rectangle,
    Ellipse,
    Circle,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Polygon => write!(f, "polygon"),
            Self::Rectangle => write!(f, "rectangle"),
            Self::Ellipse => write!(f, "ellipse"),
            Self::Circle => write!(f, "circle"),
        }
    }
}

/// Geometry of a region, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RegionShape {
    Polygon(RegionPolygon),
    #[serde(alias = "rect")]
    Rectangle(RegionRectangle),
    Ellipse(RegionEllipse),
    Circle(RegionCircle),
}

impl RegionShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            RegionShape::Polygon(_) => ShapeKind::Polygon,
            RegionShape::Rectangle(_) => ShapeKind::Rectangle,
            RegionShape::Ellipse(_) => ShapeKind::Ellipse,
            RegionShape::Circle(_) => ShapeKind::Circle,
        }
    }
}

impl RegionGeometry for RegionShape {
    fn anchor(&self) -> Point {
        match self {
            RegionShape::Polygon(s) => s.anchor(),
            RegionShape::Rectangle(s) => s.anchor(),
            RegionShape::Ellipse(s) => s.anchor(),
            RegionShape::Circle(s) => s.anchor(),
        }
    }

    fn handles(&self) -> Vec<Point> {
        match self {
            RegionShape::Polygon(s) => s.handles(),
            RegionShape::Rectangle(s) => s.handles(),
            RegionShape::Ellipse(s) => s.handles(),
            RegionShape::Circle(s) => s.handles(),
        }
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            RegionShape::Polygon(s) => s.bounds(),
            RegionShape::Rectangle(s) => s.bounds(),
            RegionShape::Ellipse(s) => s.bounds(),
            RegionShape::Circle(s) => s.bounds(),
        }
    }

    fn scaled(&self, sx: f64, sy: f64) -> RegionShape {
        match self {
            RegionShape::Polygon(s) => s.scaled(sx, sy),
            RegionShape::Rectangle(s) => s.scaled(sx, sy),
            RegionShape::Ellipse(s) => s.scaled(sx, sy),
            RegionShape::Circle(s) => s.scaled(sx, sy),
        }
    }
}

impl From<RegionPolygon> for RegionShape {
    fn from(s: RegionPolygon) -> Self {
        RegionShape::Polygon(s)
    }
}

impl From<RegionRectangle> for RegionShape {
    fn from(s: RegionRectangle) -> Self {
        RegionShape::Rectangle(s)
    }
}

impl From<RegionEllipse> for RegionShape {
    fn from(s: RegionEllipse) -> Self {
        RegionShape::Ellipse(s)
    }
}

impl From<RegionCircle> for RegionShape {
    fn from(s: RegionCircle) -> Self {
        RegionShape::Circle(s)
    }
}

/// One clickable, optionally styled and labelled area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    #[serde(flatten)]
    pub shape: RegionShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Region {
    /// A bare region that renders with the default visual.
    pub fn new(shape: impl Into<RegionShape>) -> Self {
        Self {
            shape: shape.into(),
            style: None,
            text: None,
            link: None,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_text(mut self, text: TextLabel) -> Self {
        self.text = Some(text);
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Where the text label goes: the shape anchor moved by the label's
    /// positional offset.
    pub fn label_position(&self) -> Option<Point> {
        let text = self.text.as_ref()?;
        let (dx, dy) = text.position.map(|p| p.offset()).unwrap_or((0.0, 0.0));
        Some(self.shape.anchor().offset(dx, dy))
    }

    /// Same region with its geometry scaled; style, text and link are kept.
    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        Self {
            shape: self.shape.scaled(sx, sy),
            style: self.style.clone(),
            text: self.text.clone(),
            link: self.link.clone(),
        }
    }
}

/// Ordered regions plus the coordinate space they are expressed in.
///
/// Later regions draw on top of earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeLayer {
    pub space: CoordinateSpace,
    pub regions: Vec<Region>,
}

impl ShapeLayer {
    pub fn new(space: CoordinateSpace) -> Self {
        Self {
            space,
            regions: Vec::new(),
        }
    }

    pub fn with_regions(space: CoordinateSpace, regions: Vec<Region>) -> Self {
        Self { space, regions }
    }

    pub fn push(&mut self, region: Region) {
        self.regions.push(region);
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// Regions mapped onto a `width` x `height` pixel box.
    pub fn to_pixel_space(&self, width: f64, height: f64) -> ShapeLayer {
        let (sx, sy) = self.space.scale_to_pixels(width, height);
        if self.space.is_pixel() {
            return self.clone();
        }
        ShapeLayer {
            space: CoordinateSpace::Pixel,
            regions: self.regions.iter().map(|r| r.scaled(sx, sy)).collect(),
        }
    }
}

/// Formats a coordinate the way SVG attribute text expects it: shortest
/// round-trip form, no trailing `.0`, and no negative zero.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}
