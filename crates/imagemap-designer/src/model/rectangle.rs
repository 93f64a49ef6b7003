use serde::{Deserialize, Serialize};

use super::{Point, RegionGeometry, RegionShape};

/// Axis-aligned rectangle anchored at its top-left corner.
///
/// Width and height are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RectangleWire")]
pub struct RegionRectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Deserialize)]
struct RectangleWire {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl From<RectangleWire> for RegionRectangle {
    fn from(w: RectangleWire) -> Self {
        RegionRectangle::new(w.x, w.y, w.width, w.height)
    }
}

impl RegionRectangle {
    /// Creates a rectangle, moving the origin so a negative extent becomes
    /// a positive one covering the same area.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let (x, width) = if width < 0.0 { (x + width, -width) } else { (x, width) };
        let (y, height) = if height < 0.0 { (y + height, -height) } else { (y, height) };
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanned by two opposite corners, in either drag direction.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    /// The legacy `[x, y, w, h]` tuple.
    pub fn to_tuple(&self) -> [f64; 4] {
        [self.x, self.y, self.width, self.height]
    }
}

impl RegionGeometry for RegionRectangle {
    fn anchor(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    fn handles(&self) -> Vec<Point> {
        vec![
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y),
            Point::new(self.x, self.y + self.height),
            Point::new(self.x + self.width, self.y + self.height),
        ]
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.x + self.width, self.y + self.height)
    }

    fn scaled(&self, sx: f64, sy: f64) -> RegionShape {
        RegionShape::Rectangle(RegionRectangle::new(
            self.x * sx,
            self.y * sy,
            self.width * sx,
            self.height * sy,
        ))
    }
}
