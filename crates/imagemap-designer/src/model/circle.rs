use serde::{Deserialize, Serialize};

use super::{Point, RegionEllipse, RegionGeometry, RegionShape};

/// Circle; draws exactly like an ellipse with `rx = ry = r`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionCircle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl RegionCircle {
    pub fn new(cx: f64, cy: f64, r: f64) -> Self {
        Self { cx, cy, r: r.abs() }
    }

    pub fn to_ellipse(&self) -> RegionEllipse {
        RegionEllipse::new(self.cx, self.cy, self.r, self.r)
    }
}

impl RegionGeometry for RegionCircle {
    fn anchor(&self) -> Point {
        Point::new(self.cx, self.cy)
    }

    fn handles(&self) -> Vec<Point> {
        vec![self.anchor()]
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        self.to_ellipse().bounds()
    }

    fn scaled(&self, sx: f64, sy: f64) -> RegionShape {
        if sx == sy {
            RegionShape::Circle(RegionCircle::new(self.cx * sx, self.cy * sy, self.r * sx))
        } else {
            self.to_ellipse().scaled(sx, sy)
        }
    }
}
