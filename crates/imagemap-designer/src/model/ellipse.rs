use serde::{Deserialize, Serialize};

use super::{Point, RegionGeometry, RegionShape};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionEllipse {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
}

impl RegionEllipse {
    pub fn new(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        Self {
            cx,
            cy,
            rx: rx.abs(),
            ry: ry.abs(),
        }
    }

    /// Ellipse centred on `center` whose radii reach `edge` along each axis.
    pub fn from_center_and_edge(center: Point, edge: Point) -> Self {
        Self::new(center.x, center.y, edge.x - center.x, edge.y - center.y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.cx, self.cy)
    }

    /// The legacy `[cx, cy, rx, ry]` tuple.
    pub fn to_tuple(&self) -> [f64; 4] {
        [self.cx, self.cy, self.rx, self.ry]
    }
}

impl RegionGeometry for RegionEllipse {
    fn anchor(&self) -> Point {
        self.center()
    }

    fn handles(&self) -> Vec<Point> {
        vec![self.center()]
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.cx - self.rx,
            self.cy - self.ry,
            self.cx + self.rx,
            self.cy + self.ry,
        )
    }

    fn scaled(&self, sx: f64, sy: f64) -> RegionShape {
        RegionShape::Ellipse(RegionEllipse::new(
            self.cx * sx,
            self.cy * sy,
            self.rx * sx,
            self.ry * sy,
        ))
    }
}
