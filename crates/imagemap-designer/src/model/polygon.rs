use imagemap_core::ShapeError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::{format_number, Point, RegionGeometry, RegionShape};

/// Ordered polygon vertices, encoded on the wire as `"x,y x,y ..."`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointList(pub Vec<Point>);

impl PointList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, p: Point) {
        self.0.push(p);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Arithmetic mean of the vertices.
    pub fn centroid(&self) -> Option<Point> {
        if self.0.is_empty() {
            return None;
        }
        let n = self.0.len() as f64;
        let (sx, sy) = self
            .0
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point::new(sx / n, sy / n))
    }
}

impl fmt::Display for PointList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{},{}", format_number(p.x), format_number(p.y))?;
        }
        Ok(())
    }
}

impl FromStr for PointList {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(|token| {
                let invalid = || ShapeError::InvalidPoint {
                    point: token.to_string(),
                };
                let (x, y) = token.split_once(',').ok_or_else(invalid)?;
                let x = x.trim().parse::<f64>().map_err(|_| invalid())?;
                let y = y.trim().parse::<f64>().map_err(|_| invalid())?;
                if !x.is_finite() || !y.is_finite() {
                    return Err(invalid());
                }
                Ok(Point::new(x, y))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(PointList)
    }
}

impl Serialize for PointList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PointList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Closed polygon with at least three vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolygonWire")]
pub struct RegionPolygon {
    pub points: PointList,
}

#[derive(Deserialize)]
struct PolygonWire {
    points: PointList,
}

impl TryFrom<PolygonWire> for RegionPolygon {
    type Error = ShapeError;

    fn try_from(wire: PolygonWire) -> Result<Self, Self::Error> {
        RegionPolygon::new(wire.points)
    }
}

impl RegionPolygon {
    pub fn new(points: PointList) -> Result<Self, ShapeError> {
        if points.len() < 3 {
            return Err(ShapeError::TooFewPoints {
                count: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// Decodes a legacy point string.
    pub fn parse(points: &str) -> Result<Self, ShapeError> {
        Self::new(points.parse()?)
    }
}

impl RegionGeometry for RegionPolygon {
    fn anchor(&self) -> Point {
        // A polygon always has vertices, so the centroid exists.
        self.points.centroid().unwrap_or(Point::new(0.0, 0.0))
    }

    fn handles(&self) -> Vec<Point> {
        self.points.0.clone()
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        self.points.0.iter().fold(
            (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |(x1, y1, x2, y2), p| (x1.min(p.x), y1.min(p.y), x2.max(p.x), y2.max(p.y)),
        )
    }

    fn scaled(&self, sx: f64, sy: f64) -> RegionShape {
        let points = self
            .points
            .0
            .iter()
            .map(|p| Point::new(p.x * sx, p.y * sy))
            .collect();
        RegionShape::Polygon(RegionPolygon {
            points: PointList(points),
        })
    }
}
