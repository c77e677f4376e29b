//! Plan geometry kinds: segment, polygon and point.
//!
//! Each kind serializes with a `kind` tag (`"segment"`, `"polygon"`,
//! `"point"`) and a flat `points` list where applicable, matching the plan
//! exchange format.

use serde::{Deserialize, Serialize};

use crate::polygon::{self, Bounds};

/// A point in plan pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point2 {
        Point2::new(self.x + dx, self.y + dy)
    }
}

/// Two-endpoint geometry used by walls, doors and windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename = "segment")]
pub struct Segment {
    /// `[x1, y1, x2, y2]`
    pub points: [f64; 4],
}

impl Segment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            points: [x1, y1, x2, y2],
        }
    }

    pub fn start(&self) -> Point2 {
        Point2::new(self.points[0], self.points[1])
    }

    pub fn end(&self) -> Point2 {
        Point2::new(self.points[2], self.points[3])
    }

    pub fn dx(&self) -> f64 {
        self.points[2] - self.points[0]
    }

    pub fn dy(&self) -> f64 {
        self.points[3] - self.points[1]
    }

    pub fn length(&self) -> f64 {
        self.dx().hypot(self.dy())
    }

    pub fn midpoint(&self) -> Point2 {
        Point2::new(
            (self.points[0] + self.points[2]) / 2.0,
            (self.points[1] + self.points[3]) / 2.0,
        )
    }

    /// Direction angle in radians, `atan2(dy, dx)`.
    pub fn angle(&self) -> f64 {
        self.dy().atan2(self.dx())
    }

    pub fn is_degenerate(&self) -> bool {
        self.length() == 0.0
    }

    /// Unit normal `(-dy, dx) / len`, or `None` for a zero-length segment.
    pub fn unit_normal(&self) -> Option<(f64, f64)> {
        let len = self.length();
        if len == 0.0 {
            return None;
        }
        Some((-self.dy() / len, self.dx() / len))
    }

    /// Corners of the slab of width `thickness` centered on the segment:
    /// `p1 + n`, `p2 + n`, `p2 - n`, `p1 - n` with `n` the half-thickness normal.
    pub fn offset_quad(&self, thickness: f64) -> Option<[Point2; 4]> {
        let (nx, ny) = self.unit_normal()?;
        let (ox, oy) = (nx * thickness / 2.0, ny * thickness / 2.0);
        let (a, b) = (self.start(), self.end());
        Some([
            a.offset(ox, oy),
            b.offset(ox, oy),
            b.offset(-ox, -oy),
            a.offset(-ox, -oy),
        ])
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Segment {
        let mut points = self.points;
        polygon::translate_points(&mut points, dx, dy);
        Segment { points }
    }

    /// Rotation about the midpoint, clockwise-positive.
    pub fn rotated(&self, angle_deg: f64) -> Segment {
        let r = polygon::rotate_points(&self.points, self.midpoint(), angle_deg);
        Segment::new(r[0], r[1], r[2], r[3])
    }

    /// Scales both endpoints away from the midpoint by `factor`.
    pub fn scaled_about_center(&self, factor: f64) -> Segment {
        let c = self.midpoint();
        let hx = self.dx() / 2.0 * factor;
        let hy = self.dy() / 2.0 * factor;
        Segment::new(c.x - hx, c.y - hy, c.x + hx, c.y + hy)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.points[0].min(self.points[2]),
            self.points[1].min(self.points[3]),
            self.points[0].max(self.points[2]),
            self.points[1].max(self.points[3]),
        )
    }
}

/// Closed polygon used by zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename = "polygon")]
pub struct Polygon {
    /// `[x1, y1, x2, y2, ..., xn, yn]`
    pub points: Vec<f64>,
}

impl Polygon {
    pub fn new(points: Vec<f64>) -> Self {
        Self { points }
    }

    pub fn from_vertices(vertices: &[Point2]) -> Self {
        Self::new(vertices.iter().flat_map(|p| [p.x, p.y]).collect())
    }

    /// Even coordinate count and at least three vertices.
    pub fn is_valid(&self) -> bool {
        self.points.len() % 2 == 0 && self.points.len() >= 6
    }

    pub fn vertex_count(&self) -> usize {
        polygon::vertex_count(&self.points)
    }

    pub fn vertices(&self) -> impl Iterator<Item = Point2> + '_ {
        polygon::vertices(&self.points)
    }

    pub fn area(&self) -> f64 {
        polygon::signed_area(&self.points)
    }

    pub fn centroid(&self) -> Point2 {
        polygon::centroid(&self.points)
    }

    /// Rotation pivot: the mean of the vertices.
    pub fn pivot(&self) -> Point2 {
        polygon::vertex_mean(&self.points)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        polygon::bounding_box(&self.points)
    }

    pub fn contains(&self, p: Point2) -> bool {
        polygon::point_in_polygon(p, &self.points)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Polygon {
        let mut points = self.points.clone();
        polygon::translate_points(&mut points, dx, dy);
        Polygon { points }
    }

    /// Rotation about the vertex mean, clockwise-positive.
    pub fn rotated(&self, angle_deg: f64) -> Polygon {
        Polygon::new(polygon::rotate_points(&self.points, self.pivot(), angle_deg))
    }

    /// Scales x coordinates about the bounding-box center.
    pub fn scaled_x(&self, factor: f64) -> Polygon {
        self.scaled_axis(0, factor)
    }

    /// Scales y coordinates about the bounding-box center.
    pub fn scaled_y(&self, factor: f64) -> Polygon {
        self.scaled_axis(1, factor)
    }

    fn scaled_axis(&self, axis: usize, factor: f64) -> Polygon {
        let Some(bounds) = self.bounds() else {
            return self.clone();
        };
        let center = bounds.center();
        let c = if axis == 0 { center.x } else { center.y };
        let points = self
            .points
            .iter()
            .enumerate()
            .map(|(i, &v)| if i % 2 == axis { c + (v - c) * factor } else { v })
            .collect();
        Polygon { points }
    }
}

/// Single anchor point used by labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename = "point")]
pub struct PointGeometry {
    pub x: f64,
    pub y: f64,
}

impl PointGeometry {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> PointGeometry {
        PointGeometry::new(self.x + dx, self.y + dy)
    }
}
