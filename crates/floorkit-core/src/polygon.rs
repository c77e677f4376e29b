//! Polygon and segment math over flat coordinate lists.
//!
//! Plan geometry stores vertices as `[x1, y1, x2, y2, ...]`. The helpers here
//! work directly on that layout so callers never need to re-pack points.

use serde::{Deserialize, Serialize};

use crate::data::Point2;

/// Below this absolute area a polygon is considered degenerate.
pub const DEGENERATE_AREA: f64 = 1e-4;

/// Axis-aligned bounding box in plan coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn contains(&self, p: Point2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Grows the box by `margin` on every side.
    pub fn expanded(&self, margin: f64) -> Self {
        Self::new(
            self.min_x - margin,
            self.min_y - margin,
            self.max_x + margin,
            self.max_y + margin,
        )
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &Bounds) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }
}

/// Number of complete vertices in a flat coordinate list.
pub fn vertex_count(points: &[f64]) -> usize {
    points.len() / 2
}

/// Iterates the vertices of a flat coordinate list.
pub fn vertices(points: &[f64]) -> impl Iterator<Item = Point2> + '_ {
    points.chunks_exact(2).map(|c| Point2::new(c[0], c[1]))
}

/// Polygon area by the shoelace formula.
///
/// The absolute value is returned; orientation is not used anywhere.
/// Fewer than three vertices give zero.
pub fn signed_area(points: &[f64]) -> f64 {
    let n = vertex_count(points);
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i * 2] * points[j * 2 + 1] - points[j * 2] * points[i * 2 + 1];
    }
    area.abs() / 2.0
}

/// Arithmetic mean of the vertices.
pub fn vertex_mean(points: &[f64]) -> Point2 {
    let n = vertex_count(points);
    if n == 0 {
        return Point2::default();
    }

    let (sx, sy) = vertices(points).fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point2::new(sx / n as f64, sy / n as f64)
}

/// Area centroid of a polygon.
///
/// Falls back to the vertex mean for (near) zero-area polygons, and to the
/// first point when fewer than three vertices are present.
pub fn centroid(points: &[f64]) -> Point2 {
    let n = vertex_count(points);
    if n < 3 {
        return Point2::new(
            points.first().copied().unwrap_or(0.0),
            points.get(1).copied().unwrap_or(0.0),
        );
    }

    let mut cx = 0.0;
    let mut cy = 0.0;
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        let (xi, yi) = (points[i * 2], points[i * 2 + 1]);
        let (xj, yj) = (points[j * 2], points[j * 2 + 1]);
        let cross = xi * yj - xj * yi;
        area += cross;
        cx += (xi + xj) * cross;
        cy += (yi + yj) * cross;
    }
    area /= 2.0;

    if area.abs() < DEGENERATE_AREA {
        return vertex_mean(points);
    }

    Point2::new(cx / (6.0 * area), cy / (6.0 * area))
}

/// Bounding box of a flat coordinate list, `None` when it holds no vertex.
pub fn bounding_box(points: &[f64]) -> Option<Bounds> {
    let mut iter = vertices(points);
    let first = iter.next()?;
    let init = Bounds::new(first.x, first.y, first.x, first.y);
    Some(iter.fold(init, |b, p| {
        Bounds::new(b.min_x.min(p.x), b.min_y.min(p.y), b.max_x.max(p.x), b.max_y.max(p.y))
    }))
}

/// Ray-casting point-in-polygon test.
pub fn point_in_polygon(p: Point2, points: &[f64]) -> bool {
    let n = vertex_count(points);
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (points[i * 2], points[i * 2 + 1]);
        let (xj, yj) = (points[j * 2], points[j * 2 + 1]);
        if (yi > p.y) != (yj > p.y) && p.x < (xj - xi) * (p.y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Shortest distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: Point2, a: Point2, b: Point2) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(&a);
    }

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&Point2::new(a.x + t * dx, a.y + t * dy))
}

/// Area of the triangle `a`, `b`, `c`.
pub fn triangle_area(a: Point2, b: Point2, c: Point2) -> f64 {
    ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() / 2.0
}

/// Rotates every vertex about `center` by `angle_deg`.
///
/// Positive angles turn clockwise in a y-up frame:
/// `x' = x cos + y sin`, `y' = -x sin + y cos`.
pub fn rotate_points(points: &[f64], center: Point2, angle_deg: f64) -> Vec<f64> {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let mut out = Vec::with_capacity(points.len());
    for p in vertices(points) {
        let x = p.x - center.x;
        let y = p.y - center.y;
        out.push(x * cos + y * sin + center.x);
        out.push(-x * sin + y * cos + center.y);
    }
    out
}

/// Adds `(dx, dy)` to every vertex in place.
pub fn translate_points(points: &mut [f64], dx: f64, dy: f64) {
    for pair in points.chunks_exact_mut(2) {
        pair[0] += dx;
        pair[1] += dy;
    }
}
