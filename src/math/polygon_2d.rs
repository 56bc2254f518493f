use std::f64::consts::PI;

use super::{Point2, TOLERANCE};

/// Denominator below which two segments are treated as parallel.
pub const PARALLEL_TOLERANCE: f64 = 1e-10;

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Area centroid of a simple polygon.
///
/// Returns `None` when the polygon has (numerically) zero area.
#[must_use]
pub fn centroid(points: &[Point2]) -> Option<Point2> {
    let area = signed_area(points);
    if area.abs() < TOLERANCE {
        return None;
    }
    let n = points.len();
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    let k = 1.0 / (6.0 * area);
    Some(Point2::new(cx * k, cy * k))
}

/// Ray-casting point-in-polygon test.
///
/// Casts a horizontal ray towards +x and toggles on every crossed edge.
/// Horizontal edges never toggle. Points exactly on the boundary may land
/// on either side.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn point_in_polygon(point: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let (x, y) = (point.x, point.y);
    let mut inside = false;
    let mut p1 = polygon[0];
    for i in 1..=n {
        let p2 = polygon[i % n];
        if y > p1.y.min(p2.y) && y <= p1.y.max(p2.y) && x <= p1.x.max(p2.x) {
            let x_cross = if p1.y == p2.y {
                p1.x
            } else {
                (y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x
            };
            if p1.x == p2.x || x <= x_cross {
                inside = !inside;
            }
        }
        p1 = p2;
    }
    inside
}

/// Bounded segment-segment intersection test via the parametric line equations.
///
/// Parallel (and collinear) segments never intersect. Endpoint contact counts.
#[must_use]
pub fn segments_intersect(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    let denom = (a0.x - a1.x) * (b0.y - b1.y) - (a0.y - a1.y) * (b0.x - b1.x);
    if denom.abs() < PARALLEL_TOLERANCE {
        return false;
    }
    let t = ((a0.x - b0.x) * (b0.y - b1.y) - (a0.y - b0.y) * (b0.x - b1.x)) / denom;
    let u = -((a0.x - a1.x) * (a0.y - b0.y) - (a0.y - a1.y) * (a0.x - b0.x)) / denom;
    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// Vertices of a regular polygon with its first vertex on the +x axis.
#[must_use]
pub fn regular_polygon(center: &Point2, radius: f64, sides: usize) -> Vec<Point2> {
    #[allow(clippy::cast_precision_loss)]
    let step = 2.0 * PI / sides as f64;
    (0..sides)
        .map(|k| {
            #[allow(clippy::cast_precision_loss)]
            let angle = k as f64 * step;
            Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

/// Axis-aligned 2D extent of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    /// Minimum corner.
    pub min: Point2,
    /// Maximum corner.
    pub max: Point2,
}

impl Bounds2 {
    /// Computes the extent of `points`, or `None` if the slice is empty.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self { min, max })
    }

    /// Extent along x.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along y.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}
