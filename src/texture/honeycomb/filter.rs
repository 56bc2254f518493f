use crate::math::polygon_2d::{point_in_polygon, regular_polygon, segments_intersect};
use crate::math::Point2;

/// Vertices of a regular hexagon with radius `side_len`, first vertex on +x.
#[must_use]
pub fn hexagon(center: &Point2, side_len: f64) -> Vec<Point2> {
    regular_polygon(center, side_len, 6)
}

/// Whether two polygons overlap.
///
/// Accepts as soon as a vertex of either polygon lies inside the other or
/// any pair of edges crosses, which covers containment, partial overlap and
/// slivers with no contained vertex. Works for non-convex `face`.
#[must_use]
pub fn hex_overlaps_face(hex: &[Point2], face: &[Point2]) -> bool {
    hex.iter().any(|p| point_in_polygon(p, face))
        || face.iter().any(|p| point_in_polygon(p, hex))
        || edges(hex).any(|(a0, a1)| edges(face).any(|(b0, b1)| segments_intersect(a0, a1, b0, b1)))
}

fn edges(polygon: &[Point2]) -> impl Iterator<Item = (&Point2, &Point2)> {
    polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .take(polygon.len())
}
