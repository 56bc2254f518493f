use crate::geometry::Plane;
use crate::math::Point3;

slotmap::new_key_type! {
    /// Unique identifier for a face in the topology store.
    pub struct FaceId;
}

/// Data associated with a planar face.
///
/// The surface normal is the outward normal of the face. The outer
/// boundary is a closed loop (the closing edge is implicit).
#[derive(Debug, Clone)]
pub struct FaceData {
    /// The plane carrying the face, oriented outward.
    pub surface: Plane,
    /// Outer boundary vertices in traversal order.
    pub outer_boundary: Vec<Point3>,
}
