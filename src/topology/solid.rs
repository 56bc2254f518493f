use crate::geometry::Plane;
use crate::math::Point2;

use super::face::FaceId;

slotmap::new_key_type! {
    /// Unique identifier for a solid in the topology store.
    pub struct SolidId;
}

/// A right prism: a planar profile swept along its plane normal.
#[derive(Debug, Clone)]
pub struct PrismData {
    /// Plane of the bottom cap; the prism grows along its normal.
    pub base: Plane,
    /// Counter-clockwise profile in `base` local coordinates.
    pub profile: Vec<Point2>,
    /// Extrusion height, always positive.
    pub height: f64,
    /// Bottom, top, then one side face per profile edge.
    pub faces: Vec<FaceId>,
}

/// Data associated with a solid.
///
/// Leaves are prisms; boolean results reference their operands, which stay
/// owned by the store.
#[derive(Debug, Clone)]
pub enum SolidData {
    /// A primitive prism.
    Prism(PrismData),
    /// Union of all children.
    Compound(Vec<SolidId>),
    /// Region common to both operands.
    Intersection(SolidId, SolidId),
    /// First operand minus the second.
    Difference(SolidId, SolidId),
}
