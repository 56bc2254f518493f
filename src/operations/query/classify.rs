use crate::error::Result;
use crate::math::polygon_2d::point_in_polygon;
use crate::math::{Point3, TOLERANCE};
use crate::topology::{PrismData, SolidData, SolidId, TopologyStore};

/// Classification of a point relative to a solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClassification {
    Inside,
    Outside,
}

/// Classifies a point as inside or outside a solid.
///
/// Prisms test the elevation range along their normal and the profile with
/// a ray-casting test; boolean nodes combine their operands. Points within
/// tolerance of a cap count as inside; points on a side wall may land on
/// either side.
///
/// # Errors
///
/// Returns an error if the solid or one of its operands is missing.
pub fn classify_point_in_solid(
    point: &Point3,
    solid_id: SolidId,
    store: &TopologyStore,
) -> Result<PointClassification> {
    let inside = contains(store, solid_id, point)?;
    Ok(if inside {
        PointClassification::Inside
    } else {
        PointClassification::Outside
    })
}

fn contains(store: &TopologyStore, id: SolidId, point: &Point3) -> Result<bool> {
    match store.solid(id)? {
        SolidData::Prism(prism) => Ok(prism_contains(prism, point)),
        SolidData::Compound(children) => {
            for &child in children {
                if contains(store, child, point)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        &SolidData::Intersection(a, b) => Ok(contains(store, a, point)? && contains(store, b, point)?),
        &SolidData::Difference(a, b) => Ok(contains(store, a, point)? && !contains(store, b, point)?),
    }
}

fn prism_contains(prism: &PrismData, point: &Point3) -> bool {
    let elevation = prism.base.elevation(point);
    if elevation < -TOLERANCE || elevation > prism.height + TOLERANCE {
        return false;
    }
    point_in_polygon(&prism.base.to_local(point), &prism.profile)
}
