use crate::error::Result;
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::topology::{PrismData, SolidData, SolidId, TopologyStore};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Smallest box containing every point, or `None` for an empty set.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(
            Self {
                min: first,
                max: first,
            },
            |acc, p| Self {
                min: acc.min.inf(p),
                max: acc.max.sup(p),
            },
        ))
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Overlap of both boxes, or `None` if they are disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let min = self.min.sup(&other.min);
        let max = self.max.inf(&other.max);
        if (0..3).any(|i| min[i] > max[i] + TOLERANCE) {
            return None;
        }
        Some(Self {
            min,
            max: max.sup(&min),
        })
    }

    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Whether `other` lies inside this box, up to `tolerance`.
    #[must_use]
    pub fn contains(&self, other: &Self, tolerance: f64) -> bool {
        (0..3).all(|i| {
            other.min[i] >= self.min[i] - tolerance && other.max[i] <= self.max[i] + tolerance
        })
    }
}

/// Computes the axis-aligned bounding box of a solid.
///
/// Prisms and unions are bounded exactly. An intersection is bounded by
/// pushing each operand's box down into the other, so a texture clipped by
/// a face volume reports its clipped extent. A difference reports the box
/// of its first operand.
pub struct BoundingBox {
    solid: SolidId,
}

impl BoundingBox {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the query, returning the AABB (`None` for an empty solid).
    ///
    /// # Errors
    ///
    /// Returns an error if the solid or one of its operands is missing.
    pub fn execute(&self, store: &TopologyStore) -> Result<Option<Aabb>> {
        bounds_within(store, self.solid, None)
    }
}

fn bounds_within(store: &TopologyStore, id: SolidId, clip: Option<&Aabb>) -> Result<Option<Aabb>> {
    match store.solid(id)? {
        SolidData::Prism(prism) => {
            let bounds = prism_bounds(prism);
            Ok(match clip {
                Some(clip) => bounds.and_then(|b| b.intersection(clip)),
                None => bounds,
            })
        }
        SolidData::Compound(children) => {
            let mut acc: Option<Aabb> = None;
            for &child in children {
                if let Some(b) = bounds_within(store, child, clip)? {
                    acc = Some(acc.map_or(b, |a| a.union(&b)));
                }
            }
            Ok(acc)
        }
        &SolidData::Intersection(a, b) => {
            let Some(b_bounds) = bounds_within(store, b, clip)? else {
                return Ok(None);
            };
            let Some(a_bounds) = bounds_within(store, a, Some(&b_bounds))? else {
                return Ok(None);
            };
            bounds_within(store, b, Some(&a_bounds))
        }
        &SolidData::Difference(a, _) => bounds_within(store, a, clip),
    }
}

fn prism_bounds(prism: &PrismData) -> Option<Aabb> {
    let offset = prism.base.normal() * prism.height;
    let corners: Vec<Point3> = prism
        .profile
        .iter()
        .flat_map(|p| {
            let bottom = prism.base.to_world(p);
            [bottom, bottom + offset]
        })
        .collect();
    Aabb::from_points(&corners)
}
