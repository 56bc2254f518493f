use crate::error::{OperationError, Result};
use crate::geometry::Plane;
use crate::math::polygon_2d::signed_area;
use crate::math::{Point2, Point3, TOLERANCE};
use crate::topology::{FaceData, FaceId, PrismData, SolidData, SolidId, TopologyStore};

/// Extrudes a planar profile along its plane normal to create a prism.
pub struct Extrude {
    base: Plane,
    profile: Vec<Point2>,
    height: f64,
}

impl Extrude {
    /// Creates a new `Extrude` operation.
    ///
    /// `profile` is given in the local coordinates of `base`; the prism spans
    /// from the base plane to `height` along its normal.
    #[must_use]
    pub fn new(base: Plane, profile: Vec<Point2>, height: f64) -> Self {
        Self {
            base,
            profile,
            height,
        }
    }

    /// Executes the extrusion, creating the solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the height is not a
    /// positive finite number, or the profile has fewer than three distinct
    /// points, non-finite coordinates, or zero area.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if !self.height.is_finite() || self.height <= TOLERANCE {
            return Err(OperationError::InvalidInput(format!(
                "extrude height must be positive, got {}",
                self.height
            ))
            .into());
        }
        if self
            .profile
            .iter()
            .any(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(
                OperationError::InvalidInput("profile has non-finite coordinates".into()).into(),
            );
        }

        let mut profile = dedup_closed(&self.profile);
        if profile.len() < 3 {
            return Err(OperationError::InvalidInput(format!(
                "profile needs at least 3 distinct points, got {}",
                profile.len()
            ))
            .into());
        }

        // Counter-clockwise in the base frame keeps side normals outward
        let area = signed_area(&profile);
        if area.abs() < TOLERANCE {
            return Err(
                OperationError::InvalidInput("degenerate profile: zero area".into()).into(),
            );
        }
        if area < 0.0 {
            profile.reverse();
        }

        let normal = *self.base.normal();
        let offset = normal * self.height;
        let bottom: Vec<Point3> = profile.iter().map(|p| self.base.to_world(p)).collect();
        let top: Vec<Point3> = bottom.iter().map(|p| p + offset).collect();

        let mut faces = Vec::with_capacity(profile.len() + 2);

        let bottom_boundary: Vec<Point3> = bottom.iter().rev().copied().collect();
        let bottom_plane = Plane::new(*self.base.origin(), *self.base.u_dir(), -normal)?;
        faces.push(add_face(store, bottom_plane, bottom_boundary));

        let top_plane = self.base.offset(self.height);
        faces.push(add_face(store, top_plane, top.clone()));

        let n = bottom.len();
        for i in 0..n {
            let j = (i + 1) % n;
            let along = bottom[j] - bottom[i];
            let outward = along.cross(&normal);
            let side_plane = Plane::new(bottom[i], along, outward)?;
            faces.push(add_face(
                store,
                side_plane,
                vec![bottom[i], bottom[j], top[j], top[i]],
            ));
        }

        Ok(store.add_solid(SolidData::Prism(PrismData {
            base: self.base.clone(),
            profile,
            height: self.height,
            faces,
        })))
    }
}

fn add_face(store: &mut TopologyStore, surface: Plane, outer_boundary: Vec<Point3>) -> FaceId {
    store.add_face(FaceData {
        surface,
        outer_boundary,
    })
}

/// Drops consecutive duplicates, including a repeated closing point.
fn dedup_closed(points: &[Point2]) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().is_some_and(|q| (p - q).norm() < TOLERANCE) {
            continue;
        }
        out.push(*p);
    }
    while out.len() > 1 {
        let closes = out
            .first()
            .zip(out.last())
            .is_some_and(|(a, b)| (a - b).norm() < TOLERANCE);
        if !closes {
            break;
        }
        out.pop();
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn faces_of(store: &TopologyStore, solid: SolidId) -> Vec<FaceId> {
        match store.solid(solid).unwrap() {
            SolidData::Prism(prism) => prism.faces.clone(),
            other => panic!("expected prism, got {other:?}"),
        }
    }

    #[test]
    fn unit_cube_has_6_faces() {
        let mut store = TopologyStore::new();
        let solid = Extrude::new(
            Plane::xy(),
            vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)],
            1.0,
        )
        .execute(&mut store)
        .unwrap();
        assert_eq!(faces_of(&store, solid).len(), 6);
    }

    #[test]
    fn hexagonal_prism_has_8_faces() {
        let mut store = TopologyStore::new();
        let hex = crate::math::polygon_2d::regular_polygon(&p(0.0, 0.0), 2.0, 6);
        let solid = Extrude::new(Plane::xy(), hex, 3.0)
            .execute(&mut store)
            .unwrap();
        assert_eq!(faces_of(&store, solid).len(), 8);
    }

    #[test]
    fn clockwise_profile_is_normalized() {
        let mut store = TopologyStore::new();
        let solid = Extrude::new(
            Plane::xy(),
            vec![p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0)],
            1.0,
        )
        .execute(&mut store)
        .unwrap();
        let SolidData::Prism(prism) = store.solid(solid).unwrap() else {
            panic!("expected prism");
        };
        assert!(signed_area(&prism.profile) > 0.0);
    }

    #[test]
    fn all_face_normals_point_outward() {
        let mut store = TopologyStore::new();
        let solid = Extrude::new(
            Plane::xy(),
            vec![p(0.0, 0.0), p(0.0, 2.0), p(2.0, 2.0), p(2.0, 0.0)],
            3.0,
        )
        .execute(&mut store)
        .unwrap();

        let centroid = Point3::new(1.0, 1.0, 1.5);
        for face_id in faces_of(&store, solid) {
            let face = store.face(face_id).unwrap();
            let to_face = face.outer_boundary[0] - centroid;
            let normal = face.surface.normal();
            assert!(
                normal.dot(&to_face) > 0.0,
                "face normal {normal:?} should point outward (dot with {to_face:?})"
            );
        }
    }

    #[test]
    fn extrudes_along_tilted_plane_normal() {
        let mut store = TopologyStore::new();
        let base = Plane::new(Point3::origin(), Vector3::z(), Vector3::x()).unwrap();
        let solid = Extrude::new(
            base,
            vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)],
            2.0,
        )
        .execute(&mut store)
        .unwrap();
        let faces = faces_of(&store, solid);
        let top = store.face(faces[1]).unwrap();
        for point in &top.outer_boundary {
            assert!((point.x - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn repeated_closing_point_is_ignored() {
        let mut store = TopologyStore::new();
        let solid = Extrude::new(
            Plane::xy(),
            vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 0.0)],
            1.0,
        )
        .execute(&mut store)
        .unwrap();
        assert_eq!(faces_of(&store, solid).len(), 5);
    }

    #[test]
    fn zero_height_returns_error() {
        let mut store = TopologyStore::new();
        let result = Extrude::new(
            Plane::xy(),
            vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)],
            0.0,
        )
        .execute(&mut store);
        assert!(result.is_err());
    }

    #[test]
    fn collinear_profile_returns_error() {
        let mut store = TopologyStore::new();
        let result = Extrude::new(
            Plane::xy(),
            vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)],
            1.0,
        )
        .execute(&mut store);
        assert!(result.is_err());
        assert_eq!(store.solid_count(), 0);
    }

    #[test]
    fn non_finite_profile_returns_error() {
        let mut store = TopologyStore::new();
        let result = Extrude::new(
            Plane::xy(),
            vec![p(0.0, 0.0), p(f64::NAN, 0.0), p(1.0, 1.0)],
            1.0,
        )
        .execute(&mut store);
        assert!(result.is_err());
    }
}
