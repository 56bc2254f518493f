use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};

/// An infinite plane in 3D space.
///
/// Defined by an origin, an in-plane x direction (`u_dir`), and a unit
/// normal. The y direction is `normal × u_dir`, so `(u, v, normal)` is
/// right-handed.
///
/// Parametric form: `P(x, y) = origin + x * u_dir + y * v_dir`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
}

impl Plane {
    /// Creates a plane from an origin, an x direction, and a normal.
    ///
    /// The x direction is projected into the plane, so it only needs to be
    /// non-parallel to the normal.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is zero-length or the x direction is
    /// parallel to it.
    pub fn new(origin: Point3, x_dir: Vector3, normal: Vector3) -> Result<Self> {
        let normal_len = normal.norm();
        if normal_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / normal_len;

        let in_plane = x_dir - normal * x_dir.dot(&normal);
        let u_len = in_plane.norm();
        if u_len < TOLERANCE {
            return Err(
                GeometryError::Degenerate("plane x direction is parallel to its normal".into())
                    .into(),
            );
        }
        let u_dir = in_plane / u_len;
        let v_dir = normal.cross(&u_dir);

        Ok(Self {
            origin,
            u_dir,
            v_dir,
            normal,
        })
    }

    /// The XY plane through the world origin.
    #[must_use]
    pub fn xy() -> Self {
        Self {
            origin: Point3::origin(),
            u_dir: Vector3::x(),
            v_dir: Vector3::y(),
            normal: Vector3::z(),
        }
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the U (local x) direction vector.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the V (local y) direction vector.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Returns the unit normal of the plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Maps plane-local coordinates to a world point.
    #[must_use]
    pub fn to_world(&self, local: &Point2) -> Point3 {
        self.origin + self.u_dir * local.x + self.v_dir * local.y
    }

    /// Projects a world point into plane-local coordinates.
    #[must_use]
    pub fn to_local(&self, point: &Point3) -> Point2 {
        let rel = point - self.origin;
        Point2::new(rel.dot(&self.u_dir), rel.dot(&self.v_dir))
    }

    /// Signed distance of a point above the plane, along the normal.
    #[must_use]
    pub fn elevation(&self, point: &Point3) -> f64 {
        (point - self.origin).dot(&self.normal)
    }

    /// Returns a copy of this plane moved `distance` along its normal.
    #[must_use]
    pub fn offset(&self, distance: f64) -> Self {
        Self {
            origin: self.origin + self.normal * distance,
            ..self.clone()
        }
    }
}
