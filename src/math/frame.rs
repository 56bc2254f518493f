use crate::error::{GeometryError, Result, TextureError};
use crate::geometry::Plane;

use super::{Point2, Point3, Vector3, TOLERANCE};

/// Cross products shorter than this reject a reference axis as parallel.
const PARALLEL_AXIS_TOLERANCE: f64 = 1e-6;

/// Rotations smaller than this (in degrees) are not applied.
const MIN_ROTATION_DEGREES: f64 = 1e-6;

/// Local coordinate frame tangent to a face.
///
/// `u` and `v` span the face plane, `normal` points out of the face.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceFrame {
    /// Frame origin (the face center).
    pub origin: Point3,
    /// First tangent direction.
    pub u: Vector3,
    /// Second tangent direction, `normal × u` before rotation.
    pub v: Vector3,
    /// Unit face normal.
    pub normal: Vector3,
}

impl FaceFrame {
    /// Builds the frame for a face centered at `origin` with the given normal,
    /// with the tangent basis rotated about the normal by `rotation_degrees`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] for a zero-length normal.
    pub fn new(origin: Point3, normal: &Vector3, rotation_degrees: f64) -> Result<Self> {
        let normal = unit(normal)?;
        let (u, v) = tangent_basis(&normal, rotation_degrees)?;
        Ok(Self {
            origin,
            u,
            v,
            normal,
        })
    }

    /// Maps frame-local 2D coordinates to a world point on the face plane.
    #[must_use]
    pub fn to_world(&self, local: &Point2) -> Point3 {
        self.origin + self.u * local.x + self.v * local.y
    }

    /// Projects a world point onto the frame's tangent axes.
    #[must_use]
    pub fn to_local(&self, point: &Point3) -> Point2 {
        let rel = point - self.origin;
        Point2::new(rel.dot(&self.u), rel.dot(&self.v))
    }

    /// The face plane with `u` as its x direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame axes are degenerate.
    pub fn plane(&self) -> Result<Plane> {
        Plane::new(self.origin, self.u, self.normal)
    }
}

/// Computes two unit tangent vectors orthogonal to `normal` and to each other.
///
/// Reference axes are tried in X, Y, Z order; the first one whose cross
/// product with the normal is long enough seeds `u`. A non-zero rotation
/// turns `u` and `v` jointly about the normal.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] for a zero-length normal and
/// [`TextureError::NoReferenceAxis`] if every reference axis is parallel to
/// the normal, which cannot happen for a unit vector.
pub fn tangent_basis(normal: &Vector3, rotation_degrees: f64) -> Result<(Vector3, Vector3)> {
    let normal = unit(normal)?;

    let u = [Vector3::x(), Vector3::y(), Vector3::z()]
        .iter()
        .map(|reference| normal.cross(reference))
        .find(|cross| cross.norm() > PARALLEL_AXIS_TOLERANCE)
        .map(|cross| cross.normalize())
        .ok_or(TextureError::NoReferenceAxis {
            x: normal.x,
            y: normal.y,
            z: normal.z,
        })?;
    let v = normal.cross(&u).normalize();

    if rotation_degrees.abs() <= MIN_ROTATION_DEGREES {
        return Ok((u, v));
    }

    let (sin, cos) = rotation_degrees.to_radians().sin_cos();
    let rotated_u = u * cos + v * sin;
    let rotated_v = -u * sin + v * cos;
    Ok((rotated_u.normalize(), rotated_v.normalize()))
}

fn unit(v: &Vector3) -> Result<Vector3> {
    let len = v.norm();
    if len < TOLERANCE || !len.is_finite() {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(v / len)
}
