use crate::error::{OperationError, Result};
use crate::geometry::Plane;
use crate::math::{Point2, Point3};
use crate::operations::shaping::Extrude;
use crate::topology::{SolidId, TopologyStore};

/// Creates an axis-aligned box solid from two corner points.
pub struct MakeBox {
    min_corner: Point3,
    max_corner: Point3,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(min_corner: Point3, max_corner: Point3) -> Self {
        Self {
            min_corner,
            max_corner,
        }
    }

    /// A `length × width × height` box centered on the world origin.
    #[must_use]
    pub fn centered(length: f64, width: f64, height: f64) -> Self {
        let half = Point3::new(length / 2.0, width / 2.0, height / 2.0);
        Self::new(Point3::new(-half.x, -half.y, -half.z), half)
    }

    /// Executes the operation, creating the box in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if any extent is not positive.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        let size = self.max_corner - self.min_corner;
        if size.iter().any(|&d| !d.is_finite() || d <= 0.0) {
            return Err(OperationError::InvalidInput(format!(
                "box extents must be positive, got {} x {} x {}",
                size.x, size.y, size.z
            ))
            .into());
        }

        let base = Plane::xy().offset(self.min_corner.z);
        let (x0, y0) = (self.min_corner.x, self.min_corner.y);
        let (x1, y1) = (self.max_corner.x, self.max_corner.y);
        let profile = vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ];
        Extrude::new(base, profile, size.z).execute(store)
    }
}
