use crate::error::Result;
use crate::math::frame::FaceFrame;
use crate::math::Point2;
use crate::operations::boolean::Intersect;
use crate::operations::shaping::Extrude;
use crate::topology::{SolidId, TopologyStore};

/// Extrudes the face boundary into a slab reaching `1.5 · max_height` to
/// either side of the face.
///
/// # Errors
///
/// Returns an error if the boundary is degenerate or `max_height` is not
/// positive.
pub fn clip_volume(
    store: &mut TopologyStore,
    frame: &FaceFrame,
    boundary: &[Point2],
    max_height: f64,
) -> Result<SolidId> {
    let base = frame.plane()?.offset(-1.5 * max_height);
    Extrude::new(base, boundary.to_vec(), 3.0 * max_height).execute(store)
}

/// Trims `texture` to the face boundary.
///
/// # Errors
///
/// Returns an error if the clip volume cannot be built or the intersection
/// fails.
pub fn clip_to_face(
    store: &mut TopologyStore,
    texture: SolidId,
    frame: &FaceFrame,
    boundary: &[Point2],
    max_height: f64,
) -> Result<SolidId> {
    let volume = clip_volume(store, frame, boundary, max_height)?;
    Intersect::new(texture, volume).execute(store)
}
