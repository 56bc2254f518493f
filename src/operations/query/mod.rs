mod bounding_box;
mod classify;
mod faces;

pub use bounding_box::{Aabb, BoundingBox};
pub use classify::{classify_point_in_solid, PointClassification};
pub use faces::{face_center, FaceSelector, SelectFaces, SolidFaces};
