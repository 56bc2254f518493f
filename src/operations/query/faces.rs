use std::str::FromStr;

use crate::error::{OperationError, ReliefError, Result};
use crate::math::polygon_2d::centroid;
use crate::math::{Point2, Point3, Vector3};
use crate::topology::{FaceId, SolidData, SolidId, TopologyStore};

/// Faces whose extremal coordinates differ by less than this are tied.
const EXTREMUM_TOLERANCE: f64 = 1e-4;

/// Minimum |cos| between a face normal and a selector direction.
const DIRECTION_TOLERANCE: f64 = 1e-6;

/// Area centroid of a face's outer boundary.
///
/// Degenerate (zero-area) boundaries fall back to the vertex average.
///
/// # Errors
///
/// Returns an error if the face is not in the store or has no vertices.
pub fn face_center(store: &TopologyStore, face: FaceId) -> Result<Point3> {
    let data = store.face(face)?;
    let surface = &data.surface;
    let local: Vec<Point2> = data
        .outer_boundary
        .iter()
        .map(|p| surface.to_local(p))
        .collect();
    if let Some(c) = centroid(&local) {
        // Lift back with the boundary's mean elevation so slightly warped
        // loops keep their center on the loop
        #[allow(clippy::cast_precision_loss)]
        let lift = data
            .outer_boundary
            .iter()
            .map(|p| surface.elevation(p))
            .sum::<f64>()
            / data.outer_boundary.len() as f64;
        return Ok(surface.to_world(&c) + surface.normal() * lift);
    }
    if data.outer_boundary.is_empty() {
        return Err(OperationError::InvalidInput("face has no boundary vertices".into()).into());
    }
    #[allow(clippy::cast_precision_loss)]
    let inv = 1.0 / data.outer_boundary.len() as f64;
    let sum = data
        .outer_boundary
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Ok(Point3::from(sum * inv))
}

/// Collects the faces bounding a solid.
///
/// Prisms contribute their own faces and unions the faces of every
/// operand. Intersections and differences contribute the faces of their
/// first operand.
pub struct SolidFaces {
    solid: SolidId,
}

impl SolidFaces {
    /// Creates a new `SolidFaces` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid or one of its operands is missing.
    pub fn execute(&self, store: &TopologyStore) -> Result<Vec<FaceId>> {
        let mut faces = Vec::new();
        collect_faces(store, self.solid, &mut faces)?;
        Ok(faces)
    }
}

fn collect_faces(store: &TopologyStore, id: SolidId, out: &mut Vec<FaceId>) -> Result<()> {
    match store.solid(id)? {
        SolidData::Prism(prism) => out.extend_from_slice(&prism.faces),
        SolidData::Compound(children) => {
            for &child in children {
                collect_faces(store, child, out)?;
            }
        }
        &SolidData::Intersection(a, _) | &SolidData::Difference(a, _) => {
            collect_faces(store, a, out)?;
        }
    }
    Ok(())
}

/// Chooses faces of a solid by position or orientation.
///
/// Parses from the usual string shorthand: `*` for every face, `>Z` / `<Z`
/// for the faces farthest along / against an axis, `+Z` / `-Z` for faces
/// whose normal points along an axis, and `|Z` for faces whose normal is
/// parallel to it.
#[derive(Debug, Clone, PartialEq)]
pub enum FaceSelector {
    /// Every face.
    All,
    /// Faces whose centers lie farthest along the direction.
    Max(Vector3),
    /// Faces whose centers lie farthest against the direction.
    Min(Vector3),
    /// Faces whose outward normal points along the direction.
    Normal(Vector3),
    /// Faces whose normal is parallel (either sense) to the direction.
    Parallel(Vector3),
}

impl FromStr for FaceSelector {
    type Err = ReliefError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "*" || s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        let invalid = || {
            ReliefError::from(OperationError::InvalidInput(format!(
                "unknown face selector {s:?}"
            )))
        };
        let mut chars = s.chars();
        let (Some(op), Some(axis), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let dir = match axis.to_ascii_uppercase() {
            'X' => Vector3::x(),
            'Y' => Vector3::y(),
            'Z' => Vector3::z(),
            _ => return Err(invalid()),
        };
        match op {
            '>' => Ok(Self::Max(dir)),
            '<' => Ok(Self::Min(dir)),
            '+' => Ok(Self::Normal(dir)),
            '-' => Ok(Self::Normal(-dir)),
            '|' => Ok(Self::Parallel(dir)),
            _ => Err(invalid()),
        }
    }
}

/// Selects the faces of a solid that match a [`FaceSelector`].
pub struct SelectFaces {
    solid: SolidId,
    selector: FaceSelector,
}

impl SelectFaces {
    /// Creates a new `SelectFaces` query.
    #[must_use]
    pub fn new(solid: SolidId, selector: FaceSelector) -> Self {
        Self { solid, selector }
    }

    /// Executes the query, returning matching faces in solid order.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is missing or a selector direction is
    /// zero-length.
    pub fn execute(&self, store: &TopologyStore) -> Result<Vec<FaceId>> {
        let faces = SolidFaces::new(self.solid).execute(store)?;
        match &self.selector {
            FaceSelector::All => Ok(faces),
            FaceSelector::Max(dir) => extremal(store, faces, &unit(dir)?),
            FaceSelector::Min(dir) => extremal(store, faces, &-unit(dir)?),
            FaceSelector::Normal(dir) => by_normal(store, faces, &unit(dir)?, false),
            FaceSelector::Parallel(dir) => by_normal(store, faces, &unit(dir)?, true),
        }
    }
}

fn unit(dir: &Vector3) -> Result<Vector3> {
    dir.try_normalize(0.0).ok_or_else(|| {
        OperationError::InvalidInput("face selector direction must be non-zero".into()).into()
    })
}

fn extremal(store: &TopologyStore, faces: Vec<FaceId>, dir: &Vector3) -> Result<Vec<FaceId>> {
    let mut scored = Vec::with_capacity(faces.len());
    for face in faces {
        let center = face_center(store, face)?;
        scored.push((face, center.coords.dot(dir)));
    }
    let best = scored
        .iter()
        .map(|&(_, score)| score)
        .fold(f64::NEG_INFINITY, f64::max);
    Ok(scored
        .into_iter()
        .filter(|&(_, score)| score >= best - EXTREMUM_TOLERANCE)
        .map(|(face, _)| face)
        .collect())
}

fn by_normal(
    store: &TopologyStore,
    faces: Vec<FaceId>,
    dir: &Vector3,
    either_sense: bool,
) -> Result<Vec<FaceId>> {
    let mut selected = Vec::new();
    for face in faces {
        let cos = store.face(face)?.surface.normal().dot(dir);
        let cos = if either_sense { cos.abs() } else { cos };
        if cos > 1.0 - DIRECTION_TOLERANCE {
            selected.push(face);
        }
    }
    Ok(selected)
}
