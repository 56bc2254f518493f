mod build;
mod compose;
mod config;
mod filter;
mod grid;
mod height;

pub use build::{build_group, GroupSolid};
pub use compose::{clip_to_face, clip_volume};
pub use config::HoneycombTexture;
pub use filter::{hex_overlaps_face, hexagon};
pub use grid::{CandidateHex, HexGrid};
pub use height::{assign_heights, group_by_height, quantize, HeightGroups, HeightSampler};

use tracing::{debug, info};

use crate::error::{Result, TextureError};
use crate::math::frame::FaceFrame;
use crate::math::Point2;
use crate::merge::{union_hierarchical, MergeOptions};
use crate::operations::boolean::{Clean, Union};
use crate::operations::query::face_center;
use crate::progress::{NoProgress, Progress, ProgressEvent};
use crate::topology::{FaceId, SolidId, TopologyStore};

use super::TextureReport;

/// Layout of the texture on one face, before any solid is built.
#[derive(Debug, Clone)]
pub struct FacePlan {
    pub frame: FaceFrame,
    /// Face boundary in frame coordinates.
    pub boundary: Vec<Point2>,
    pub grid: HexGrid,
    /// Hexagons that overlap the face, grouped by height.
    pub groups: HeightGroups,
}

impl FacePlan {
    /// Number of hexagons that passed the overlap filter.
    #[must_use]
    pub fn retained(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Lays out the texture on `face`: frame, grid, overlap filter and heights.
///
/// Returns `None` if the face boundary is empty.
///
/// # Errors
///
/// Returns an error if the face is missing or its normal is degenerate.
pub fn plan_face(
    store: &TopologyStore,
    face: FaceId,
    texture: &HoneycombTexture,
) -> Result<Option<FacePlan>> {
    let origin = face_center(store, face)?;
    let data = store.face(face)?;
    let frame = FaceFrame::new(origin, data.surface.normal(), texture.rotation_degrees)?;
    let boundary: Vec<Point2> = data
        .outer_boundary
        .iter()
        .map(|p| frame.to_local(p))
        .collect();

    let Some(grid) = HexGrid::new(&boundary, texture.hex_side_len, texture.spacing_coefficient)
    else {
        return Ok(None);
    };
    let retained: Vec<CandidateHex> = grid
        .candidates()
        .filter(|c| hex_overlaps_face(&hexagon(&c.center, texture.hex_side_len), &boundary))
        .collect();
    debug!(
        rows = grid.rows,
        cols = grid.cols,
        candidates = grid.len(),
        retained = retained.len(),
        "hex grid"
    );

    let mut sampler = HeightSampler::new(texture);
    let groups = group_by_height(assign_heights(retained, &mut sampler));
    Ok(Some(FacePlan {
        frame,
        boundary,
        grid,
        groups,
    }))
}

/// Outcome of texturing one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceTexture {
    /// Clipped texture solid, `None` if the face contributed nothing.
    pub solid: Option<SolidId>,
    pub hexagons_built: usize,
    pub hexagons_skipped: usize,
}

/// Builds the clipped texture solid for one face.
///
/// A face with no overlapping hexagons, or whose groups all have zero
/// height, yields no solid.
///
/// # Errors
///
/// Returns an error if the face is missing, its frame is degenerate, or a
/// union or the clip fails.
pub fn texture_face(
    store: &mut TopologyStore,
    face: FaceId,
    texture: &HoneycombTexture,
    clean: Clean,
) -> Result<FaceTexture> {
    let mut outcome = FaceTexture {
        solid: None,
        hexagons_built: 0,
        hexagons_skipped: 0,
    };
    let Some(plan) = plan_face(store, face, texture)? else {
        return Ok(outcome);
    };
    if plan.groups.is_empty() {
        debug!("face has no overlapping hexagons");
        return Ok(outcome);
    }

    let plane = plan.frame.plane()?;
    let mut group_solids = Vec::with_capacity(plan.groups.len());
    for (height, hexes) in &plan.groups {
        let height = height.into_inner();
        if height <= 0.0 {
            debug!(count = hexes.len(), "skipping zero-height group");
            continue;
        }
        let group = build_group(store, &plane, height, hexes, texture.hex_side_len, clean)?;
        outcome.hexagons_built += group.built;
        outcome.hexagons_skipped += group.skipped;
        group_solids.extend(group.solid);
    }

    let options = MergeOptions::default().clean(clean);
    let Some(unclipped) = union_hierarchical(store, &group_solids, &options, &mut NoProgress)?
    else {
        return Ok(outcome);
    };
    outcome.solid = Some(clip_to_face(
        store,
        unclipped,
        &plan.frame,
        &plan.boundary,
        texture.hex_height_max,
    )?);
    Ok(outcome)
}

/// Textures every face in `faces` and unions the results into `base`.
///
/// The honeycomb is a relief of staggered hexagonal prisms of random height
/// grown out of each face and trimmed to its boundary. Per face this lays
/// out a grid, keeps the hexagons overlapping the face, builds one prism
/// batch per height, unions the batches and clips them to the face.
///
/// # Errors
///
/// Returns [`TextureError::NoFacesSelected`] for an empty selection, an
/// invalid-parameter error for a bad texture, and any face or boolean
/// failure.
pub fn add_honeycomb(
    store: &mut TopologyStore,
    base: SolidId,
    faces: &[FaceId],
    texture: &HoneycombTexture,
    clean: Clean,
    progress: &mut dyn Progress,
) -> Result<TextureReport> {
    if faces.is_empty() {
        return Err(TextureError::NoFacesSelected.into());
    }
    texture.validate()?;

    let mut report = TextureReport::new(base);
    for (done, &face) in faces.iter().enumerate() {
        let outcome = texture_face(store, face, texture, clean)?;
        report.hexagons_built += outcome.hexagons_built;
        report.hexagons_skipped += outcome.hexagons_skipped;
        match outcome.solid {
            Some(textured) => {
                report.solid = Union::new(report.solid, textured)
                    .with_clean(clean)
                    .execute(store)?;
                report.textures.push(textured);
                report.faces_textured += 1;
            }
            None => report.faces_skipped += 1,
        }
        progress.report(&ProgressEvent::new("texture", done + 1, faces.len()));
    }
    info!(
        faces = faces.len(),
        textured = report.faces_textured,
        hexagons = report.hexagons_built,
        skipped = report.hexagons_skipped,
        "honeycomb texture done"
    );
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ReliefError;
    use crate::geometry::Plane;
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::MakeBox;
    use crate::operations::query::{
        classify_point_in_solid, BoundingBox, FaceSelector, PointClassification, SelectFaces,
    };
    use crate::operations::shaping::Extrude;
    use approx::assert_relative_eq;

    fn slab(store: &mut TopologyStore) -> SolidId {
        MakeBox::centered(50.0, 50.0, 10.0).execute(store).unwrap()
    }

    fn top_face(store: &TopologyStore, solid: SolidId) -> FaceId {
        SelectFaces::new(solid, FaceSelector::Max(Vector3::z()))
            .execute(store)
            .unwrap()[0]
    }

    fn pairs(plan: &FacePlan) -> Vec<(f64, f64, f64)> {
        plan.groups
            .iter()
            .flat_map(|(h, hexes)| hexes.iter().map(move |c| (c.center.x, c.center.y, h.into_inner())))
            .collect()
    }

    #[test]
    fn flat_face_texture_stays_on_footprint() {
        let mut store = TopologyStore::new();
        let base = slab(&mut store);
        let face = top_face(&store, base);
        let texture = HoneycombTexture::new(5.0, 2.0, 2.0)
            .height_steps(1)
            .random_seed(1);
        let report = add_honeycomb(&mut store, base, &[face], &texture, Clean::Yes, &mut NoProgress)
            .unwrap();
        assert_eq!(report.faces_textured, 1);
        assert_eq!(report.hexagons_skipped, 0);
        assert!(report.hexagons_built > 0);

        let textured = BoundingBox::new(report.textures[0]).execute(&store).unwrap().unwrap();
        assert_relative_eq!(textured.size().z, 2.0, epsilon = 1e-9);
        assert!(textured.min.x >= -25.0 - 1e-9 && textured.max.x <= 25.0 + 1e-9);
        assert!(textured.min.y >= -25.0 - 1e-9 && textured.max.y <= 25.0 + 1e-9);

        let whole = BoundingBox::new(report.solid).execute(&store).unwrap().unwrap();
        assert_relative_eq!(whole.min, Point3::new(-25.0, -25.0, -5.0), epsilon = 1e-9);
        assert_relative_eq!(whole.max, Point3::new(25.0, 25.0, 7.0), epsilon = 1e-9);
    }

    #[test]
    fn random_heights_stay_within_range() {
        let mut store = TopologyStore::new();
        let base = slab(&mut store);
        let face = top_face(&store, base);
        let texture = HoneycombTexture::new(5.0, 1.0, 3.0)
            .height_steps(4)
            .random_seed(8);
        let report = add_honeycomb(&mut store, base, &[face], &texture, Clean::Yes, &mut NoProgress)
            .unwrap();
        let textured = BoundingBox::new(report.textures[0]).execute(&store).unwrap().unwrap();
        assert!(textured.max.z <= 5.0 + 3.0 + 1e-9);
        assert!(textured.max.z >= 5.0 + 1.0 - 1e-9);
    }

    #[test]
    fn seeded_plans_are_identical() {
        let mut store = TopologyStore::new();
        let base = slab(&mut store);
        let face = top_face(&store, base);
        let texture = HoneycombTexture::new(5.0, 0.5, 4.0)
            .height_steps(1)
            .random_seed(2024);
        let a = plan_face(&store, face, &texture).unwrap().unwrap();
        let b = plan_face(&store, face, &texture).unwrap().unwrap();
        assert!(a.retained() > 0);
        assert_eq!(pairs(&a), pairs(&b));
    }

    #[test]
    fn rotated_plan_keeps_grid_on_face() {
        let mut store = TopologyStore::new();
        let base = slab(&mut store);
        let face = top_face(&store, base);
        let texture = HoneycombTexture::new(5.0, 1.0, 1.0)
            .rotation_degrees(30.0)
            .random_seed(4);
        let plan = plan_face(&store, face, &texture).unwrap().unwrap();
        assert!(plan.retained() > 0);
        assert!(plan.retained() <= plan.grid.len());
    }

    #[test]
    fn side_faces_are_textured_along_their_normals() {
        let mut store = TopologyStore::new();
        let base = slab(&mut store);
        let faces = SelectFaces::new(base, FaceSelector::Max(Vector3::x()))
            .execute(&store)
            .unwrap();
        let texture = HoneycombTexture::new(2.0, 1.0, 1.0)
            .height_steps(1)
            .random_seed(3);
        let report = add_honeycomb(&mut store, base, &faces, &texture, Clean::Yes, &mut NoProgress)
            .unwrap();
        let whole = BoundingBox::new(report.solid).execute(&store).unwrap().unwrap();
        assert_relative_eq!(whole.max.x, 26.0, epsilon = 1e-9);
        assert_relative_eq!(whole.max.z, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn face_smaller_than_a_cell_still_gets_a_hexagon() {
        let mut store = TopologyStore::new();
        let base = MakeBox::centered(1.0, 1.0, 1.0).execute(&mut store).unwrap();
        let face = top_face(&store, base);
        let texture = HoneycombTexture::new(5.0, 1.0, 1.0).random_seed(0);
        let report = add_honeycomb(&mut store, base, &[face], &texture, Clean::Yes, &mut NoProgress)
            .unwrap();
        assert_eq!(report.faces_textured, 1);
        let textured = BoundingBox::new(report.textures[0]).execute(&store).unwrap().unwrap();
        assert_relative_eq!(textured.size(), Vector3::new(1.0, 1.0, 1.0), epsilon = 1e-9);
    }

    #[test]
    fn zero_height_texture_contributes_nothing() {
        let mut store = TopologyStore::new();
        let base = slab(&mut store);
        let face = top_face(&store, base);
        let texture = HoneycombTexture::new(5.0, 0.0, 0.0).random_seed(0);
        let report = add_honeycomb(&mut store, base, &[face], &texture, Clean::Yes, &mut NoProgress)
            .unwrap();
        assert_eq!(report.faces_textured, 0);
        assert_eq!(report.faces_skipped, 1);
        assert_eq!(report.solid, base);
    }

    #[test]
    fn non_convex_face_keeps_notch_clear() {
        let mut store = TopologyStore::new();
        let l_shape = vec![
            Point2::new(0.0, 0.0),
            Point2::new(40.0, 0.0),
            Point2::new(40.0, 10.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 40.0),
            Point2::new(0.0, 40.0),
        ];
        let base = Extrude::new(Plane::xy(), l_shape, 5.0)
            .execute(&mut store)
            .unwrap();
        let face = top_face(&store, base);
        let texture = HoneycombTexture::new(2.0, 1.0, 1.0).random_seed(6);
        let report = add_honeycomb(&mut store, base, &[face], &texture, Clean::Yes, &mut NoProgress)
            .unwrap();
        let notch = Point3::new(30.0, 30.0, 5.5);
        let arm = Point3::new(5.0, 30.0, 5.5);
        let inside = |p: &Point3| {
            classify_point_in_solid(p, report.solid, &store).unwrap() == PointClassification::Inside
        };
        assert!(!inside(&notch));
        assert!(inside(&arm));
    }

    #[test]
    fn random_heights_without_steps_reach_at_most_max() {
        let mut store = TopologyStore::new();
        let base = slab(&mut store);
        let face = top_face(&store, base);
        let texture = HoneycombTexture::new(5.0, 1.0, 3.0)
            .height_steps(1)
            .random_seed(77);
        let plan = plan_face(&store, face, &texture).unwrap().unwrap();
        assert!(plan.groups.len() > 1);
        assert!(plan
            .groups
            .keys()
            .all(|h| (1.0..=3.0).contains(&h.into_inner())));

        let report = add_honeycomb(&mut store, base, &[face], &texture, Clean::Yes, &mut NoProgress)
            .unwrap();
        let textured = BoundingBox::new(report.textures[0]).execute(&store).unwrap().unwrap();
        assert!(textured.max.z <= 5.0 + 3.0 + 1e-9);
        assert!(textured.min.z >= 5.0 - 1e-9);
    }

    #[test]
    fn face_without_overlapping_hexagons_is_skipped() {
        let mut store = TopologyStore::new();
        // the lower-right corner of the extent lies outside the triangle
        let triangle = vec![
            Point2::new(0.0, 0.0),
            Point2::new(40.0, 40.0),
            Point2::new(0.0, 40.0),
        ];
        let base = Extrude::new(Plane::xy(), triangle, 5.0)
            .execute(&mut store)
            .unwrap();
        let face = top_face(&store, base);
        let texture = HoneycombTexture::new(1.0, 1.0, 2.0)
            .spacing_coefficient(100.0)
            .random_seed(5);
        let plan = plan_face(&store, face, &texture).unwrap().unwrap();
        assert_eq!(plan.grid.len(), 4);
        assert_eq!(plan.retained(), 0);

        let report = add_honeycomb(&mut store, base, &[face], &texture, Clean::Yes, &mut NoProgress)
            .unwrap();
        assert_eq!(report.faces_textured, 0);
        assert_eq!(report.faces_skipped, 1);
        assert!(report.textures.is_empty());
        assert_eq!(report.solid, base);
    }

    #[test]
    fn off_center_face_is_textured_to_its_far_edge() {
        let mut store = TopologyStore::new();
        let l_shape = vec![
            Point2::new(0.0, 0.0),
            Point2::new(40.0, 0.0),
            Point2::new(40.0, 10.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 40.0),
            Point2::new(0.0, 40.0),
        ];
        let base = Extrude::new(Plane::xy(), l_shape, 5.0)
            .execute(&mut store)
            .unwrap();
        let face = top_face(&store, base);
        let texture = HoneycombTexture::new(2.0, 1.0, 1.0).random_seed(6);
        let report = add_honeycomb(&mut store, base, &[face], &texture, Clean::Yes, &mut NoProgress)
            .unwrap();
        let far_end = Point3::new(38.0, 5.0, 5.5);
        assert_eq!(
            classify_point_in_solid(&far_end, report.solid, &store).unwrap(),
            PointClassification::Inside
        );
    }

    #[test]
    fn empty_selection_is_rejected() {
        let mut store = TopologyStore::new();
        let base = slab(&mut store);
        let texture = HoneycombTexture::new(5.0, 1.0, 2.0);
        let result = add_honeycomb(&mut store, base, &[], &texture, Clean::Yes, &mut NoProgress);
        assert!(matches!(
            result,
            Err(ReliefError::Texture(TextureError::NoFacesSelected))
        ));
    }

    #[test]
    fn reports_progress_per_face() {
        let mut store = TopologyStore::new();
        let base = slab(&mut store);
        let faces = SelectFaces::new(base, FaceSelector::Parallel(Vector3::z()))
            .execute(&store)
            .unwrap();
        let texture = HoneycombTexture::new(10.0, 1.0, 1.0).random_seed(0);
        let mut fractions = Vec::new();
        let mut sink = |e: &ProgressEvent| fractions.push(e.fraction());
        add_honeycomb(&mut store, base, &faces, &texture, Clean::Yes, &mut sink).unwrap();
        assert_eq!(fractions.len(), 2);
        assert_relative_eq!(fractions[1], 1.0);
    }
}
