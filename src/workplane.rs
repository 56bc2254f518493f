use crate::error::{OperationError, Result, TextureError};
use crate::geometry::Plane;
use crate::math::Point2;
use crate::operations::boolean::{Clean, Intersect, Subtract, Union};
use crate::operations::creation::MakeBox;
use crate::operations::query::{Aabb, BoundingBox, FaceSelector, SelectFaces};
use crate::operations::shaping::Extrude;
use crate::progress::Progress;
use crate::texture::{apply_texture, TextureKind, TextureReport};
use crate::topology::{FaceId, SolidId, TopologyStore};

/// Chainable modeling session over a [`TopologyStore`].
///
/// Holds the current solid and face selection. New primitives are unioned
/// into the current solid; every union uses the workplane's [`Clean`] mode.
///
/// ```
/// use relief::operations::boolean::Clean;
/// use relief::texture::{HoneycombTexture, TextureKind};
/// use relief::topology::TopologyStore;
/// use relief::progress::NoProgress;
/// use relief::workplane::Workplane;
///
/// let mut store = TopologyStore::new();
/// let texture = TextureKind::from(HoneycombTexture::new(5.0, 1.0, 2.0).random_seed(7));
/// let wp = Workplane::new(&mut store)
///     .with_clean(Clean::Yes)
///     .make_box(50.0, 50.0, 10.0)?
///     .faces(">Z")?
///     .texture(&texture, &mut NoProgress)?;
/// assert!(wp.solid().is_some());
/// # Ok::<(), relief::ReliefError>(())
/// ```
pub struct Workplane<'k> {
    store: &'k mut TopologyStore,
    solid: Option<SolidId>,
    selection: Vec<FaceId>,
    clean: Clean,
    last_texture: Option<TextureReport>,
}

impl<'k> Workplane<'k> {
    /// An empty workplane.
    pub fn new(store: &'k mut TopologyStore) -> Self {
        Self {
            store,
            solid: None,
            selection: Vec::new(),
            clean: Clean::default(),
            last_texture: None,
        }
    }

    /// A workplane starting from an existing solid.
    pub fn on(store: &'k mut TopologyStore, solid: SolidId) -> Self {
        Self {
            solid: Some(solid),
            ..Self::new(store)
        }
    }

    #[must_use]
    pub fn with_clean(mut self, clean: Clean) -> Self {
        self.clean = clean;
        self
    }

    /// Adds a `length × width × height` box centered on the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if an extent is not positive.
    pub fn make_box(self, length: f64, width: f64, height: f64) -> Result<Self> {
        let solid = MakeBox::centered(length, width, height).execute(self.store)?;
        self.combine(solid)
    }

    /// Adds a prism extruded from `profile` on `plane`.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile or height is degenerate.
    pub fn extrude(self, plane: Plane, profile: Vec<Point2>, height: f64) -> Result<Self> {
        let solid = Extrude::new(plane, profile, height).execute(self.store)?;
        self.combine(solid)
    }

    /// Selects faces of the current solid, e.g. `">Z"` or `"|X"`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown selector or an empty workplane.
    pub fn faces(self, selector: &str) -> Result<Self> {
        let selector: FaceSelector = selector.parse()?;
        self.select(selector)
    }

    /// Selects faces of the current solid.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty workplane.
    pub fn select(mut self, selector: FaceSelector) -> Result<Self> {
        let solid = self.require_solid()?;
        self.selection = SelectFaces::new(solid, selector).execute(&*self.store)?;
        Ok(self)
    }

    /// Unions `other` into the current solid.
    ///
    /// # Errors
    ///
    /// Returns an error if `other` is not in the store.
    pub fn union(self, other: SolidId) -> Result<Self> {
        self.combine(other)
    }

    /// Removes `other` from the current solid.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty workplane or a missing operand.
    pub fn cut(mut self, other: SolidId) -> Result<Self> {
        let solid = self.require_solid()?;
        self.solid = Some(Subtract::new(solid, other).execute(self.store)?);
        self.selection.clear();
        Ok(self)
    }

    /// Keeps only the part of the current solid inside `other`.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty workplane or a missing operand.
    pub fn intersect(mut self, other: SolidId) -> Result<Self> {
        let solid = self.require_solid()?;
        self.solid = Some(Intersect::new(solid, other).execute(self.store)?);
        self.selection.clear();
        Ok(self)
    }

    /// Textures the selected faces and makes the result the current solid.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::NoFacesSelected`] if nothing is selected, and
    /// any error from building the texture.
    pub fn texture(mut self, texture: &TextureKind, progress: &mut dyn Progress) -> Result<Self> {
        if self.selection.is_empty() {
            return Err(TextureError::NoFacesSelected.into());
        }
        let base = self.require_solid()?;
        let report = apply_texture(
            self.store,
            base,
            &self.selection,
            texture,
            self.clean,
            progress,
        )?;
        self.solid = Some(report.solid);
        self.selection.clear();
        self.last_texture = Some(report);
        Ok(self)
    }

    /// The current solid, `None` before anything was added.
    #[must_use]
    pub fn solid(&self) -> Option<SolidId> {
        self.solid
    }

    #[must_use]
    pub fn selected_faces(&self) -> &[FaceId] {
        &self.selection
    }

    /// Report of the most recent [`texture`](Self::texture) call.
    #[must_use]
    pub fn last_texture(&self) -> Option<&TextureReport> {
        self.last_texture.as_ref()
    }

    /// Bounding box of the current solid.
    ///
    /// # Errors
    ///
    /// Returns an error if the current solid is missing from the store.
    pub fn bounding_box(&self) -> Result<Option<Aabb>> {
        match self.solid {
            Some(solid) => BoundingBox::new(solid).execute(&*self.store),
            None => Ok(None),
        }
    }

    #[must_use]
    pub fn store(&self) -> &TopologyStore {
        &*self.store
    }

    fn combine(mut self, solid: SolidId) -> Result<Self> {
        self.solid = Some(match self.solid {
            Some(current) => Union::new(current, solid)
                .with_clean(self.clean)
                .execute(self.store)?,
            None => {
                self.store.solid(solid)?;
                solid
            }
        });
        self.selection.clear();
        Ok(self)
    }

    fn require_solid(&self) -> Result<SolidId> {
        self.solid
            .ok_or_else(|| OperationError::InvalidInput("workplane has no solid".into()).into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ReliefError;
    use crate::math::Point3;
    use crate::progress::NoProgress;
    use crate::texture::HoneycombTexture;
    use crate::topology::SolidData;
    use approx::assert_relative_eq;

    #[test]
    fn box_then_top_face() {
        let mut store = TopologyStore::new();
        let wp = Workplane::new(&mut store)
            .make_box(10.0, 20.0, 4.0)
            .unwrap()
            .faces(">Z")
            .unwrap();
        assert_eq!(wp.selected_faces().len(), 1);
        let aabb = wp.bounding_box().unwrap().unwrap();
        assert_relative_eq!(aabb.max, Point3::new(5.0, 10.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn textured_box_grows_upward() {
        let mut store = TopologyStore::new();
        let texture = TextureKind::from(
            HoneycombTexture::new(5.0, 3.0, 3.0)
                .height_steps(1)
                .random_seed(10),
        );
        let wp = Workplane::new(&mut store)
            .make_box(50.0, 50.0, 10.0)
            .unwrap()
            .faces(">Z")
            .unwrap()
            .texture(&texture, &mut NoProgress)
            .unwrap();
        let aabb = wp.bounding_box().unwrap().unwrap();
        assert_relative_eq!(aabb.max.z, 8.0, epsilon = 1e-9);
        assert_relative_eq!(aabb.max.x, 25.0, epsilon = 1e-9);
        assert!(wp.selected_faces().is_empty());
        assert_eq!(wp.last_texture().unwrap().faces_textured, 1);
    }

    #[test]
    fn texture_without_selection_fails() {
        let mut store = TopologyStore::new();
        let texture = TextureKind::from(HoneycombTexture::new(5.0, 1.0, 2.0));
        let result = Workplane::new(&mut store)
            .make_box(10.0, 10.0, 10.0)
            .unwrap()
            .texture(&texture, &mut NoProgress);
        assert!(matches!(
            result,
            Err(ReliefError::Texture(TextureError::NoFacesSelected))
        ));
    }

    #[test]
    fn unclean_unions_stay_binary() {
        let mut store = TopologyStore::new();
        let extra = MakeBox::new(Point3::new(10.0, 0.0, 0.0), Point3::new(11.0, 1.0, 1.0))
            .execute(&mut store)
            .unwrap();
        let solid = Workplane::new(&mut store)
            .with_clean(Clean::No)
            .make_box(1.0, 1.0, 1.0)
            .unwrap()
            .make_box(2.0, 2.0, 2.0)
            .unwrap()
            .union(extra)
            .unwrap()
            .solid()
            .unwrap();
        match store.solid(solid).unwrap() {
            SolidData::Compound(children) => assert_eq!(children.len(), 2),
            other => panic!("expected compound, got {other:?}"),
        }
    }

    #[test]
    fn cut_and_intersect() {
        let mut store = TopologyStore::new();
        let tool = MakeBox::new(Point3::new(0.0, -5.0, -5.0), Point3::new(5.0, 5.0, 5.0))
            .execute(&mut store)
            .unwrap();
        let wp = Workplane::new(&mut store)
            .make_box(4.0, 4.0, 4.0)
            .unwrap()
            .intersect(tool)
            .unwrap();
        let aabb = wp.bounding_box().unwrap().unwrap();
        assert_relative_eq!(aabb.min.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(aabb.max.x, 2.0, epsilon = 1e-12);
        let wp = wp.cut(tool).unwrap();
        assert!(wp.solid().is_some());
    }

    #[test]
    fn selecting_on_empty_workplane_fails() {
        let mut store = TopologyStore::new();
        assert!(Workplane::new(&mut store).faces(">Z").is_err());
    }
}
