pub mod honeycomb;

pub use honeycomb::HoneycombTexture;

use crate::error::Result;
use crate::operations::boolean::Clean;
use crate::progress::Progress;
use crate::topology::{FaceId, SolidId, TopologyStore};

/// A surface texture that can be grown out of selected faces.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureKind {
    Honeycomb(HoneycombTexture),
}

impl From<HoneycombTexture> for TextureKind {
    fn from(texture: HoneycombTexture) -> Self {
        Self::Honeycomb(texture)
    }
}

/// Result of texturing a solid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureReport {
    /// The base solid with every face texture unioned in.
    pub solid: SolidId,
    /// Clipped texture per textured face, in selection order.
    pub textures: Vec<SolidId>,
    pub faces_textured: usize,
    /// Faces that produced no geometry.
    pub faces_skipped: usize,
    pub hexagons_built: usize,
    /// Hexagons dropped because their prism could not be built.
    pub hexagons_skipped: usize,
}

impl TextureReport {
    fn new(base: SolidId) -> Self {
        Self {
            solid: base,
            textures: Vec::new(),
            faces_textured: 0,
            faces_skipped: 0,
            hexagons_built: 0,
            hexagons_skipped: 0,
        }
    }
}

/// Grows `texture` out of each face in `faces` and unions it into `base`.
///
/// # Errors
///
/// Returns [`TextureError::NoFacesSelected`](crate::error::TextureError::NoFacesSelected)
/// for an empty selection, an invalid-parameter error for a bad texture,
/// and any face or boolean failure.
pub fn apply_texture(
    store: &mut TopologyStore,
    base: SolidId,
    faces: &[FaceId],
    texture: &TextureKind,
    clean: Clean,
    progress: &mut dyn Progress,
) -> Result<TextureReport> {
    match texture {
        TextureKind::Honeycomb(honeycomb) => {
            honeycomb::add_honeycomb(store, base, faces, honeycomb, clean, progress)
        }
    }
}
